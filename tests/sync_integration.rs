use eventdesk::client::RestClient;
use eventdesk::model::{EventDraft, EventId, EventRecord};
use eventdesk::store::EventStore;
use mockito::{Matcher, Server};

const LISTING: &str = r#"[
    {"id":1,"eventName":"A","startDate":"2024-01-01","endDate":"2024-01-02"},
    {"id":7,"eventName":"Seven","startDate":"2024-07-01","endDate":"2024-07-07"}
]"#;

async fn loaded_store(server: &mut Server) -> EventStore<RestClient> {
    server
        .mock("GET", "/events")
        .with_status(200)
        .with_body(LISTING)
        .create_async()
        .await;
    let client = RestClient::new(&format!("{}/events", server.url())).unwrap();
    let mut store = EventStore::new(client);
    store.load().await.unwrap();
    store
}

#[tokio::test]
async fn test_add_keeps_the_submitted_draft() {
    let mut server = Server::new_async().await;
    let mut store = loaded_store(&mut server).await;

    // The server echoes an id; the local copy must not pick it up.
    let mock_create = server
        .mock("POST", "/events")
        .match_body(Matcher::PartialJsonString(r#"{"eventName":"Trip"}"#.to_string()))
        .with_status(201)
        .with_body(r#"{"id":99,"eventName":"Trip","startDate":"2024-02-01","endDate":"2024-02-03"}"#)
        .create_async()
        .await;

    let draft = EventDraft::new("Trip", "2024-02-01", "2024-02-03");
    let created = store.add(draft.clone()).await.unwrap();

    mock_create.assert_async().await;
    assert_eq!(created.id, Some(EventId(99)));
    assert_eq!(store.len(), 3);
    assert_eq!(store.events()[2], EventRecord::from(draft));
}

#[tokio::test]
async fn test_delete_by_string_id() {
    let mut server = Server::new_async().await;
    let mut store = loaded_store(&mut server).await;

    let mock_delete = server
        .mock("DELETE", "/events/7")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    store.remove("7").await.unwrap();

    mock_delete.assert_async().await;
    assert!(store.events().iter().all(|e| e.id != Some(EventId(7))));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_failed_delete_keeps_the_record() {
    let mut server = Server::new_async().await;
    let mut store = loaded_store(&mut server).await;

    let _mock_delete = server
        .mock("DELETE", "/events/7")
        .with_status(500)
        .create_async()
        .await;

    assert!(store.remove(7u64).await.is_err());
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_update_twice_is_stable() {
    let mut server = Server::new_async().await;
    let mut store = loaded_store(&mut server).await;

    let mock_patch = server
        .mock("PATCH", "/events/1")
        .with_status(200)
        .with_body(r#"{"id":1,"eventName":"A2","startDate":"2024-01-05","endDate":"2024-01-06"}"#)
        .expect(2)
        .create_async()
        .await;

    let patch = EventDraft::new("A2", "2024-01-05", "2024-01-06");
    store.update(1u64, patch.clone()).await.unwrap();
    let first = store.events().to_vec();
    store.update("1", patch).await.unwrap();

    mock_patch.assert_async().await;
    assert_eq!(store.events(), first.as_slice());
    assert_eq!(store.events()[0].event_name, "A2");
    assert_eq!(store.events()[1].event_name, "Seven");
}

#[tokio::test]
async fn test_placeholder_id_never_reaches_the_server() {
    let mut server = Server::new_async().await;
    let mut store = loaded_store(&mut server).await;

    let mock_any_delete = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    assert!(store.remove("undefined").await.is_err());
    mock_any_delete.assert_async().await;
    assert_eq!(store.len(), 2);
}
