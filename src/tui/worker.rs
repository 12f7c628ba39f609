use crate::client::EventsApi;
use crate::store::EventStore;
use crate::tui::action::{Action, AppEvent};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Owns the store and runs one action at a time, reporting back over
/// `event_tx`. Starts with a full load.
pub async fn serve<A: EventsApi>(
    mut store: EventStore<A>,
    mut action_rx: mpsc::Receiver<Action>,
    event_tx: mpsc::Sender<AppEvent>,
) {
    reload(&mut store, &event_tx).await;

    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,

            Action::Reload => reload(&mut store, &event_tx).await,

            Action::Add { row, draft } => {
                let _ = event_tx
                    .send(AppEvent::Status("Adding...".to_string()))
                    .await;
                let result = store.add(draft.clone()).await.map_err(|e| e.to_string());
                let _ = event_tx.send(AppEvent::Added { row, draft, result }).await;
            }

            Action::Update { row, id, draft } => {
                let _ = event_tx
                    .send(AppEvent::Status("Saving...".to_string()))
                    .await;
                let result = store
                    .update(id, draft.clone())
                    .await
                    .map_err(|e| e.to_string());
                let _ = event_tx.send(AppEvent::Updated { row, draft, result }).await;
            }

            Action::Delete { row, id } => {
                let _ = event_tx
                    .send(AppEvent::Status("Deleting...".to_string()))
                    .await;
                let result = store.remove(id).await.map(|_| ()).map_err(|e| e.to_string());
                let _ = event_tx.send(AppEvent::Deleted { row, result }).await;
            }
        }
    }
    info!(remaining = store.len(), "worker stopped");
}

async fn reload<A: EventsApi>(store: &mut EventStore<A>, event_tx: &mpsc::Sender<AppEvent>) {
    let _ = event_tx
        .send(AppEvent::Status("Fetching events...".to_string()))
        .await;
    match store.load().await {
        Ok(events) => {
            let _ = event_tx.send(AppEvent::Loaded(events)).await;
        }
        Err(e) => {
            warn!(error = %e, "load failed, keeping {} cached events", store.len());
            let _ = event_tx
                .send(AppEvent::Error(format!("Could not load events: {}", e)))
                .await;
        }
    }
}
