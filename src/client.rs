use crate::model::{EventDraft, EventId, EventRecord};

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, StatusCode, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_COLLECTION_URL: &str = "http://localhost:3000/events";

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid collection url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("could not build request: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("server answered {0}")]
    Status(StatusCode),
    #[error("could not read response: {0}")]
    Decode(String),
    #[error("could not encode request body: {0}")]
    Encode(String),
}

/// The four calls the event store needs from the collection endpoint.
///
/// The store is generic over this so it can be handed a fake in tests and
/// [`RestClient`] in the binary.
pub trait EventsApi {
    fn list_events(&self) -> impl Future<Output = Result<Vec<EventRecord>, ApiError>> + Send;

    fn create_event(
        &self,
        draft: &EventDraft,
    ) -> impl Future<Output = Result<EventRecord, ApiError>> + Send;

    fn delete_event(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<serde_json::Value, ApiError>> + Send;

    fn update_event(
        &self,
        id: EventId,
        draft: &EventDraft,
    ) -> impl Future<Output = Result<EventRecord, ApiError>> + Send;
}

#[derive(Clone, Debug)]
pub struct RestClient {
    http: HttpsClient,
    collection: String,
}

impl RestClient {
    pub fn new(url: &str) -> Result<Self, ApiError> {
        let uri: Uri = url.parse().map_err(|e: http::uri::InvalidUri| ApiError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(ApiError::InvalidUrl {
                url: url.to_string(),
                reason: "expected an absolute http(s) url".to_string(),
            });
        }

        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        root_store.add_parsable_certificates(result.certs);

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http = Client::builder(TokioExecutor::new()).build(https_connector);

        Ok(Self {
            http,
            collection: url.trim_end_matches('/').to_string(),
        })
    }

    pub fn collection_url(&self) -> &str {
        &self.collection
    }

    fn item_url(&self, id: EventId) -> String {
        format!("{}/{}", self.collection, id)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let mut builder = Request::builder()
            .method(method.clone())
            .uri(url)
            .header(ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        let req = builder
            .body(body.unwrap_or_default())
            .map_err(|e| ApiError::Request(e.to_string()))?;

        debug!(%method, url, "sending request");

        let resp = self
            .http
            .request(req)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .to_bytes();

        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn encode(draft: &EventDraft) -> Result<String, ApiError> {
        serde_json::to_string(draft).map_err(|e| ApiError::Encode(e.to_string()))
    }
}

impl EventsApi for RestClient {
    async fn list_events(&self) -> Result<Vec<EventRecord>, ApiError> {
        self.send(Method::GET, &self.collection, None).await
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<EventRecord, ApiError> {
        let body = Self::encode(draft)?;
        self.send(Method::POST, &self.collection, Some(body)).await
    }

    async fn delete_event(&self, id: EventId) -> Result<serde_json::Value, ApiError> {
        let result = self.send(Method::DELETE, &self.item_url(id), None).await;
        if let Err(e) = &result {
            warn!(%id, error = %e, "delete failed");
        }
        result
    }

    async fn update_event(&self, id: EventId, draft: &EventDraft) -> Result<EventRecord, ApiError> {
        let result = match Self::encode(draft) {
            Ok(body) => self.send(Method::PATCH, &self.item_url(id), Some(body)).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            warn!(%id, error = %e, "update failed");
        }
        result
    }
}
