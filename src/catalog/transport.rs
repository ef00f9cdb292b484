//! Transport contract and the Vinilos HTTP client.
//!
//! [`CatalogApi`] is the seam the service adapters talk through: one typed
//! request per endpoint, each returning an [`ApiResponse`] envelope or a
//! [`TransportError`] when the exchange could not complete. Production
//! code uses [`HttpCatalogApi`]; tests substitute a mock.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::dto;

/// Response envelope for a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub code: u16,
    /// Status reason phrase (e.g. "Not Found")
    pub message: String,
    /// Decoded body, `None` when the body was empty
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    /// A 200 response carrying `body`.
    pub fn ok(body: T) -> Self {
        Self {
            code: 200,
            message: "OK".to_string(),
            body: Some(body),
        }
    }

    /// A 200 response with no body.
    pub fn empty() -> Self {
        Self {
            code: 200,
            message: "OK".to_string(),
            body: None,
        }
    }

    /// A failed response with the given status.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            body: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// The exchange never produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

pub type TransportResult<T> = Result<ApiResponse<T>, TransportError>;

/// Typed request per remote endpoint.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_albums(&self) -> TransportResult<Vec<dto::AlbumDto>>;

    async fn get_album(&self, id: i64) -> TransportResult<dto::AlbumDto>;

    async fn create_album(&self, payload: &dto::NewAlbumPayload) -> TransportResult<dto::AlbumDto>;

    async fn create_comment(
        &self,
        album_id: i64,
        payload: &dto::NewCommentPayload,
    ) -> TransportResult<dto::CommentDto>;

    async fn create_track(
        &self,
        album_id: i64,
        payload: &dto::NewTrackPayload,
    ) -> TransportResult<dto::TrackDto>;

    async fn get_musicians(&self) -> TransportResult<Vec<dto::MusicianDto>>;

    async fn get_musician(&self, id: i64) -> TransportResult<dto::MusicianDto>;

    async fn create_musician(
        &self,
        payload: &dto::NewMusicianPayload,
    ) -> TransportResult<dto::MusicianDto>;

    async fn get_collectors(&self) -> TransportResult<Vec<dto::CollectorDto>>;

    async fn get_collector(&self, id: i64) -> TransportResult<dto::CollectorDto>;

    async fn create_collector(
        &self,
        payload: &dto::NewCollectorPayload,
    ) -> TransportResult<dto::CollectorDto>;
}

/// User agent string sent with every request
const USER_AGENT: &str = concat!("Vinilos/", env!("CARGO_PKG_VERSION"));

/// Default API location
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Vinilos REST client
pub struct HttpCatalogApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogApi {
    /// Create a client for `base_url` with a request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> TransportResult<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_send_error)?;
        read_envelope(response).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> TransportResult<T> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;
        read_envelope(response).await
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn get_albums(&self) -> TransportResult<Vec<dto::AlbumDto>> {
        self.get("/albums").await
    }

    async fn get_album(&self, id: i64) -> TransportResult<dto::AlbumDto> {
        self.get(&format!("/albums/{}", id)).await
    }

    async fn create_album(&self, payload: &dto::NewAlbumPayload) -> TransportResult<dto::AlbumDto> {
        self.post("/albums", payload).await
    }

    async fn create_comment(
        &self,
        album_id: i64,
        payload: &dto::NewCommentPayload,
    ) -> TransportResult<dto::CommentDto> {
        self.post(&format!("/albums/{}/comments", album_id), payload)
            .await
    }

    async fn create_track(
        &self,
        album_id: i64,
        payload: &dto::NewTrackPayload,
    ) -> TransportResult<dto::TrackDto> {
        self.post(&format!("/albums/{}/tracks", album_id), payload)
            .await
    }

    async fn get_musicians(&self) -> TransportResult<Vec<dto::MusicianDto>> {
        self.get("/musicians").await
    }

    async fn get_musician(&self, id: i64) -> TransportResult<dto::MusicianDto> {
        self.get(&format!("/musicians/{}", id)).await
    }

    async fn create_musician(
        &self,
        payload: &dto::NewMusicianPayload,
    ) -> TransportResult<dto::MusicianDto> {
        self.post("/musicians", payload).await
    }

    async fn get_collectors(&self) -> TransportResult<Vec<dto::CollectorDto>> {
        self.get("/collectors").await
    }

    async fn get_collector(&self, id: i64) -> TransportResult<dto::CollectorDto> {
        self.get(&format!("/collectors/{}", id)).await
    }

    async fn create_collector(
        &self,
        payload: &dto::NewCollectorPayload,
    ) -> TransportResult<dto::CollectorDto> {
        self.post("/collectors", payload).await
    }
}

fn map_send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else {
        TransportError::Connection(e.to_string())
    }
}

/// Turn a received response into an envelope.
///
/// Error bodies are not decoded; only the status travels upward.
async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> TransportResult<T> {
    let status = response.status();
    let message = status.canonical_reason().unwrap_or("Unknown").to_string();

    if !status.is_success() {
        return Ok(ApiResponse::status(status.as_u16(), message));
    }

    let bytes = response.bytes().await.map_err(map_send_error)?;
    let body = decode_body(&bytes)?;

    Ok(ApiResponse {
        code: status.as_u16(),
        message,
        body,
    })
}

/// Decode a success body; blank bodies and JSON `null` are reported as `None`.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, TransportError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(bytes).map_err(|e| TransportError::Decode(e.to_string()))
}
