// ============================================================================
// API CLIENT - HTTP calls only (stateless apart from the session token)
// ============================================================================
// No business logic here: build request, attach bearer, map status codes.
// ============================================================================

use std::rc::Rc;

use futures::channel::mpsc;
use futures::StreamExt;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{
    Credentials, ErrorBody, Hotspot, HotspotsResponse, Prediction, PredictionsResponse,
    TokenResponse, TransferProgress, UploadFile, UploadResponse,
};
use crate::services::transport::{HttpRequest, HttpResponse, HttpTransport, UploadRequest};
use crate::services::upload_progress::ProgressTracker;
use crate::state::SessionStore;
use crate::utils::constants::{
    HOTSPOTS_PATH, LOGIN_PATH, PREDICT_PATH, REGISTER_PATH, UPLOAD_FIELD_NAME, UPLOAD_PATH,
};

/// Gateway to the prediction service.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    /// Log in; returns the session credential.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        log::info!("🔐 [API] Logging in as {}", credentials.email);
        self.authenticate(LOGIN_PATH, credentials).await
    }

    /// Create an account; returns the session credential.
    pub async fn register(&self, credentials: &Credentials) -> Result<String, ApiError> {
        log::info!("📝 [API] Registering {}", credentials.email);
        self.authenticate(REGISTER_PATH, credentials).await
    }

    pub async fn get_predictions(&self) -> Result<Vec<Prediction>, ApiError> {
        let response: PredictionsResponse = self.get_json(PREDICT_PATH).await?;
        log::info!("✅ [API] {} predictions received", response.locations.len());
        Ok(response.locations)
    }

    pub async fn get_hotspots(&self) -> Result<Vec<Hotspot>, ApiError> {
        let response: HotspotsResponse = self.get_json(HOTSPOTS_PATH).await?;
        log::info!("✅ [API] {} hotspots received", response.hotspots.len());
        Ok(response.hotspots)
    }

    /// Multipart upload of `file`. `on_progress` sees a strictly increasing
    /// sequence of percentages and, on success, a closing 100 before this
    /// returns.
    pub async fn upload_csv<F>(
        &self,
        file: &UploadFile,
        mut on_progress: F,
    ) -> Result<UploadResponse, ApiError>
    where
        F: FnMut(u8),
    {
        let request = UploadRequest {
            url: self.url(UPLOAD_PATH),
            headers: self.auth_headers(),
            field_name: UPLOAD_FIELD_NAME.to_string(),
            file: file.clone(),
        };

        let (tx, mut rx) = mpsc::unbounded::<TransferProgress>();
        let mut tracker = ProgressTracker::new();

        let send = self.transport.upload(request, tx);
        let drain = async {
            while let Some(event) = rx.next().await {
                if let Some(value) = tracker.observe(event.loaded, event.total) {
                    on_progress(value);
                }
            }
        };
        let (sent, ()) = futures::join!(send, drain);

        let response = self.check_protected(sent?)?;
        let parsed: UploadResponse = serde_json::from_str(&response.body)?;
        if let Some(value) = tracker.finish() {
            on_progress(value);
        }

        log::info!("✅ [API] Upload accepted: {}", parsed.filename);
        Ok(parsed)
    }

    async fn authenticate(&self, path: &str, credentials: &Credentials) -> Result<String, ApiError> {
        let body = serde_json::to_string(credentials)?;
        let request = HttpRequest::post_json(self.url(path), body).with_headers(self.auth_headers());
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let message = error_message(&response);
            log::warn!("⚠️ [API] {} rejected: {}", path, message);
            return Err(ApiError::Auth(message));
        }

        let token: TokenResponse = serde_json::from_str(&response.body)?;
        Ok(token.token)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = HttpRequest::get(self.url(path)).with_headers(self.auth_headers());
        let response = self.transport.send(request).await?;
        let response = self.check_protected(response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// 401 is kept apart from every other failure so callers can drop the
    /// session without inspecting messages.
    fn check_protected(&self, response: HttpResponse) -> Result<HttpResponse, ApiError> {
        if response.is_success() {
            return Ok(response);
        }
        if response.status == 401 {
            log::warn!("⚠️ [API] 401 Unauthorized");
            return Err(ApiError::Unauthorized);
        }
        Err(ApiError::Http {
            status: response.status,
            message: error_message(&response),
        })
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        self.session
            .get()
            .map(|token| vec![("Authorization".to_string(), format!("Bearer {}", token))])
            .unwrap_or_default()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("HTTP error {}", response.status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;

    fn client_with(transport: Rc<FakeTransport>, token: Option<&str>) -> ApiClient {
        let session = SessionStore::new(Rc::new(MemoryStorage::new()), "token");
        if let Some(token) = token {
            session.set(token);
        }
        ApiClient::new("/api/", transport, session)
    }

    #[test]
    fn attaches_bearer_when_session_exists() {
        let transport = Rc::new(FakeTransport::new());
        transport.respond("/predict", 200, r#"{"locations":[]}"#);
        let client = client_with(transport.clone(), Some("jwt-1"));

        block_on(client.get_predictions()).unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].url, "/api/predict");
        assert_eq!(sent[0].header("authorization"), Some("Bearer jwt-1"));
    }

    #[test]
    fn sends_without_bearer_when_logged_out() {
        let transport = Rc::new(FakeTransport::new());
        transport.respond("/hotspots", 200, r#"{"hotspots":[]}"#);
        let client = client_with(transport.clone(), None);

        block_on(client.get_hotspots()).unwrap();
        assert_eq!(transport.requests()[0].header("Authorization"), None);
    }

    #[test]
    fn maps_401_to_unauthorized() {
        let transport = Rc::new(FakeTransport::new());
        transport.respond("/predict", 401, r#"{"message":"Token is invalid"}"#);
        let client = client_with(transport, Some("stale"));

        let err = block_on(client.get_predictions()).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn other_failures_keep_status_and_message() {
        let transport = Rc::new(FakeTransport::new());
        transport.respond("/predict", 500, r#"{"error":"Model not available"}"#);
        let client = client_with(transport, Some("jwt"));

        match block_on(client.get_predictions()) {
            Err(ApiError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Model not available");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn network_failure_is_not_unauthorized() {
        let transport = Rc::new(FakeTransport::new());
        let client = client_with(transport, Some("jwt"));

        let err = block_on(client.get_hotspots()).unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn login_returns_token_and_posts_credentials() {
        let transport = Rc::new(FakeTransport::new());
        transport.respond("/auth/login", 200, r#"{"token":"jwt-9"}"#);
        let client = client_with(transport.clone(), None);

        let token = block_on(client.login(&Credentials::new("a@b.org", "pw"))).unwrap();
        assert_eq!(token, "jwt-9");

        let body: Credentials = serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, Credentials::new("a@b.org", "pw"));
    }

    #[test]
    fn login_rejection_is_an_auth_error() {
        let transport = Rc::new(FakeTransport::new());
        transport.respond("/auth/login", 401, r#"{"message":"Invalid credentials"}"#);
        let client = client_with(transport, None);

        let err = block_on(client.login(&Credentials::new("a@b.org", "bad"))).unwrap_err();
        assert!(matches!(err, ApiError::Auth(ref msg) if msg == "Invalid credentials"));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn upload_progress_is_monotonic_and_ends_at_hundred() {
        let total = 2 * 1024 * 1024;
        let transport = Rc::new(FakeTransport::new());
        transport.respond("/upload", 200, r#"{"filename":"incidents.csv"}"#);
        transport.set_upload_events(vec![
            (0, total),
            (total / 4, total),
            (total / 4, total),
            (total / 2, total),
            (total / 3, total),
            (total - 1, total),
        ]);
        let client = client_with(transport.clone(), Some("jwt"));
        let file = UploadFile::new("incidents.csv", "text/csv", vec![0u8; total as usize]);

        let mut seen = Vec::new();
        let response = block_on(client.upload_csv(&file, |p| seen.push(p))).unwrap();

        assert_eq!(response.filename, "incidents.csv");
        assert_eq!(seen, vec![0, 25, 50, 100]);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        let upload = transport.uploads();
        assert_eq!(upload[0].field_name, "file");
        assert_eq!(upload[0].header("Authorization"), Some("Bearer jwt"));
    }

    #[test]
    fn failed_upload_never_reports_hundred() {
        let transport = Rc::new(FakeTransport::new());
        transport.respond("/upload", 500, r#"{"message":"disk full"}"#);
        transport.set_upload_events(vec![(10, 100)]);
        let client = client_with(transport, Some("jwt"));
        let file = UploadFile::new("incidents.csv", "text/csv", b"a\n1\n".to_vec());

        let mut seen = Vec::new();
        let err = block_on(client.upload_csv(&file, |p| seen.push(p))).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
        assert_eq!(seen, vec![10]);
    }
}
