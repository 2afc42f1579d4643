// ============================================================================
// AUTH VIEWMODEL - Login and registration forms
// ============================================================================

use std::rc::Rc;

use crate::error::ApiError;
use crate::models::Credentials;
use crate::routing::{Navigator, Route};
use crate::services::ApiClient;
use crate::state::SessionStore;

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password required";

#[derive(Clone)]
pub struct AuthViewModel {
    client: ApiClient,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
}

impl AuthViewModel {
    pub fn new(client: ApiClient, session: SessionStore, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            client,
            session,
            navigator,
        }
    }

    /// On error the message is meant for the form; the session is untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let credentials = Self::credentials(email, password)?;
        let token = self.client.login(&credentials).await?;
        self.start_session(&token);
        Ok(())
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let credentials = Self::credentials(email, password)?;
        let token = self.client.register(&credentials).await?;
        self.start_session(&token);
        Ok(())
    }

    fn credentials(email: &str, password: &str) -> Result<Credentials, ApiError> {
        let credentials = Credentials::new(email.trim(), password);
        if !credentials.is_complete() {
            return Err(ApiError::Auth(MISSING_CREDENTIALS_MESSAGE.to_string()));
        }
        Ok(credentials)
    }

    fn start_session(&self, token: &str) {
        self.session.set(token);
        self.navigator.navigate(Route::Dashboard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTransport, RecordingNavigator};
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;

    fn setup() -> (Rc<FakeTransport>, SessionStore, Rc<RecordingNavigator>, AuthViewModel) {
        let transport = Rc::new(FakeTransport::new());
        let session = SessionStore::new(Rc::new(MemoryStorage::new()), "token");
        let navigator = Rc::new(RecordingNavigator::new());
        let client = ApiClient::new("/api", transport.clone(), session.clone());
        let vm = AuthViewModel::new(client, session.clone(), navigator.clone());
        (transport, session, navigator, vm)
    }

    #[test]
    fn login_stores_session_and_opens_dashboard() {
        let (transport, session, navigator, vm) = setup();
        transport.respond("/auth/login", 200, r#"{"token":"jwt-1"}"#);

        block_on(vm.login("ranger@park.org", "secret")).unwrap();

        assert_eq!(session.get().as_deref(), Some("jwt-1"));
        assert_eq!(navigator.visits(), vec![Route::Dashboard]);
    }

    #[test]
    fn rejected_login_leaves_session_alone() {
        let (transport, session, navigator, vm) = setup();
        transport.respond("/auth/login", 401, r#"{"message":"Invalid credentials"}"#);

        let err = block_on(vm.login("ranger@park.org", "wrong")).unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!session.is_present());
        assert!(navigator.visits().is_empty());
    }

    #[test]
    fn blank_fields_never_reach_the_server() {
        let (transport, _, _, vm) = setup();

        let err = block_on(vm.register("  ", "secret")).unwrap_err();

        assert_eq!(err.to_string(), MISSING_CREDENTIALS_MESSAGE);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn register_logs_in_directly() {
        let (transport, session, navigator, vm) = setup();
        transport.respond("/auth/register", 201, r#"{"token":"jwt-new"}"#);

        block_on(vm.register("new@park.org", "secret")).unwrap();

        assert_eq!(session.get().as_deref(), Some("jwt-new"));
        assert_eq!(navigator.visits(), vec![Route::Dashboard]);
    }
}
