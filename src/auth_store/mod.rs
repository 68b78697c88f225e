//! # Session / Auth Store
//!
//! Holds the signed-in user and bearer token, mirrors them into the injected
//! [`SessionPersistence`], and exposes login/logout/register plus role checks.
//!
//! The token written here is the one [`HttpClient`] attaches to every later
//! request, because both share the same persistence handle.
//!
//! Failures follow the resource stores: they are appended to `errors` and the
//! action returns `false`; nothing is raised to the caller.

use crate::clients::users_api::{auth_from_response, role_from_response};
use crate::clients::UsersApi;
use crate::framework::{ApiError, HttpClient, SessionPersistence};
use crate::lifecycle::config::ApiPaths;
use crate::model::{Credentials, SignUp, User};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Observable session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub errors: Vec<ApiError>,
}

#[derive(Clone)]
pub struct AuthStore {
    api: UsersApi,
    session: Arc<dyn SessionPersistence>,
    state: Arc<watch::Sender<SessionState>>,
    generation: Arc<AtomicU64>,
}

impl AuthStore {
    /// Creates the store, restoring token and user from the client's session.
    pub fn new(http: HttpClient, paths: &ApiPaths) -> Self {
        let session = http.session().clone();
        let restored = SessionState {
            user: session.user(),
            token: session.token(),
            ..SessionState::default()
        };
        if restored.token.is_some() {
            info!(user = ?restored.user.as_ref().map(|u| &u.username), "Restored session");
        }
        let (state, _) = watch::channel(restored);
        Self {
            api: UsersApi::new(http, paths),
            session,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    // --- Reads ---

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().token.is_some()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.state
            .borrow()
            .user
            .as_ref()
            .is_some_and(|user| user.roles == role)
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn errors(&self) -> Vec<ApiError> {
        self.state.borrow().errors.clone()
    }

    // --- Ticket bookkeeping ---

    fn begin(&self) -> u64 {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.errors.clear();
        });
        ticket
    }

    fn publish(&self, ticket: u64, apply: impl FnOnce(&mut SessionState)) {
        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            apply(state);
            true
        });
        if !published {
            debug!(ticket, "Discarding stale session result");
        }
    }

    fn settle(&self, ticket: u64, result: Result<(), ApiError>) -> bool {
        let ok = result.is_ok();
        self.publish(ticket, |state| {
            if let Err(e) = result {
                warn!(error = %e, "Session action failed");
                state.errors.push(e);
            }
            state.loading = false;
        });
        ok
    }

    /// Writes to the persisted session and applies `apply`, both under the
    /// state lock and only while `ticket` is current.
    ///
    /// Returns `None` when the action was superseded; nothing is written then.
    fn commit(
        &self,
        ticket: u64,
        persist: impl FnOnce() -> Result<(), ApiError>,
        apply: impl FnOnce(&mut SessionState),
    ) -> Option<Result<(), ApiError>> {
        let mut outcome = None;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            let persisted = persist();
            let applied = persisted.is_ok();
            if applied {
                apply(state);
            }
            outcome = Some(persisted);
            applied
        });
        if outcome.is_none() {
            debug!(ticket, "Discarding stale session result");
        }
        outcome
    }

    /// Token first, then user. A failed user write takes the token back out.
    fn persist_login(&self, token: &str, user: &User) -> Result<(), ApiError> {
        self.session.set_token(token)?;
        if let Err(e) = self.session.set_user(user) {
            if let Err(cleared) = self.session.clear() {
                warn!(error = %cleared, "Failed to roll back persisted token");
            }
            return Err(e.into());
        }
        Ok(())
    }

    // --- Actions ---

    /// Signs in and persists the token and user.
    ///
    /// Returns `false` when the answer arrives after a `logout` or a newer
    /// login; such an answer is neither persisted nor published.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> bool {
        let ticket = self.begin();
        let outcome = match self.sign_in(credentials).await {
            Ok((token, user)) => {
                let committed = self.commit(
                    ticket,
                    || self.persist_login(&token, &user),
                    |state| {
                        state.token = Some(token.clone());
                        state.user = Some(user.clone());
                    },
                );
                match committed {
                    Some(Ok(())) => {
                        info!(user_id = ?user.id, role = %user.roles, "Signed in");
                        Ok(())
                    }
                    Some(Err(e)) => Err(e),
                    None => return false,
                }
            }
            Err(e) => Err(e),
        };
        self.settle(ticket, outcome)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<(String, User), ApiError> {
        let response = self.api.sign_in(credentials).await?;
        auth_from_response(&response.body)
    }

    /// Forgets the session locally. No server call.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.state.send_modify(|state| {
            // Any in-flight login is now stale.
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = SessionState::default();
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "Failed to clear persisted session");
                state.errors.push(e.into());
            }
        });
        info!("Signed out");
    }

    /// Creates an account. Does not sign in.
    #[instrument(skip(self, payload), fields(username = %payload.username))]
    pub async fn register(&self, payload: &SignUp) -> bool {
        let ticket = self.begin();
        let result = self.api.sign_up(payload).await.map(drop);
        if result.is_ok() {
            info!("Registered");
        }
        self.settle(ticket, result)
    }

    /// Reloads the signed-in user's role from the server and persists it.
    #[instrument(skip(self))]
    pub async fn refresh_role(&self) -> bool {
        let Some(mut user) = self.current_user() else {
            warn!("No signed-in user to refresh");
            return false;
        };
        let Some(user_id) = user.id else {
            warn!("Signed-in user has no id");
            return false;
        };

        let ticket = self.begin();
        let result = async {
            let response = self.api.user_role(user_id).await?;
            role_from_response(&response.body)
        }
        .await;

        let outcome = match result {
            Ok(role) => {
                if !role.role.is_empty() {
                    user.roles = role.role;
                }
                let committed = self.commit(
                    ticket,
                    || self.session.set_user(&user).map_err(ApiError::from),
                    |state| state.user = Some(user.clone()),
                );
                match committed {
                    Some(Ok(())) => {
                        info!(user_id, role = %user.roles, "Role refreshed");
                        Ok(())
                    }
                    Some(Err(e)) => Err(e),
                    None => return false,
                }
            }
            Err(e) => Err(e),
        };
        self.settle(ticket, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_transport, expect_request, MockTransport};
    use crate::framework::{MemorySession, Method, SessionError, TOKEN_KEY, USER_KEY};
    use serde_json::json;

    /// Session whose user writes always fail.
    #[derive(Clone, Default)]
    struct ReadOnlyUserSession {
        inner: MemorySession,
    }

    impl SessionPersistence for ReadOnlyUserSession {
        fn token(&self) -> Option<String> {
            self.inner.token()
        }
        fn set_token(&self, token: &str) -> Result<(), SessionError> {
            self.inner.set_token(token)
        }
        fn user(&self) -> Option<User> {
            self.inner.user()
        }
        fn set_user(&self, _user: &User) -> Result<(), SessionError> {
            Err(SessionError::Io("disk full".into()))
        }
        fn clear(&self) -> Result<(), SessionError> {
            self.inner.clear()
        }
    }

    fn store(mock: &MockTransport, session: &MemorySession) -> AuthStore {
        let http = HttpClient::new(mock.transport(), Arc::new(session.clone()));
        AuthStore::new(http, &ApiPaths::default())
    }

    #[tokio::test]
    async fn test_login_persists_token_and_user() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/authentication/sign-in")
            .return_ok(json!({ "token": "T", "id": 1, "username": "a" }));
        let session = MemorySession::new();
        let auth = store(&mock, &session);

        assert!(auth.login(&Credentials::new("a", "p")).await);

        assert_eq!(auth.token().as_deref(), Some("T"));
        assert!(auth.has_role("Client"));
        assert!(!auth.loading());
        assert_eq!(session.raw(TOKEN_KEY).as_deref(), Some("T"));
        assert!(session.raw(USER_KEY).unwrap().contains("\"roles\":\"Client\""));
    }

    #[tokio::test]
    async fn test_rejected_login_records_error() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/authentication/sign-in").return_status(401, "bad credentials");
        let session = MemorySession::new();
        let auth = store(&mock, &session);

        assert!(!auth.login(&Credentials::new("a", "wrong")).await);
        assert!(!auth.is_authenticated());
        assert_eq!(auth.errors()[0].status(), Some(401));
        assert!(session.raw(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_state_is_restored_from_session() {
        let session = MemorySession::new();
        session.set_token("old").unwrap();
        session
            .set_user(&User {
                id: Some(3),
                username: "m".into(),
                names: "Mara".into(),
                roles: "Manager".into(),
            })
            .unwrap();

        let auth = store(&MockTransport::new(), &session);
        assert!(auth.is_authenticated());
        assert!(auth.has_role("Manager"));
        assert!(!auth.has_role("Client"));
    }

    #[tokio::test]
    async fn test_register_does_not_sign_in() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/authentication/sign-up").return_ok(json!({ "id": 9 }));
        let session = MemorySession::new();
        let auth = store(&mock, &session);

        let payload = SignUp {
            username: "n".into(),
            password: "p".into(),
            names: "Nina".into(),
            roles: "Manager".into(),
        };
        assert!(auth.register(&payload).await);
        assert!(!auth.is_authenticated());
        assert!(session.raw(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_refresh_role_updates_persisted_user() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/authentication/sign-in")
            .return_ok(json!({ "token": "T", "user": { "id": 4, "username": "z" } }));
        mock.expect(Method::Get, "/users/4/role")
            .return_ok(json!({ "userId": 4, "role": "Manager" }));
        let session = MemorySession::new();
        let auth = store(&mock, &session);

        assert!(auth.login(&Credentials::new("z", "p")).await);
        assert!(auth.refresh_role().await);

        assert!(auth.has_role("Manager"));
        assert_eq!(session.user().unwrap().roles, "Manager");
        assert_eq!(mock.requests()[1].header("Authorization"), Some("Bearer T"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_refresh_role_without_user_sends_nothing() {
        let mock = MockTransport::new();
        let auth = store(&mock, &MemorySession::new());

        assert!(!auth.refresh_role().await);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_with_data_envelope() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/authentication/sign-in")
            .return_ok(json!({ "data": { "token": "T", "id": 1, "username": "a" } }));
        let session = MemorySession::new();
        let auth = store(&mock, &session);

        assert!(auth.login(&Credentials::new("a", "p")).await);

        assert_eq!(auth.token().as_deref(), Some("T"));
        assert_eq!(auth.current_user().unwrap().id, Some(1));
        assert!(auth.has_role("Client"));
        assert_eq!(session.raw(TOKEN_KEY).as_deref(), Some("T"));
        assert_eq!(session.user().unwrap().username, "a");
    }

    #[tokio::test]
    async fn test_logout_during_login_discards_answer() {
        let (transport, mut requests) = create_mock_transport(1);
        let session = MemorySession::new();
        let http = HttpClient::new(transport, Arc::new(session.clone()));
        let auth = AuthStore::new(http, &ApiPaths::default());

        let task = tokio::spawn({
            let auth = auth.clone();
            async move { auth.login(&Credentials::new("a", "p")).await }
        });

        let pending = expect_request(&mut requests).await.expect("Expected sign-in");
        assert!(auth.loading());
        auth.logout();
        pending.respond_ok(json!({ "token": "T", "id": 1, "username": "a" }));

        assert!(!task.await.unwrap());
        assert!(session.raw(TOKEN_KEY).is_none());
        assert!(session.raw(USER_KEY).is_none());
        assert!(auth.token().is_none());
        assert!(auth.current_user().is_none());
        assert!(!auth.loading());
    }

    #[tokio::test]
    async fn test_failed_user_write_leaves_no_token() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/authentication/sign-in")
            .return_ok(json!({ "token": "T", "id": 1, "username": "a" }));
        let session = ReadOnlyUserSession::default();
        let http = HttpClient::new(mock.transport(), Arc::new(session.clone()));
        let auth = AuthStore::new(http, &ApiPaths::default());

        assert!(!auth.login(&Credentials::new("a", "p")).await);

        assert!(session.inner.raw(TOKEN_KEY).is_none());
        assert!(!auth.is_authenticated());
        assert!(!auth.loading());
        assert_eq!(
            auth.errors(),
            vec![ApiError::Session(SessionError::Io("disk full".into()))]
        );
    }
}
