//! Explicit session lifecycle for the wallet-provider credential.
//!
//! The credential lives in a `SessionHandle` shared between the auth flow
//! and the backend client: set on successful sync, cleared on logout or a
//! 401. Token retrieval and the initial sync are both raced against hard
//! timeouts; a timeout resolves to the unauthenticated outcome rather than
//! an error, so the caller degrades to a logged-out view instead of hanging.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::clients::BackendClient;
use crate::error::ReviewError;
use crate::models::SyncedUser;

/// Upper bound on token retrieval from the wallet provider.
pub const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);
/// Upper bound on the initial backend sync.
pub const SYNC_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared holder for the session credential.
#[derive(Clone, Default)]
pub struct SessionHandle {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Teardown: logout or a rejected credential.
    pub fn clear(&self) {
        *self.token.write() = None;
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Third-party wallet/embedded-wallet provider seam.
///
/// `Ok(None)` means the provider is reachable but holds no credential (not
/// signed in); errors are provider failures.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<Option<String>, ReviewError>;
}

/// Why a sign-in attempt ended unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInFailure {
    /// The provider returned no credential.
    TokenUnavailable,
    /// Token retrieval exceeded `TOKEN_TIMEOUT`.
    TokenTimeout,
    /// The backend sync exceeded `SYNC_TIMEOUT`.
    SyncTimeout,
    /// The backend rejected the credential; the session was cleared.
    Rejected,
}

impl SignInFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignInFailure::TokenUnavailable => "no credential available",
            SignInFailure::TokenTimeout => "token retrieval timed out",
            SignInFailure::SyncTimeout => "backend sync timed out",
            SignInFailure::Rejected => "credential rejected",
        }
    }
}

#[derive(Debug)]
pub enum SignInOutcome {
    Authenticated(SyncedUser),
    Unauthenticated { reason: SignInFailure },
}

/// Bounded sign-in flow: provider token, then backend sync, then store the
/// credential in the shared session handle.
pub struct AuthFlow {
    provider: Arc<dyn TokenProvider>,
    backend: BackendClient,
}

impl AuthFlow {
    pub fn new(provider: Arc<dyn TokenProvider>, backend: BackendClient) -> Self {
        Self { provider, backend }
    }

    pub async fn sign_in(&self) -> Result<SignInOutcome, ReviewError> {
        let token = match timeout(TOKEN_TIMEOUT, self.provider.access_token()).await {
            Ok(Ok(token)) => token,
            Ok(Err(e)) => {
                warn!("token provider failed: {e}");
                None
            }
            Err(_) => {
                warn!("token retrieval timed out after {TOKEN_TIMEOUT:?}");
                return Ok(SignInOutcome::Unauthenticated {
                    reason: SignInFailure::TokenTimeout,
                });
            }
        };

        let Some(token) = token else {
            return Ok(SignInOutcome::Unauthenticated {
                reason: SignInFailure::TokenUnavailable,
            });
        };

        match timeout(SYNC_TIMEOUT, self.backend.sync_user(&token)).await {
            Err(_) => {
                warn!("backend sync timed out after {SYNC_TIMEOUT:?}");
                Ok(SignInOutcome::Unauthenticated {
                    reason: SignInFailure::SyncTimeout,
                })
            }
            Ok(Err(ReviewError::Unauthorized)) => {
                self.backend.session().clear();
                Ok(SignInOutcome::Unauthenticated {
                    reason: SignInFailure::Rejected,
                })
            }
            Ok(Err(e)) => Err(e),
            Ok(Ok(user)) => {
                self.backend.session().set_token(token);
                info!(user_id = %user.id, "session established");
                Ok(SignInOutcome::Authenticated(user))
            }
        }
    }
}
