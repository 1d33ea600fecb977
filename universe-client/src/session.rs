//! Session and role-gated access

use std::sync::{Arc, RwLock};

use shared::client::RegisterRequest;
use shared::error::ErrorCode;
use shared::models::{Role, User};

use crate::api::{AdminApi, Api};
use crate::membership::Navigation;
use crate::store::ClientStore;
use crate::{ClientError, ClientResult};

/// Outcome of the access check for a protected view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
    /// Signed in with the wrong role
    Denied,
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }

    /// Where to go instead of the protected view
    pub fn redirect(&self) -> Option<Navigation> {
        match self {
            Access::Granted => None,
            Access::RedirectToLogin => Some(Navigation::Login),
            Access::Denied => Some(Navigation::Home),
        }
    }
}

/// The single authorization predicate
///
/// Roles are matched exactly: a super admin is not a club admin.
pub fn authorize(user: Option<&User>, required: Option<Role>) -> Access {
    match (user, required) {
        (None, _) => Access::RedirectToLogin,
        (Some(user), Some(role)) if user.role != role => Access::Denied,
        _ => Access::Granted,
    }
}

#[derive(Debug, Clone, Default)]
struct SessionData {
    token: Option<String>,
    user: Option<User>,
}

/// Signed-in user plus bearer token
///
/// The token is persisted in the [`ClientStore`] so [`Session::restore`] can
/// bring the session back after a restart.
#[derive(Debug, Clone)]
pub struct Session {
    api: Api,
    store: ClientStore,
    data: Arc<RwLock<SessionData>>,
}

impl Session {
    pub fn new(api: Api, store: ClientStore) -> Self {
        Self {
            api,
            store,
            data: Arc::new(RwLock::new(SessionData::default())),
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    fn read(&self) -> SessionData {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn write(&self, data: SessionData) {
        self.api.set_token(data.token.clone());
        match self.data.write() {
            Ok(mut guard) => *guard = data,
            Err(poisoned) => *poisoned.into_inner() = data,
        }
    }

    fn establish(&self, token: String, user: User) -> ClientResult<User> {
        self.store.save_token(&token)?;
        self.write(SessionData {
            token: Some(token),
            user: Some(user.clone()),
        });
        tracing::info!(user_id = user.id, role = %user.role, "Signed in");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let auth = self.api.login(email, password).await?;
        self.establish(auth.token, auth.user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        let auth = self.api.register(request).await?;
        self.establish(auth.token, auth.user)
    }

    /// Re-validate the stored token with `auth/me`
    ///
    /// A token the backend refuses is deleted. Transport errors keep it.
    pub async fn restore(&self) -> ClientResult<Option<User>> {
        let Some(token) = self.store.load_token()? else {
            return Ok(None);
        };
        self.api.set_token(Some(token.clone()));

        match self.api.current_user().await {
            Ok(user) => {
                self.write(SessionData {
                    token: Some(token),
                    user: Some(user.clone()),
                });
                tracing::info!(user_id = user.id, "Session restored");
                Ok(Some(user))
            }
            Err(e) if e.is_rejection() => {
                tracing::info!(error = %e, "Stored token rejected, signing out");
                self.logout()?;
                Ok(None)
            }
            Err(e) => {
                self.api.set_token(None);
                Err(e)
            }
        }
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.store.clear_token()?;
        self.write(SessionData::default());
        Ok(())
    }

    pub fn user(&self) -> Option<User> {
        self.read().user
    }

    pub fn token(&self) -> Option<String> {
        self.read().token
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().user.is_some()
    }

    /// Access check for a view that needs `required` (or just a sign-in)
    pub fn access(&self, required: Option<Role>) -> Access {
        authorize(self.user().as_ref(), required)
    }

    /// Fail locally unless signed in with `role`
    pub fn require_role(&self, role: Role) -> ClientResult<User> {
        let user = self.user();
        match authorize(user.as_ref(), Some(role)) {
            Access::Granted => user.ok_or_else(not_authenticated),
            Access::RedirectToLogin => Err(not_authenticated()),
            Access::Denied => Err(ClientError::Forbidden(format!(
                "{} ({})",
                ErrorCode::RoleRequired.message(),
                role
            ))),
        }
    }

    /// Super-admin endpoints, after the local role check
    pub fn admin(&self) -> ClientResult<AdminApi<'_>> {
        self.require_role(Role::SuperAdmin)?;
        Ok(AdminApi::new(&self.api))
    }
}

fn not_authenticated() -> ClientError {
    ClientError::Unauthorized(ErrorCode::NotAuthenticated.message().to_string())
}
