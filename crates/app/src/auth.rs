//! The authorization capability boundary.
//!
//! Catalog mutations are exposed to callers only while the provider
//! reports an authorized session. The provider is consumed as a
//! capability object; no store embeds authorization logic of its own.

use thiserror::Error;

/// Login input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// An established authorized session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub email: String,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("admin access required")]
    NotAuthorized,
}

/// Capability provider consumed by the session layer.
pub trait AuthProvider {
    fn is_authorized(&self) -> bool;

    fn login(&mut self, credentials: &Credentials) -> Result<AuthSession, AuthError>;

    fn logout(&mut self);
}

/// Fixed-credential provider for demos and tests. Real deployments plug
/// in their own `AuthProvider`.
#[derive(Debug)]
pub struct DemoAuth {
    email: String,
    password: String,
    session: Option<AuthSession>,
}

impl DemoAuth {
    /// Logged-out provider that accepts exactly one credential pair.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            session: None,
        }
    }

    /// Pre-authorized provider, the quick-login bypass for demos.
    pub fn authorized() -> Self {
        let mut auth = Self::new("demo@cinematch.local", "");
        auth.session = Some(AuthSession {
            email: auth.email.clone(),
        });
        auth
    }
}

impl AuthProvider for DemoAuth {
    fn is_authorized(&self) -> bool {
        self.session.is_some()
    }

    fn login(&mut self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        if credentials.email != self.email || credentials.password != self.password {
            return Err(AuthError::InvalidCredentials);
        }
        let session = AuthSession {
            email: self.email.clone(),
        };
        self.session = Some(session.clone());
        Ok(session)
    }

    fn logout(&mut self) {
        self.session = None;
    }
}
