//! User account service: registration and login.

use serde::Deserialize;
use std::sync::Arc;

use libris_store::{load, save, EntityKind, RecordStore};

use crate::error::AuthError;
use crate::password;
use crate::user::User;
use crate::Result;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

/// Registration request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Account operations over the shared user collection.
///
/// Every operation is a full read (and on registration, write) of
/// `users.json`; email uniqueness is a linear scan at insertion time,
/// with no store-level constraint behind it.
#[derive(Clone)]
pub struct Accounts {
    store: Arc<dyn RecordStore>,
}

impl Accounts {
    /// Creates the service over the given record store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Registers a new user and returns it.
    ///
    /// Validation order: missing fields, password length, email
    /// format, then the duplicate-email scan.
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        let email = req
            .email
            .filter(|e| !e.is_empty())
            .ok_or(AuthError::MissingCredentials)?;
        let plaintext = req
            .password
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        if plaintext.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        if !User::validate_email(&email) {
            return Err(AuthError::InvalidEmail);
        }

        let mut users: Vec<User> = load(self.store.as_ref(), EntityKind::Users).await?;

        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailExists);
        }

        // Hashing is CPU-bound; keep it off the async executor.
        let password_hash = tokio::task::spawn_blocking(move || password::hash(&plaintext))
            .await
            .map_err(|e| AuthError::Crypto(e.to_string()))??;

        let user = User::new(email, req.name, password_hash);
        users.push(user.clone());
        save(self.store.as_ref(), EntityKind::Users, &users).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Authenticates by email and password.
    ///
    /// Unknown email and wrong password produce the identical
    /// [`AuthError::InvalidCredentials`] so callers cannot probe which
    /// emails exist.
    pub async fn login(&self, req: LoginRequest) -> Result<User> {
        let email = req
            .email
            .filter(|e| !e.is_empty())
            .ok_or(AuthError::MissingCredentials)?;
        let plaintext = req
            .password
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        let users: Vec<User> = load(self.store.as_ref(), EntityKind::Users).await?;

        let Some(user) = users.into_iter().find(|u| u.email == email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let digest = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || password::verify(&plaintext, &digest))
            .await
            .map_err(|e| AuthError::Crypto(e.to_string()))?;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!(user_id = %user.id, "Login successful");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_store::MemoryStore;

    fn accounts() -> Accounts {
        Accounts::new(Arc::new(MemoryStore::new()))
    }

    fn register_req(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            name: None,
        }
    }

    #[tokio::test]
    async fn register_persists_exactly_one_user() {
        let store = Arc::new(MemoryStore::new());
        let accounts = Accounts::new(store.clone());

        let user = accounts
            .register(register_req("a@b.com", "password123"))
            .await
            .unwrap();
        assert_eq!(user.name, "a");

        let users: Vec<User> = load(store.as_ref(), EntityKind::Users).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "a@b.com");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_and_is_not_persisted() {
        let store = Arc::new(MemoryStore::new());
        let accounts = Accounts::new(store.clone());

        accounts
            .register(register_req("a@b.com", "password123"))
            .await
            .unwrap();
        let err = accounts
            .register(register_req("a@b.com", "different456"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailExists));

        let users: Vec<User> = load(store.as_ref(), EntityKind::Users).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn email_matching_is_case_sensitive() {
        let accounts = accounts();
        accounts
            .register(register_req("a@b.com", "password123"))
            .await
            .unwrap();

        // Different case registers as a distinct account.
        accounts
            .register(register_req("A@b.com", "password123"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn register_validation_order() {
        let accounts = accounts();

        let err = accounts.register(RegisterRequest::default()).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));

        let err = accounts
            .register(register_req("a@b.com", "short"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword));

        let err = accounts
            .register(register_req("not-an-email", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail));
    }

    #[tokio::test]
    async fn login_round_trip() {
        let accounts = accounts();
        let registered = accounts
            .register(register_req("a@b.com", "password123"))
            .await
            .unwrap();

        let user = accounts
            .login(LoginRequest {
                email: Some("a@b.com".to_string()),
                password: Some("password123".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(user.id, registered.id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let accounts = accounts();
        accounts
            .register(register_req("a@b.com", "password123"))
            .await
            .unwrap();

        let wrong_password = accounts
            .login(LoginRequest {
                email: Some("a@b.com".to_string()),
                password: Some("wrong-password".to_string()),
            })
            .await
            .unwrap_err();
        let unknown_email = accounts
            .login(LoginRequest {
                email: Some("nobody@b.com".to_string()),
                password: Some("password123".to_string()),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }
}
