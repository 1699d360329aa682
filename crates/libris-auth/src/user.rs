//! User account model.

use chrono::{SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Email format check. Deliberately loose: something before the `@`,
/// something after it, and a dot in the domain part.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// A registered user, as persisted in `users.json`.
///
/// The password digest is stored but never serialized to clients; API
/// responses go through [`PublicUser`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque unique identifier.
    pub id: String,
    /// Unique email, matched case-sensitively.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Argon2id digest of the password.
    pub password_hash: String,
    /// ISO-8601 creation timestamp, set once and never updated.
    pub created_at: String,
}

impl User {
    /// Creates a user with a fresh identifier and creation timestamp.
    ///
    /// When `name` is absent the local-part of the email is used.
    pub fn new(email: String, name: Option<String>, password_hash: String) -> Self {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| local_part(&email).to_string());

        Self {
            id: Uuid::new_v4().to_string(),
            email,
            name,
            password_hash,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Validates an email address format.
    pub fn validate_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email)
    }

    /// The client-facing projection, without the password digest.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

/// User as returned to API clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
