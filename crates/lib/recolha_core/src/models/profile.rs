//! User directory models: role, status, and the pre-approved profile.

use serde::{Deserialize, Serialize};

/// Access role of a directory profile.
///
/// Stored as free text in the directory and parsed case-insensitively.
/// Anything unrecognized becomes [`Role::Unknown`], which is denied
/// everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Kovi,
    Ativa,
    Onsystem,
    Rvs,
    Chofer,
    Unknown,
}

impl Role {
    /// Parse a stored role string (case-insensitive, whitespace-tolerant).
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "admin" => Role::Admin,
            "kovi" => Role::Kovi,
            "ativa" => Role::Ativa,
            "onsystem" => Role::Onsystem,
            "rvs" => Role::Rvs,
            "chofer" => Role::Chofer,
            _ => Role::Unknown,
        }
    }

    /// Admin and Kovi see every card.
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::Admin | Role::Kovi)
    }

    /// Partner roles scoped to their own company's cards.
    pub fn is_company_scoped(self) -> bool {
        matches!(self, Role::Ativa | Role::Onsystem | Role::Rvs)
    }

    /// Canonical lowercase name, as stored in the directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Kovi => "kovi",
            Role::Ativa => "ativa",
            Role::Onsystem => "onsystem",
            Role::Rvs => "rvs",
            Role::Chofer => "chofer",
            Role::Unknown => "unknown",
        }
    }
}

/// Activation status of a directory profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Active,
    Inactive,
    /// No directory row exists for the email.
    NotFound,
}

impl ProfileStatus {
    /// Parse a stored status string. Anything that is not "active" counts
    /// as inactive.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "active" => ProfileStatus::Active,
            _ => ProfileStatus::Inactive,
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, ProfileStatus::Active)
    }
}

/// A pre-approved user profile from the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub company: String,
    /// Cities the profile may operate in. Empty means unrestricted for card
    /// visibility.
    pub area_of_operation: Vec<String>,
    pub status: ProfileStatus,
}

impl UserProfile {
    /// Placeholder profile for an email with no directory row.
    pub fn not_found(email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: None,
            role: Role::Unknown,
            company: String::new(),
            area_of_operation: Vec::new(),
            status: ProfileStatus::NotFound,
        }
    }
}
