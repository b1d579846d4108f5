//! User profile model and role tiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Access tier attached to a user profile.
///
/// Ordering matters: `Guest < User < Vip` is relied on by the access-policy
/// tests to check that visibility grows monotonically with the tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    User,
    Vip,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Vip => "vip",
        }
    }

    /// Parse a stored role string. Returns `None` for unrecognized values;
    /// callers fall back to `Guest` (deny-by-default).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "guest" => Some(Role::Guest),
            "user" => Some(Role::User),
            "vip" => Some(Role::Vip),
            _ => None,
        }
    }

    pub const ALL: [Role; 3] = [Role::Guest, Role::User, Role::Vip];
}

/// Profile row maintained by the external identity/billing collaborators.
///
/// `role` is kept as the raw stored string; use [`Profile::role`] for the
/// typed tier.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Typed role, falling back to `Guest` for unrecognized stored values.
    pub fn role(&self) -> Role {
        Role::parse(&self.role).unwrap_or(Role::Guest)
    }
}
