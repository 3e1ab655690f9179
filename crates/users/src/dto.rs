//! Projections returned to callers.

use serde::{Deserialize, Serialize};

use userhub_core::UserId;

use crate::model::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: UserId,
    pub given_names: String,
    pub last_name: String,
    pub email_address: String,
    pub mobile_number: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            given_names: user.given_names.clone(),
            last_name: user.last_name.clone(),
            email_address: user.contact_detail.email_address.clone(),
            mobile_number: user.contact_detail.mobile_number.clone(),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            given_names: user.given_names,
            last_name: user.last_name,
            email_address: user.contact_detail.email_address,
            mobile_number: user.contact_detail.mobile_number,
        }
    }
}

/// One page of results plus whether a further page exists.
///
/// `has_next_page` is derived from a look-ahead fetch, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDto<T> {
    pub data: Vec<T>,
    pub has_next_page: bool,
}

/// Result of an idempotent delete.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// `false` when no user had the identifier (still a success).
    pub removed: bool,
}
