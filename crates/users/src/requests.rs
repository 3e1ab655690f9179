//! Typed requests: one per user operation.
//!
//! Field names on the wire are camelCase. Missing text fields deserialize to
//! empty strings and a missing `pageNumber` to `0`, so absent input is reported
//! by validation (with the field name) instead of by the deserializer.

use serde::{Deserialize, Serialize};
use validator::Validate;

use userhub_core::UserId;
use userhub_core::rules::{assignable_id, email_address, not_blank};
use userhub_pipeline::Request;

use crate::dto::{DeleteOutcome, PaginatedDto, UserDto};
use crate::model::{ContactDetail, NewUser};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

/// Fetch one user by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GetUserQuery {
    #[validate(custom(function = "assignable_id"))]
    pub id: UserId,
}

impl Request for GetUserQuery {
    type Response = UserDto;
}

/// Users matching either name, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindUsersQuery {
    #[serde(default)]
    pub given_names: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Request for FindUsersQuery {
    type Response = Vec<UserDto>;
}

/// One page of users in stable (ascending id) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    #[serde(default)]
    #[validate(range(min = 1, message = "must be greater than '0'."))]
    pub page_number: i64,
    /// No upper bound: a large page simply returns every remaining user.
    #[serde(default = "default_items_per_page")]
    #[validate(range(min = 1, message = "must be greater than or equal to '1'."))]
    pub items_per_page: i64,
}

fn default_items_per_page() -> i64 {
    DEFAULT_ITEMS_PER_PAGE
}

impl ListUsersQuery {
    pub fn new(page_number: i64, items_per_page: i64) -> Self {
        Self {
            page_number,
            items_per_page,
        }
    }
}

impl Request for ListUsersQuery {
    type Response = PaginatedDto<UserDto>;
}

/// Total number of stored users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountUsersQuery;

impl Request for CountUsersQuery {
    type Response = u64;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserCommand {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub given_names: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(custom(function = "email_address"))]
    pub email_address: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub mobile_number: String,
}

impl CreateUserCommand {
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            given_names: self.given_names.clone(),
            last_name: self.last_name.clone(),
            contact_detail: ContactDetail {
                email_address: self.email_address.clone(),
                mobile_number: self.mobile_number.clone(),
            },
        }
    }
}

impl Request for CreateUserCommand {
    type Response = UserDto;
}

/// Overwrite every mutable field of an existing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserCommand {
    #[validate(custom(function = "assignable_id"))]
    pub id: UserId,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub given_names: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(custom(function = "email_address"))]
    pub email_address: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub mobile_number: String,
}

impl UpdateUserCommand {
    pub fn changes(&self) -> NewUser {
        NewUser {
            given_names: self.given_names.clone(),
            last_name: self.last_name.clone(),
            contact_detail: ContactDetail {
                email_address: self.email_address.clone(),
                mobile_number: self.mobile_number.clone(),
            },
        }
    }
}

impl Request for UpdateUserCommand {
    type Response = UserDto;
}

/// Idempotent delete by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeleteUserCommand {
    #[validate(custom(function = "assignable_id"))]
    pub id: UserId,
}

impl Request for DeleteUserCommand {
    type Response = DeleteOutcome;
}
