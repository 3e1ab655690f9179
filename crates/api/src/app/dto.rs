use serde::{Deserialize, Serialize};

use userhub_core::UserId;

/// Body of `GET /Count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountDto {
    pub count: u64,
}

/// `Location` header value for a newly created user.
pub fn user_location(id: UserId) -> String {
    format!("/Users?id={id}")
}
