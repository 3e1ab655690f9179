//! User entity (stored shape).

use serde::{Deserialize, Serialize};

use userhub_core::UserId;

/// How to reach a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    pub email_address: String,
    pub mobile_number: String,
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub given_names: String,
    pub last_name: String,
    pub contact_detail: ContactDetail,
}

impl User {
    /// Name search used by the `find` operation.
    ///
    /// Matches when the given names equal `given_names` OR the last name equals
    /// `last_name`, ignoring case. An absent term matches nothing; an empty
    /// term only matches an empty field.
    pub fn matches_names(&self, given_names: Option<&str>, last_name: Option<&str>) -> bool {
        let eq = |field: &str, term: Option<&str>| {
            term.is_some_and(|term| field.to_lowercase() == term.to_lowercase())
        };
        eq(&self.given_names, given_names) || eq(&self.last_name, last_name)
    }

    /// Overwrite every mutable field from `changes`, keeping the identifier.
    pub fn apply_changes(&mut self, changes: NewUser) {
        self.given_names = changes.given_names;
        self.last_name = changes.last_name;
        self.contact_detail = changes.contact_detail;
    }
}

/// A user that has not been stored yet (the gateway assigns the id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub given_names: String,
    pub last_name: String,
    pub contact_detail: ContactDetail,
}

impl NewUser {
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            given_names: self.given_names,
            last_name: self.last_name,
            contact_detail: self.contact_detail,
        }
    }
}
