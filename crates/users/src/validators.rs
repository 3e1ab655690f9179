//! Validation rules per request type.
//!
//! The rules themselves are `#[validate(...)]` attributes on the request
//! types. Each validator runs them and reports every failure under its wire
//! name, in field declaration order.

use async_trait::async_trait;
use validator::Validate;

use userhub_core::{FieldName, ValidationFailure, failures_from};
use userhub_pipeline::Validator;

use crate::requests::{
    CreateUserCommand, DeleteUserCommand, GetUserQuery, ListUsersQuery, UpdateUserCommand,
};

const ID: FieldName = FieldName::new("id", "id");

const PERSON: [FieldName; 4] = [
    FieldName::new("given_names", "givenNames"),
    FieldName::new("last_name", "lastName"),
    FieldName::new("email_address", "emailAddress"),
    FieldName::new("mobile_number", "mobileNumber"),
];

const UPDATE: [FieldName; 5] = [ID, PERSON[0], PERSON[1], PERSON[2], PERSON[3]];

const LIST: [FieldName; 2] = [
    FieldName::new("page_number", "pageNumber"),
    FieldName::new("items_per_page", "itemsPerPage"),
];

fn check(request: &impl Validate, fields: &[FieldName]) -> Vec<ValidationFailure> {
    match request.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => failures_from(&errors, fields),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GetUserValidator;

#[async_trait]
impl Validator for GetUserValidator {
    type Request = GetUserQuery;

    async fn validate(&self, request: &GetUserQuery) -> Vec<ValidationFailure> {
        check(request, &[ID])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ListUsersValidator;

#[async_trait]
impl Validator for ListUsersValidator {
    type Request = ListUsersQuery;

    async fn validate(&self, request: &ListUsersQuery) -> Vec<ValidationFailure> {
        check(request, &LIST)
    }
}

/// All four person fields are required.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateUserValidator;

#[async_trait]
impl Validator for CreateUserValidator {
    type Request = CreateUserCommand;

    async fn validate(&self, request: &CreateUserCommand) -> Vec<ValidationFailure> {
        check(request, &PERSON)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateUserValidator;

#[async_trait]
impl Validator for UpdateUserValidator {
    type Request = UpdateUserCommand;

    async fn validate(&self, request: &UpdateUserCommand) -> Vec<ValidationFailure> {
        check(request, &UPDATE)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteUserValidator;

#[async_trait]
impl Validator for DeleteUserValidator {
    type Request = DeleteUserCommand;

    async fn validate(&self, request: &DeleteUserCommand) -> Vec<ValidationFailure> {
        check(request, &[ID])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userhub_core::UserId;

    fn fields(failures: &[ValidationFailure]) -> Vec<&str> {
        failures.iter().map(|f| f.field.as_str()).collect()
    }

    fn update(given_names: &str) -> UpdateUserCommand {
        UpdateUserCommand {
            id: UserId::new(1),
            given_names: given_names.to_string(),
            last_name: "Lovelace".to_string(),
            email_address: "ada@example.com".to_string(),
            mobile_number: "0400 111 222".to_string(),
        }
    }

    #[tokio::test]
    async fn update_with_empty_given_names_names_the_field() {
        let failures = UpdateUserValidator.validate(&update("")).await;
        assert_eq!(fields(&failures), vec!["givenNames"]);
        assert_eq!(failures[0].message, "'givenNames' must not be empty.");
    }

    #[tokio::test]
    async fn complete_update_passes() {
        assert!(UpdateUserValidator.validate(&update("Ada")).await.is_empty());
    }

    #[tokio::test]
    async fn empty_create_reports_every_required_field() {
        let failures = CreateUserValidator
            .validate(&CreateUserCommand::default())
            .await;
        assert_eq!(
            fields(&failures),
            vec!["givenNames", "lastName", "emailAddress", "mobileNumber"]
        );
    }

    fn create_with_email(email_address: &str) -> CreateUserCommand {
        CreateUserCommand {
            given_names: "Ada".into(),
            last_name: "Lovelace".into(),
            email_address: email_address.into(),
            mobile_number: "0400 111 222".into(),
        }
    }

    #[tokio::test]
    async fn malformed_email_is_reported_once() {
        for bad in ["ada-at-example.com", "x@y@z", "a b@c", "<script>@;"] {
            let failures = CreateUserValidator.validate(&create_with_email(bad)).await;
            assert_eq!(fields(&failures), vec!["emailAddress"], "{bad}");
            assert_eq!(
                failures[0].message,
                "'emailAddress' is not a valid email address."
            );
        }
    }

    #[tokio::test]
    async fn blank_email_reports_emptiness_not_format() {
        let failures = CreateUserValidator.validate(&create_with_email("   ")).await;
        assert_eq!(fields(&failures), vec!["emailAddress"]);
        assert_eq!(failures[0].message, "'emailAddress' must not be empty.");
    }

    #[tokio::test]
    async fn list_requires_positive_page_and_size() {
        let ok = ListUsersValidator.validate(&ListUsersQuery::new(1, 10)).await;
        assert!(ok.is_empty());

        let failures = ListUsersValidator.validate(&ListUsersQuery::new(0, 10)).await;
        assert_eq!(fields(&failures), vec!["pageNumber"]);
        assert_eq!(failures[0].message, "'pageNumber' must be greater than '0'.");

        let failures = ListUsersValidator.validate(&ListUsersQuery::new(-1, 0)).await;
        assert_eq!(fields(&failures), vec!["pageNumber", "itemsPerPage"]);
    }

    #[tokio::test]
    async fn list_accepts_any_page_size_above_zero() {
        for size in [1, 100, 101, 500, i64::MAX] {
            let failures = ListUsersValidator.validate(&ListUsersQuery::new(1, size)).await;
            assert!(failures.is_empty(), "size {size} rejected: {failures:?}");
        }
    }

    #[tokio::test]
    async fn update_reports_id_before_person_fields() {
        let mut cmd = update("");
        cmd.id = UserId::new(0);
        let failures = UpdateUserValidator.validate(&cmd).await;
        assert_eq!(fields(&failures), vec!["id", "givenNames"]);
    }

    #[tokio::test]
    async fn identifiers_must_be_positive() {
        let failures = GetUserValidator
            .validate(&GetUserQuery { id: UserId::new(0) })
            .await;
        assert_eq!(fields(&failures), vec!["id"]);

        let failures = DeleteUserValidator
            .validate(&DeleteUserCommand { id: UserId::new(-3) })
            .await;
        assert_eq!(fields(&failures), vec!["id"]);
    }
}
