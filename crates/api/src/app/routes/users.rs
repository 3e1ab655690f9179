use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::{StatusCode, header},
    response::IntoResponse,
};

use userhub_pipeline::Request;
use userhub_users::{
    CountUsersQuery, CreateUserCommand, DeleteUserCommand, FindUsersQuery, GetUserQuery,
    ListUsersQuery, UpdateUserCommand,
};

use crate::app::dto::{CountDto, user_location};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::RequestContext;

async fn dispatch<R: Request>(
    services: &AppServices,
    ctx: &RequestContext,
    request: R,
) -> Result<R::Response, axum::response::Response> {
    services
        .dispatcher
        .send(request, ctx.cancel())
        .await
        .map_err(errors::pipeline_error_to_response)
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<GetUserQuery>,
) -> axum::response::Response {
    match dispatch(&services, &ctx, query).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(res) => res,
    }
}

pub async fn find_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<FindUsersQuery>,
) -> axum::response::Response {
    match dispatch(&services, &ctx, query).await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(res) => res,
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<ListUsersQuery>,
) -> axum::response::Response {
    match dispatch(&services, &ctx, query).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(res) => res,
    }
}

pub async fn count_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
) -> axum::response::Response {
    match dispatch(&services, &ctx, CountUsersQuery).await {
        Ok(count) => (StatusCode::OK, Json(CountDto { count })).into_response(),
        Err(res) => res,
    }
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<CreateUserCommand>,
) -> axum::response::Response {
    match dispatch(&services, &ctx, body).await {
        Ok(user) => (
            StatusCode::CREATED,
            [(header::LOCATION, user_location(user.user_id))],
            Json(user),
        )
            .into_response(),
        Err(res) => res,
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<UpdateUserCommand>,
) -> axum::response::Response {
    match dispatch(&services, &ctx, body).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(res) => res,
    }
}

/// Idempotent: 204 whether or not the user existed.
pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<DeleteUserCommand>,
) -> axum::response::Response {
    match dispatch(&services, &ctx, body).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(res) => res,
    }
}
