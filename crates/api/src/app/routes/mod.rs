use axum::{Router, routing::get};

pub mod system;
pub mod users;

/// Router for the user endpoints.
pub fn router() -> Router {
    Router::new()
        .route(
            "/Users",
            get(users::get_user)
                .post(users::create_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/Find", get(users::find_users))
        .route("/List", get(users::list_users))
        .route("/Count", get(users::count_users))
}
