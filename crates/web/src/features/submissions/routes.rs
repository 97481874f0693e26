use axum::{
    Router, middleware,
    routing::get,
};

use super::handlers::{
    create_submission, delete_submission, get_submission, list_submissions, update_submission,
};
use crate::middleware::auth::require_user;
use crate::state::AppState;

/// Every submission route needs a linked account.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions).post(create_submission))
        .route(
            "/:id",
            get(get_submission)
                .patch(update_submission)
                .delete(delete_submission),
        )
        .route_layer(middleware::from_fn_with_state(state, require_user))
}
