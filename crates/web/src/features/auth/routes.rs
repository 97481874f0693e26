use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{github_callback, link_account, login_url, me};
use crate::middleware::auth::{require_github, require_user};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let github_only = Router::new()
        .route("/link", post(link_account))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_github));

    let linked = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, require_user));

    Router::new()
        .route("/github/login", get(login_url))
        .route("/github/callback", get(github_callback))
        .merge(github_only)
        .merge(linked)
}
