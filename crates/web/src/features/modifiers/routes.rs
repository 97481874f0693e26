use axum::{Router, routing::get};

use super::handlers::{get_modifier, list_modifiers};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_modifiers))
        .route("/:language", get(get_modifier))
}
