use std::sync::Arc;

use axum::extract::FromRef;
use storage::Database;

use crate::config::GithubOAuth;
use crate::github::IdentityProvider;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub identity: Arc<dyn IdentityProvider>,
    pub oauth: GithubOAuth,
    /// Event year used when a request does not name one
    pub default_year: i32,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<dyn IdentityProvider> {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}
