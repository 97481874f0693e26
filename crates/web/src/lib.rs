pub mod config;
pub mod error;
pub mod features;
pub mod github;
pub mod middleware;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use features::{auth, leaderboard, modifiers, submissions};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        leaderboard::handlers::get_leaderboard,
        leaderboard::handlers::list_years,
        modifiers::handlers::list_modifiers,
        modifiers::handlers::get_modifier,
        submissions::handlers::list_submissions,
        submissions::handlers::get_submission,
        submissions::handlers::create_submission,
        submissions::handlers::update_submission,
        submissions::handlers::delete_submission,
        auth::handlers::login_url,
        auth::handlers::github_callback,
        auth::handlers::link_account,
        auth::handlers::me,
    ),
    components(
        schemas(
            storage::dto::leaderboard::LeaderboardResponse,
            storage::dto::leaderboard::RankedEntry,
            storage::dto::modifier::ModifierResponse,
            storage::dto::submission::SubmissionRequest,
            storage::dto::user::LinkAccountRequest,
            storage::models::UserSubmission,
            storage::models::User,
            github::GithubIdentity,
            auth::handlers::LoginUrlResponse,
            auth::handlers::LoginResponse,
        )
    ),
    tags(
        (name = "leaderboard", description = "Public leaderboard endpoints"),
        (name = "modifiers", description = "Public language modifier catalog"),
        (name = "submissions", description = "Language claims of the logged in member"),
        (name = "auth", description = "GitHub login and account linking"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("GitHub access token")
                        .build(),
                ),
            )
        }
    }
}

/// Full HTTP surface: API routes, Swagger UI and CORS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    let api = Router::new()
        .nest("/api/leaderboard", leaderboard::routes::routes())
        .nest("/api/modifiers", modifiers::routes::routes())
        .nest("/api/submissions", submissions::routes::routes(state.clone()))
        .nest("/api/auth", auth::routes::routes(state.clone()))
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .layer(cors)
}
