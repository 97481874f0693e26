use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::modifier::ModifierResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/modifiers",
    responses(
        (status = 200, description = "Language modifiers, best bonus first", body = Vec<ModifierResponse>)
    ),
    tag = "modifiers"
)]
pub async fn list_modifiers(State(db): State<Database>) -> Result<Response, WebError> {
    let modifiers = services::list_modifiers(&db).await?;

    Ok(Json(modifiers).into_response())
}

#[utoipa::path(
    get,
    path = "/api/modifiers/{language}",
    params(
        ("language" = String, Path, description = "Exact language name")
    ),
    responses(
        (status = 200, description = "Modifier found", body = ModifierResponse),
        (status = 404, description = "Unknown language")
    ),
    tag = "modifiers"
)]
pub async fn get_modifier(
    State(db): State<Database>,
    Path(language): Path<String>,
) -> Result<Response, WebError> {
    let modifier = services::get_modifier(&db, &language).await?;

    Ok(Json(modifier).into_response())
}
