use storage::{
    Database, dto::modifier::ModifierResponse, error::Result, services::catalog,
};

pub async fn list_modifiers(db: &Database) -> Result<Vec<ModifierResponse>> {
    let modifiers = catalog::list_modifiers(db).await?;
    Ok(modifiers.into_iter().map(ModifierResponse::from).collect())
}

pub async fn get_modifier(db: &Database, language: &str) -> Result<ModifierResponse> {
    catalog::get_modifier(db, language).await.map(ModifierResponse::from)
}
