use tracing::info;

use crate::Database;
use crate::error::Result;
use crate::models::User;
use crate::repository::user::UserRepository;

pub async fn get_user(db: &Database, user_id: i64) -> Result<User> {
    let _guard = db.exclusive().await;
    UserRepository::new(db.pool()).find_by_id(user_id).await
}

/// `None` means the GitHub account has not been linked to a member yet.
pub async fn find_by_github_id(db: &Database, github_id: i64) -> Result<Option<User>> {
    let _guard = db.exclusive().await;
    UserRepository::new(db.pool()).find_by_github_id(github_id).await
}

pub async fn link_github_user(
    db: &Database,
    github_id: i64,
    avatar_url: &str,
    user_id: i64,
) -> Result<User> {
    let _guard = db.exclusive().await;

    let user = UserRepository::new(db.pool())
        .link_github(github_id, avatar_url, user_id)
        .await?;

    info!("Linked GitHub account {} to user {}", github_id, user_id);

    Ok(user)
}
