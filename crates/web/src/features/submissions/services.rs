use storage::{
    Database,
    dto::submission::SubmissionRequest,
    error::Result,
    models::UserSubmission,
    services::{NeedsRecompute, SubmissionLedger},
};

pub async fn list_submissions(db: &Database, user_id: i64, year: i32) -> Result<Vec<UserSubmission>> {
    SubmissionLedger::new(db).list_for(user_id, year).await
}

pub async fn get_submission(db: &Database, caller: i64, id: i64) -> Result<UserSubmission> {
    SubmissionLedger::new(db).get_owned(caller, id).await
}

pub async fn add_submission(
    db: &Database,
    caller: i64,
    year: i32,
    request: &SubmissionRequest,
) -> Result<NeedsRecompute<UserSubmission>> {
    SubmissionLedger::new(db).add(caller, year, request).await
}

pub async fn update_submission(
    db: &Database,
    caller: i64,
    id: i64,
    request: &SubmissionRequest,
) -> Result<NeedsRecompute<UserSubmission>> {
    SubmissionLedger::new(db).update(caller, id, request).await
}

pub async fn delete_submission(db: &Database, caller: i64, id: i64) -> Result<NeedsRecompute<()>> {
    SubmissionLedger::new(db).delete(caller, id).await
}
