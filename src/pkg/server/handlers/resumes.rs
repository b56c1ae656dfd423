use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};

use crate::{
    pkg::{
        internal::{adaptors::submissions::mutators::SubmissionMutator, auth::HireSource},
        server::{
            extract::ResumeSubmission,
            state::{AppState, GetTxn},
        },
    },
    prelude::Result,
};

pub async fn store(
    State(state): State<AppState>,
    Extension(source): Extension<Arc<HireSource>>,
    submission: ResumeSubmission,
) -> Result<impl IntoResponse> {
    let mut tx = state.db_pool.begin_txn().await?;
    let entry = SubmissionMutator::new(&mut tx)
        .create(submission.raw())
        .await?;
    tx.commit().await?;
    tracing::info!(
        "stored resume submission {} sourced via {}",
        entry.id,
        source.label()
    );
    Ok((
        StatusCode::CREATED,
        Json("Your resume has been saved successfully."),
    ))
}
