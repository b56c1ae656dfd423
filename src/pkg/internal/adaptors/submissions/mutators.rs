use crate::{pkg::internal::adaptors::submissions::spec::SubmissionEntry, prelude::Result};
use sqlx::PgConnection;

pub struct SubmissionMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> SubmissionMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        SubmissionMutator { pool }
    }

    // Stores the body exactly as received; duplicates are allowed and get
    // their own row.
    pub async fn create(&mut self, resume_data: &str) -> Result<SubmissionEntry> {
        let row = sqlx::query_as::<_, SubmissionEntry>(
            r#"
            INSERT INTO developer_resumes (resume_data)
            VALUES ($1)
            RETURNING id, resume_data, created_at, updated_at
            "#,
        )
        .bind(resume_data)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
