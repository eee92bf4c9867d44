//! Record a new pending changeset

use changeset_core::errors::ExError;
use changeset_core::model::{ChangesetRecord, Severity};
use changeset_core_types::ChangesetId;
use changeset_store::errors::Result;
use changeset_store::{ChangesetStore, RecordCodec};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::time::Instant;

/// Input for [`create_changeset`]
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub severity: Severity,
    pub message: String,
    pub author: Option<String>,
    /// Creation date; today (local time) when `None`
    pub date: Option<NaiveDate>,
}

impl CreateRequest {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            author: None,
            date: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// A record that has just been persisted
#[derive(Debug, Clone)]
pub struct CreatedChangeset {
    pub record: ChangesetRecord,
    pub path: PathBuf,
}

/// Validate the request, assign a fresh id and write the record
///
/// # Errors
/// * `InvalidInput` - Empty or whitespace-only message; nothing is written
/// * `AlreadyExists` - Generated id collides with an existing record
/// * `IoFailure` - The record cannot be written
pub fn create_changeset<C: RecordCodec>(
    store: &ChangesetStore<C>,
    request: CreateRequest,
) -> Result<CreatedChangeset> {
    let start = Instant::now();
    changeset_core::log_op_start!("create_changeset", severity = %request.severity);

    let result = build_and_write(store, request);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(created) => {
            changeset_core::log_op_end!(
                "create_changeset",
                duration_ms = duration_ms,
                changeset_id = %created.record.id
            );
        }
        Err(e) => {
            changeset_core::log_op_error!("create_changeset", e.clone(), duration_ms = duration_ms);
        }
    }

    result
}

fn build_and_write<C: RecordCodec>(
    store: &ChangesetStore<C>,
    request: CreateRequest,
) -> Result<CreatedChangeset> {
    let record = ChangesetRecord::new(
        ChangesetId::generate(),
        request.severity,
        &request.message,
        request.date.unwrap_or_else(|| Local::now().date_naive()),
        request.author,
    )
    .map_err(|e| ExError::from(e).with_op("create_changeset"))?;

    let path = store.write(&record)?;

    Ok(CreatedChangeset { record, path })
}
