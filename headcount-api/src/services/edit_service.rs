//! Edit Service
//!
//! Validation and persistence of a count edit for one record.
//!
//! An edit moves `Unmodified -> Validating -> (Committed | Rejected)`.
//! Text is parsed and checked against the [`EditPolicy`] before the store is
//! touched, so a malformed edit never reaches the database. Concurrent edits
//! to the same record are last-write-wins.

use headcount_core::{CountValues, SiteId, SiteLocation, StoreError, ValidationError};
use headcount_storage::SiteStore;
use thiserror::Error;

use crate::config::EditPolicy;
use crate::error::ApiError;
use crate::telemetry::METRICS;

/// Lifecycle of a single edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Unmodified,
    Validating,
    Committed,
    Rejected,
}

/// An edit that reached the store and was saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedEdit {
    pub id: SiteId,
    pub location: SiteLocation,
    pub counts: CountValues,
}

impl CommittedEdit {
    /// Confirmation shown after a successful save.
    pub fn message(&self) -> String {
        format!(
            "Successfully updated data for {}. New RSE: {}, DSE: {}, ITC: {}.",
            self.location.describe(),
            self.counts.rse_count,
            self.counts.dse_count,
            self.counts.itc_count
        )
    }
}

/// Why an edit was not saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditRejection {
    #[error(transparent)]
    InvalidInteger(ValidationError),

    #[error(transparent)]
    NegativeCount(ValidationError),

    #[error("Could not find record ID {id}")]
    RecordNotFound { id: SiteId },

    #[error(transparent)]
    Store(StoreError),
}

impl EditRejection {
    /// Short machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            EditRejection::InvalidInteger(_) => "invalid integer",
            EditRejection::NegativeCount(_) => "negative count",
            EditRejection::RecordNotFound { .. } => "record not found",
            EditRejection::Store(StoreError::ConnectionFailure { .. }) => "database unavailable",
            EditRejection::Store(_) => "database error",
        }
    }
}

impl From<EditRejection> for ApiError {
    fn from(rejection: EditRejection) -> Self {
        match rejection {
            EditRejection::InvalidInteger(e) | EditRejection::NegativeCount(e) => e.into(),
            EditRejection::RecordNotFound { id } => StoreError::NotFound { id }.into(),
            EditRejection::Store(e) => e.into(),
        }
    }
}

/// Terminal result of an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Committed(CommittedEdit),
    Rejected(EditRejection),
}

impl EditOutcome {
    pub fn state(&self) -> EditState {
        match self {
            EditOutcome::Committed(_) => EditState::Committed,
            EditOutcome::Rejected(_) => EditState::Rejected,
        }
    }

    pub fn into_result(self) -> Result<CommittedEdit, EditRejection> {
        match self {
            EditOutcome::Committed(edit) => Ok(edit),
            EditOutcome::Rejected(rejection) => Err(rejection),
        }
    }
}

/// Validate the entered counts against the policy without touching a store.
pub fn validate_counts(
    policy: EditPolicy,
    rse: &str,
    dse: &str,
    itc: &str,
) -> Result<CountValues, EditRejection> {
    let counts = CountValues::parse(rse, dse, itc).map_err(EditRejection::InvalidInteger)?;
    if policy.reject_negative {
        counts
            .ensure_non_negative()
            .map_err(EditRejection::NegativeCount)?;
    }
    Ok(counts)
}

/// Validate and save new counts for record `id`.
pub async fn edit_counts(
    store: &dyn SiteStore,
    policy: EditPolicy,
    id: SiteId,
    rse: &str,
    dse: &str,
    itc: &str,
) -> EditOutcome {
    tracing::debug!(id, state = ?EditState::Validating, "Editing site counts");

    let outcome = match run_edit(store, policy, id, rse, dse, itc).await {
        Ok(edit) => EditOutcome::Committed(edit),
        Err(rejection) => EditOutcome::Rejected(rejection),
    };

    match &outcome {
        EditOutcome::Committed(edit) => {
            tracing::info!(id, counts = ?edit.counts, "Count edit committed");
        }
        EditOutcome::Rejected(rejection) => {
            tracing::info!(id, reason = rejection.reason(), error = %rejection, "Count edit rejected");
        }
    }
    if let Ok(metrics) = METRICS.as_ref() {
        metrics.record_count_edit(outcome.state() == EditState::Committed);
    }

    outcome
}

async fn run_edit(
    store: &dyn SiteStore,
    policy: EditPolicy,
    id: SiteId,
    rse: &str,
    dse: &str,
    itc: &str,
) -> Result<CommittedEdit, EditRejection> {
    let counts = validate_counts(policy, rse, dse, itc)?;

    let location = store
        .find_by_id(id)
        .await
        .map_err(EditRejection::Store)?
        .ok_or(EditRejection::RecordNotFound { id })?;

    store
        .update_counts(id, counts)
        .await
        .map_err(|e| match e {
            // Deleted between lookup and update.
            StoreError::NotFound { id } => EditRejection::RecordNotFound { id },
            other => EditRejection::Store(other),
        })?;

    Ok(CommittedEdit {
        id,
        location,
        counts,
    })
}
