//! Driving port for loan mutations.
//!
//! Inbound adapters submit new applications and status changes through
//! [`LoanCommand`] without importing persistence concerns.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, LoanApplicationDraft, LoanId, LoanRecord, NewLoan};

/// Domain use-case port for the two mutating loan operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanCommand: Send + Sync {
    /// Validate and store a new application.
    ///
    /// # Errors
    ///
    /// - `invalid_request` when a field fails validation.
    /// - `service_unavailable` or `internal_error` when storage fails.
    async fn create_loan(&self, draft: LoanApplicationDraft) -> Result<LoanRecord, Error>;

    /// Change the status of the loan identified by `id`.
    ///
    /// `id` is the raw path segment; malformed ids are treated as absent.
    ///
    /// # Errors
    ///
    /// - `invalid_status` when `status` is not canonical. Storage is not
    ///   touched in that case.
    /// - `not_found` when `id` is malformed or unknown.
    /// - `service_unavailable` or `internal_error` when storage fails.
    async fn update_status(&self, id: &str, status: &str) -> Result<LoanRecord, Error>;
}

/// Fixture command that validates input but stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoanCommand;

#[async_trait]
impl LoanCommand for FixtureLoanCommand {
    async fn create_loan(&self, draft: LoanApplicationDraft) -> Result<LoanRecord, Error> {
        let application = draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(NewLoan::pending(application, Utc::now()).into_record(LoanId::random()))
    }

    async fn update_status(&self, _id: &str, _status: &str) -> Result<LoanRecord, Error> {
        Err(Error::not_found("loan not found"))
    }
}
