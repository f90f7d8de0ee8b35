//! Loan domain service implementing the command and query driving ports.
//!
//! Validation and status normalisation happen here, before the repository is
//! called. Both mutating operations write a single record.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{LoanCommand, LoanQuery, LoanRepository, LoanRepositoryError};
use crate::domain::{
    Error, InvalidStatusError, LoanApplicationDraft, LoanId, LoanRecord, LoanStatus,
    LoanValidationError, NewLoan, StatusAssignment,
};

const LOAN_NOT_FOUND: &str = "loan not found";

/// Map driven-port failures onto domain errors.
pub(crate) fn map_loan_repository_error(error: LoanRepositoryError) -> Error {
    match error {
        LoanRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("loan repository unavailable: {message}"))
        }
        LoanRepositoryError::Query { message } => {
            Error::internal(format!("loan repository error: {message}"))
        }
    }
}

fn validation_error(error: LoanValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field().as_str(),
        "code": error.code(),
    }))
}

fn invalid_status_error(error: &InvalidStatusError) -> Error {
    let allowed: Vec<&str> = LoanStatus::ALL.iter().map(|s| s.as_str()).collect();
    Error::invalid_status(format!(
        "status must be one of {}",
        allowed.join(", ")
    ))
    .with_details(json!({
        "field": "status",
        "value": error.value(),
        "allowed": allowed,
    }))
}

/// Loan service backing [`LoanCommand`] and [`LoanQuery`].
#[derive(Clone)]
pub struct LoanService<R> {
    loan_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> LoanService<R> {
    /// Create a new service over `loan_repo`, stamping new applications with
    /// `clock`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use loan_desk::domain::LoanService;
    /// # use loan_desk::domain::ports::FixtureLoanRepository;
    /// # use mockable::DefaultClock;
    /// let service = LoanService::new(Arc::new(FixtureLoanRepository), Arc::new(DefaultClock));
    /// # let _ = service;
    /// ```
    pub fn new(loan_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { loan_repo, clock }
    }
}

impl<R> LoanService<R>
where
    R: LoanRepository,
{
    fn parse_id(raw: &str) -> Result<LoanId, Error> {
        raw.parse::<LoanId>().map_err(|_| {
            debug!(loan_id = raw, reason = "malformed_id", "loan lookup missed");
            Error::not_found(LOAN_NOT_FOUND)
        })
    }

    fn absent(id: &LoanId) -> Error {
        debug!(loan_id = %id, reason = "absent", "loan lookup missed");
        Error::not_found(LOAN_NOT_FOUND)
    }
}

#[async_trait]
impl<R> LoanCommand for LoanService<R>
where
    R: LoanRepository,
{
    async fn create_loan(&self, draft: LoanApplicationDraft) -> Result<LoanRecord, Error> {
        let application = draft.validate().map_err(validation_error)?;
        let new_loan = NewLoan::pending(application, self.clock.utc());

        let record = self
            .loan_repo
            .insert(&new_loan)
            .await
            .map_err(map_loan_repository_error)?;

        info!(
            loan_id = %record.id(),
            status = %record.status(),
            "loan application created"
        );
        Ok(record)
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<LoanRecord, Error> {
        let assignment =
            StatusAssignment::parse(status).map_err(|err| invalid_status_error(&err))?;
        let loan_id = Self::parse_id(id)?;

        let record = self
            .loan_repo
            .update_status(&loan_id, assignment)
            .await
            .map_err(map_loan_repository_error)?
            .ok_or_else(|| Self::absent(&loan_id))?;

        info!(
            loan_id = %record.id(),
            status = %record.status(),
            status_color = %record.status_color(),
            "loan status updated"
        );
        Ok(record)
    }
}

#[async_trait]
impl<R> LoanQuery for LoanService<R>
where
    R: LoanRepository,
{
    async fn list_loans(&self, page: PageRequest) -> Result<Page<LoanRecord>, Error> {
        let items = self
            .loan_repo
            .list_page(page)
            .await
            .map_err(map_loan_repository_error)?;
        let total = self
            .loan_repo
            .count()
            .await
            .map_err(map_loan_repository_error)?;
        Ok(Page::new(items, page, total))
    }

    async fn get_loan(&self, id: &str) -> Result<LoanRecord, Error> {
        let loan_id = Self::parse_id(id)?;
        self.loan_repo
            .find_by_id(&loan_id)
            .await
            .map_err(map_loan_repository_error)?
            .ok_or_else(|| Self::absent(&loan_id))
    }
}

#[cfg(test)]
#[path = "loan_service_tests.rs"]
mod tests;
