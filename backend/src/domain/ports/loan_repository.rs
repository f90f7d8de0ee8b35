//! Port for loan record persistence.
//!
//! The [`LoanRepository`] trait is the only write path to stored loans. Status
//! and colour are always written together through a [`StatusAssignment`], and
//! every listing is ordered newest application first.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{LoanId, LoanRecord, NewLoan, StatusAssignment};

use super::define_port_error;

define_port_error! {
    /// Errors raised by loan repository adapters.
    pub enum LoanRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "loan repository connection failed: {message}",
        /// Query or mutation failed during execution, or a stored row is
        /// invalid.
        Query { message: String } =>
            "loan repository query failed: {message}",
    }
}

/// Port for loan storage and retrieval.
///
/// # Ordering
///
/// [`LoanRepository::list_page`] and [`LoanRepository::list_all`] return
/// records by `date_applied` descending, ties broken by id descending, so
/// pages are stable across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// Store a new application and return it with its assigned id.
    async fn insert(&self, loan: &NewLoan) -> Result<LoanRecord, LoanRepositoryError>;

    /// Fetch a single record.
    ///
    /// Returns `None` when no record has this id.
    async fn find_by_id(&self, id: &LoanId) -> Result<Option<LoanRecord>, LoanRepositoryError>;

    /// Overwrite status and colour of one record in a single write.
    ///
    /// Returns the updated record, or `None` when no record has this id. No
    /// other field is touched.
    async fn update_status(
        &self,
        id: &LoanId,
        assignment: StatusAssignment,
    ) -> Result<Option<LoanRecord>, LoanRepositoryError>;

    /// Fetch one page of records, newest first.
    ///
    /// Pages past the end of the collection are empty.
    async fn list_page(&self, page: PageRequest) -> Result<Vec<LoanRecord>, LoanRepositoryError>;

    /// Total number of stored records.
    async fn count(&self) -> Result<u64, LoanRepositoryError>;

    /// Every stored record, newest first.
    async fn list_all(&self) -> Result<Vec<LoanRecord>, LoanRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Inserts echo the loan back with a fresh id and nothing is retained, so
/// lookups miss and listings are empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoanRepository;

#[async_trait]
impl LoanRepository for FixtureLoanRepository {
    async fn insert(&self, loan: &NewLoan) -> Result<LoanRecord, LoanRepositoryError> {
        Ok(loan.clone().into_record(LoanId::random()))
    }

    async fn find_by_id(&self, _id: &LoanId) -> Result<Option<LoanRecord>, LoanRepositoryError> {
        Ok(None)
    }

    async fn update_status(
        &self,
        _id: &LoanId,
        _assignment: StatusAssignment,
    ) -> Result<Option<LoanRecord>, LoanRepositoryError> {
        Ok(None)
    }

    async fn list_page(&self, _page: PageRequest) -> Result<Vec<LoanRecord>, LoanRepositoryError> {
        Ok(Vec::new())
    }

    async fn count(&self) -> Result<u64, LoanRepositoryError> {
        Ok(0)
    }

    async fn list_all(&self) -> Result<Vec<LoanRecord>, LoanRepositoryError> {
        Ok(Vec::new())
    }
}
