//! Driving port for loan lookups.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, LoanRecord};

/// Domain use-case port for reading loans.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanQuery: Send + Sync {
    /// One page of loans, newest application first, with the unfiltered total.
    async fn list_loans(&self, page: PageRequest) -> Result<Page<LoanRecord>, Error>;

    /// A single loan by its raw id.
    ///
    /// Malformed and unknown ids both yield `not_found`.
    async fn get_loan(&self, id: &str) -> Result<LoanRecord, Error>;
}

/// Fixture query over an empty collection.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoanQuery;

#[async_trait]
impl LoanQuery for FixtureLoanQuery {
    async fn list_loans(&self, page: PageRequest) -> Result<Page<LoanRecord>, Error> {
        Ok(Page::new(Vec::new(), page, 0))
    }

    async fn get_loan(&self, _id: &str) -> Result<LoanRecord, Error> {
        Err(Error::not_found("loan not found"))
    }
}
