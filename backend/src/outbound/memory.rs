//! In-process `LoanRepository` used when no database is configured.
//!
//! Records live in a `RwLock<Vec<_>>` for the lifetime of the process and are
//! lost on restart. Ordering matches the PostgreSQL adapter: newest
//! application first, ties broken by id descending.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{LoanRepository, LoanRepositoryError};
use crate::domain::{LoanId, LoanRecord, NewLoan, StatusAssignment};

/// Volatile loan store.
///
/// ```
/// use loan_desk::outbound::memory::InMemoryLoanRepository;
///
/// let repo = InMemoryLoanRepository::default();
/// repo.set_unavailable(true);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLoanRepository {
    records: RwLock<Vec<LoanRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryLoanRepository {
    /// Simulate an unreachable store: while set, every call fails with a
    /// connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), LoanRepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LoanRepositoryError::connection("in-memory store marked unavailable"));
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<LoanRecord>>, LoanRepositoryError> {
        self.ensure_available()?;
        self.records
            .read()
            .map_err(|_| LoanRepositoryError::query("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<LoanRecord>>, LoanRepositoryError> {
        self.ensure_available()?;
        self.records
            .write()
            .map_err(|_| LoanRepositoryError::query("in-memory store lock poisoned"))
    }

    fn newest_first(records: &[LoanRecord]) -> Vec<LoanRecord> {
        let mut sorted = records.to_vec();
        sorted.sort_by(|a, b| {
            b.date_applied()
                .cmp(&a.date_applied())
                .then_with(|| b.id().cmp(&a.id()))
        });
        sorted
    }
}

#[async_trait]
impl LoanRepository for InMemoryLoanRepository {
    async fn insert(&self, loan: &NewLoan) -> Result<LoanRecord, LoanRepositoryError> {
        let record = loan.clone().into_record(LoanId::random());
        self.write()?.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &LoanId) -> Result<Option<LoanRecord>, LoanRepositoryError> {
        Ok(self.read()?.iter().find(|r| r.id() == *id).cloned())
    }

    async fn update_status(
        &self,
        id: &LoanId,
        assignment: StatusAssignment,
    ) -> Result<Option<LoanRecord>, LoanRepositoryError> {
        let mut records = self.write()?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == *id) else {
            return Ok(None);
        };
        *slot = slot.with_assignment(assignment);
        Ok(Some(slot.clone()))
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<LoanRecord>, LoanRepositoryError> {
        let sorted = Self::newest_first(&self.read()?);
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(sorted.into_iter().skip(skip).take(take).collect())
    }

    async fn count(&self) -> Result<u64, LoanRepositoryError> {
        let len = self.read()?.len();
        u64::try_from(len).map_err(|_| LoanRepositoryError::query("record count overflow"))
    }

    async fn list_all(&self) -> Result<Vec<LoanRecord>, LoanRepositoryError> {
        Ok(Self::newest_first(&self.read()?))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use crate::domain::{LoanApplicationDraft, LoanStatus, NumericInput, StatusColor};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn new_loan(name: &str, day: i64) -> NewLoan {
        let application = LoanApplicationDraft {
            full_name: Some(name.into()),
            loan_amount: Some(NumericInput::Number(1000.0)),
            loan_tenure: Some(NumericInput::Number(6.0)),
            employment_status: Some("Employed".into()),
            reason_for_loan: Some("Repairs".into()),
            employer_address: Some("1 Main St".into()),
        }
        .validate()
        .expect("valid draft");
        NewLoan::pending(application, base_time() + Duration::days(day))
    }

    #[fixture]
    fn repo() -> InMemoryLoanRepository {
        InMemoryLoanRepository::default()
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_records_can_be_found(repo: InMemoryLoanRepository) {
        let record = repo.insert(&new_loan("Ada", 0)).await.expect("insert");

        let found = repo.find_by_id(&record.id()).await.expect("lookup");

        assert_eq!(found, Some(record));
    }

    #[rstest]
    #[tokio::test]
    async fn update_changes_only_the_status_pair(repo: InMemoryLoanRepository) {
        let record = repo.insert(&new_loan("Ada", 0)).await.expect("insert");

        let updated = repo
            .update_status(
                &record.id(),
                StatusAssignment::for_status(LoanStatus::Rejected),
            )
            .await
            .expect("update")
            .expect("record exists");

        assert_eq!(updated.status_color(), StatusColor::Rejected);
        assert_eq!(updated.application(), record.application());
        assert_eq!(updated.date_applied(), record.date_applied());
        let stored = repo
            .find_by_id(&record.id())
            .await
            .expect("lookup")
            .expect("record exists");
        assert_eq!(stored, updated);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_id_returns_none(repo: InMemoryLoanRepository) {
        let result = repo
            .update_status(&LoanId::random(), StatusAssignment::initial())
            .await
            .expect("update");
        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn pages_are_newest_first(repo: InMemoryLoanRepository) {
        for day in 0..25 {
            repo.insert(&new_loan(&format!("Applicant {day}"), day))
                .await
                .expect("insert");
        }

        let first = repo
            .list_page(PageRequest::new(1, 10).expect("valid page"))
            .await
            .expect("list");
        let third = repo
            .list_page(PageRequest::new(3, 10).expect("valid page"))
            .await
            .expect("list");
        let beyond = repo
            .list_page(PageRequest::new(4, 10).expect("valid page"))
            .await
            .expect("list");

        assert_eq!(first.len(), 10);
        assert!(
            first
                .windows(2)
                .all(|pair| matches!(pair, [a, b] if a.date_applied() >= b.date_applied()))
        );
        assert_eq!(
            first.first().map(|r| r.application().full_name().to_string()),
            Some("Applicant 24".to_owned())
        );
        assert_eq!(third.len(), 5);
        assert!(beyond.is_empty());
        assert_eq!(repo.count().await.expect("count"), 25);
    }

    #[rstest]
    #[tokio::test]
    async fn unavailable_store_reports_connection_errors(repo: InMemoryLoanRepository) {
        repo.set_unavailable(true);

        let err = repo.list_all().await.expect_err("store unavailable");
        assert!(matches!(err, LoanRepositoryError::Connection { .. }));

        repo.set_unavailable(false);
        assert!(repo.list_all().await.expect("store back").is_empty());
    }
}
