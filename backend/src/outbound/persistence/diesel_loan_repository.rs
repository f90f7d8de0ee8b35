//! PostgreSQL-backed `LoanRepository` implementation using Diesel ORM.
//!
//! Rows are re-validated through the domain constructors on the way out, so a
//! corrupt row surfaces as a query error rather than an invalid record.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use tracing::warn;

use crate::domain::ports::{LoanRepository, LoanRepositoryError};
use crate::domain::{
    LoanApplicationDraft, LoanId, LoanRecord, LoanStatus, NewLoan, NumericInput,
    StatusAssignment, StatusColor,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{LoanRow, LoanStatusUpdate, NewLoanRow};
use super::pool::{DbPool, PoolError};
use super::schema::loans;

/// Diesel-backed implementation of the loan repository port.
#[derive(Clone)]
pub struct DieselLoanRepository {
    pool: DbPool,
}

impl DieselLoanRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LoanRepositoryError {
    map_basic_pool_error(error, LoanRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LoanRepositoryError {
    map_basic_diesel_error(
        error,
        LoanRepositoryError::query,
        LoanRepositoryError::connection,
    )
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn tenure_for_db(months: u32) -> Result<i32, LoanRepositoryError> {
    i32::try_from(months)
        .map_err(|_| LoanRepositoryError::query(format!("tenure {months} exceeds column range")))
}

/// Convert a database row into a validated domain record.
fn row_to_record(row: LoanRow) -> Result<LoanRecord, LoanRepositoryError> {
    let LoanRow {
        id,
        full_name,
        loan_amount,
        loan_tenure,
        employment_status,
        reason_for_loan,
        employer_address,
        date_applied,
        status,
        status_color,
        officer,
    } = row;

    let application = LoanApplicationDraft {
        full_name: Some(full_name),
        loan_amount: Some(NumericInput::Number(loan_amount)),
        loan_tenure: Some(NumericInput::Number(f64::from(loan_tenure))),
        employment_status: Some(employment_status),
        reason_for_loan: Some(reason_for_loan),
        employer_address: Some(employer_address),
    }
    .validate()
    .map_err(|err| LoanRepositoryError::query(format!("stored loan {id} is invalid: {err}")))?;

    let status = LoanStatus::normalize(&status)
        .map_err(|err| LoanRepositoryError::query(format!("stored loan {id}: {err}")))?;
    if StatusColor::from_token(&status_color) != Some(status.color()) {
        warn!(
            loan_id = %id,
            status = %status,
            stored_color = %status_color,
            "stored status colour disagrees with status; re-deriving"
        );
    }

    Ok(LoanRecord::restore(
        LoanId::from_uuid(id),
        application,
        date_applied,
        status,
        &officer,
    ))
}

fn rows_to_records(rows: Vec<LoanRow>) -> Result<Vec<LoanRecord>, LoanRepositoryError> {
    rows.into_iter().map(row_to_record).collect()
}

#[async_trait]
impl LoanRepository for DieselLoanRepository {
    async fn insert(&self, loan: &NewLoan) -> Result<LoanRecord, LoanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let application = &loan.application;

        let new_row = NewLoanRow {
            full_name: application.full_name().as_ref(),
            loan_amount: application.loan_amount().value(),
            loan_tenure: tenure_for_db(application.loan_tenure().months())?,
            employment_status: application.employment_status().as_ref(),
            reason_for_loan: application.reason_for_loan().as_ref(),
            employer_address: application.employer_address().as_ref(),
            date_applied: loan.date_applied,
            status: loan.assignment.status().as_str(),
            status_color: loan.assignment.color().as_str(),
            officer: &loan.officer,
        };

        let row: LoanRow = diesel::insert_into(loans::table)
            .values(&new_row)
            .returning(LoanRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_record(row)
    }

    async fn find_by_id(&self, id: &LoanId) -> Result<Option<LoanRecord>, LoanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<LoanRow> = loans::table
            .find(*id.as_uuid())
            .select(LoanRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn update_status(
        &self,
        id: &LoanId,
        assignment: StatusAssignment,
    ) -> Result<Option<LoanRecord>, LoanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = LoanStatusUpdate {
            status: assignment.status().as_str(),
            status_color: assignment.color().as_str(),
        };
        let row: Option<LoanRow> = diesel::update(loans::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(LoanRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<LoanRecord>, LoanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<LoanRow> = loans::table
            .order((loans::date_applied.desc(), loans::id.desc()))
            .limit(to_i64(page.limit()))
            .offset(to_i64(page.offset()))
            .select(LoanRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_records(rows)
    }

    async fn count(&self) -> Result<u64, LoanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = loans::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(total)
            .map_err(|_| LoanRepositoryError::query(format!("negative row count {total}")))
    }

    async fn list_all(&self) -> Result<Vec<LoanRecord>, LoanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<LoanRow> = loans::table
            .order((loans::date_applied.desc(), loans::id.desc()))
            .select(LoanRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_records(rows)
    }
}
