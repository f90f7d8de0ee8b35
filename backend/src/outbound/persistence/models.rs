//! Internal Diesel row structs for the `loans` table.
//!
//! These types never leave the persistence layer; the repository converts
//! them to and from domain records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::loans;

/// Row struct for reading from the loans table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = loans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LoanRow {
    pub id: Uuid,
    pub full_name: String,
    pub loan_amount: f64,
    pub loan_tenure: i32,
    pub employment_status: String,
    pub reason_for_loan: String,
    pub employer_address: String,
    pub date_applied: DateTime<Utc>,
    pub status: String,
    pub status_color: String,
    pub officer: String,
}

/// Insertable struct for new loan records. The id is left to the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = loans)]
pub(crate) struct NewLoanRow<'a> {
    pub full_name: &'a str,
    pub loan_amount: f64,
    pub loan_tenure: i32,
    pub employment_status: &'a str,
    pub reason_for_loan: &'a str,
    pub employer_address: &'a str,
    pub date_applied: DateTime<Utc>,
    pub status: &'a str,
    pub status_color: &'a str,
    pub officer: &'a str,
}

/// Changeset touching only the status pair.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = loans)]
pub(crate) struct LoanStatusUpdate<'a> {
    pub status: &'a str,
    pub status_color: &'a str,
}
