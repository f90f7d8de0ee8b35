//! Dashboard aggregation over the loan collection.
//!
//! [`DashboardStats::compute`] is a pure function of the records it is given;
//! [`DashboardService`] feeds it the current collection on every call. The
//! `cash_received`, `savings` and `other_accounts` figures are placeholder
//! arithmetic for the dashboard tiles. They are not derived from any ledger.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::loan_service::map_loan_repository_error;
use crate::domain::ports::{DashboardQuery, LoanRepository};
use crate::domain::{Error, LoanId, LoanRecord, LoanStatus};

/// Number of records shown in [`DashboardStats::recent_loans`].
pub const RECENT_LOANS_LIMIT: usize = 10;
/// Share of the approved principal counted as received cash (placeholder).
const CASH_RECEIVED_RATIO: f64 = 0.6;
/// Tenures up to this many months count as rapid loans.
const RAPID_TENURE_MONTHS: u32 = 3;

/// Display-friendly projection of a recent application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentLoan {
    /// Loan identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: LoanId,
    /// Applicant's full name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Principal formatted as US dollars.
    #[schema(example = "$1,000")]
    pub amount: String,
    /// Title-cased status.
    #[schema(example = "Pending")]
    pub status: String,
    /// Application date in long form.
    #[schema(example = "October 19, 2026")]
    pub date: String,
}

impl From<&LoanRecord> for RecentLoan {
    fn from(record: &LoanRecord) -> Self {
        Self {
            id: record.id(),
            name: record.application().full_name().to_string(),
            amount: format_usd(record.application().loan_amount().value()),
            status: record.status().display_label().to_owned(),
            date: record.date_label(),
        }
    }
}

/// Summary statistics for the back-office dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of stored applications.
    pub total_loans: u64,
    /// Distinct applicant names.
    pub active_users: u64,
    /// Distinct applicant names; identical to `active_users`.
    pub borrowers: u64,
    /// Principal of disbursed loans.
    pub cash_disbursed: f64,
    /// Placeholder: 60% of approved principal, rounded, plus a fixed offset.
    pub cash_received: f64,
    /// Placeholder: `cash_received - cash_disbursed`. May be negative.
    pub savings: f64,
    /// Applications with a tenure of three months or less.
    pub rapid_loans: u64,
    /// Placeholder: 20% of `borrowers`, rounded.
    pub other_accounts: u64,
    /// The most recent applications, newest first.
    pub recent_loans: Vec<RecentLoan>,
}

impl DashboardStats {
    /// Summarise `records`.
    ///
    /// `cash_received_offset` is the constant added to the received-cash
    /// placeholder.
    ///
    /// # Examples
    /// ```
    /// use loan_desk::domain::DashboardStats;
    ///
    /// let stats = DashboardStats::compute(&[], 500_000.0);
    /// assert_eq!(stats.total_loans, 0);
    /// assert_eq!(stats.cash_received, 500_000.0);
    /// assert_eq!(stats.savings, 500_000.0);
    /// ```
    #[must_use]
    pub fn compute(records: &[LoanRecord], cash_received_offset: f64) -> Self {
        let borrowers = count_u64(
            records
                .iter()
                .map(|r| r.application().full_name().as_ref())
                .collect::<HashSet<_>>()
                .len(),
        );
        let principal_with = |status: LoanStatus| -> f64 {
            records
                .iter()
                .filter(|r| r.status() == status)
                .map(|r| r.application().loan_amount().value())
                .sum()
        };

        let cash_disbursed = principal_with(LoanStatus::Disbursed);
        let approved = principal_with(LoanStatus::Approved);
        let cash_received = (approved * CASH_RECEIVED_RATIO).round() + cash_received_offset;

        Self {
            total_loans: count_u64(records.len()),
            active_users: borrowers,
            borrowers,
            cash_disbursed,
            cash_received,
            savings: cash_received - cash_disbursed,
            rapid_loans: count_u64(
                records
                    .iter()
                    .filter(|r| r.application().loan_tenure().months() <= RAPID_TENURE_MONTHS)
                    .count(),
            ),
            // round(0.2 * n) for whole n never lands on a half.
            other_accounts: borrowers.saturating_add(2) / 5,
            recent_loans: recent_loans(records),
        }
    }
}

fn count_u64(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

fn recent_loans(records: &[LoanRecord]) -> Vec<RecentLoan> {
    let mut newest: Vec<&LoanRecord> = records.iter().collect();
    newest.sort_by(|a, b| {
        b.date_applied()
            .cmp(&a.date_applied())
            .then_with(|| b.id().cmp(&a.id()))
    });
    newest
        .into_iter()
        .take(RECENT_LOANS_LIMIT)
        .map(RecentLoan::from)
        .collect()
}

/// Format `amount` as US dollars with thousands separators and at most three
/// fraction digits, trailing zeros dropped: `1234.5` becomes `$1,234.5`.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.3}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    let sign = if amount.is_sign_negative() && amount != 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction}")
    }
}

/// Dashboard service backing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService<R> {
    loan_repo: Arc<R>,
    cash_received_offset: f64,
}

impl<R> DashboardService<R> {
    /// Create a new service reading from `loan_repo`.
    pub fn new(loan_repo: Arc<R>, cash_received_offset: f64) -> Self {
        Self {
            loan_repo,
            cash_received_offset,
        }
    }
}

#[async_trait]
impl<R> DashboardQuery for DashboardService<R>
where
    R: LoanRepository,
{
    async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        let records = self
            .loan_repo
            .list_all()
            .await
            .map_err(map_loan_repository_error)?;
        Ok(DashboardStats::compute(&records, self.cash_received_offset))
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
