//! Request and response bodies for the loan endpoints.

use pagination::PageMeta;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LoanApplicationDraft, LoanRecord, LoanStatus, NumericInput, StatusColor};

/// Body of `POST /api/loans`.
///
/// Numbers may arrive as JSON numbers or numeric strings.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    #[schema(example = "Ada Lovelace")]
    pub full_name: Option<String>,
    #[schema(value_type = Option<f64>, example = 1000)]
    pub loan_amount: Option<NumericInput>,
    #[schema(value_type = Option<u32>, example = 6)]
    pub loan_tenure: Option<NumericInput>,
    #[schema(example = "Employed")]
    pub employment_status: Option<String>,
    #[schema(example = "Repairs")]
    pub reason_for_loan: Option<String>,
    #[schema(example = "1 Main St")]
    pub employer_address: Option<String>,
}

impl From<CreateLoanRequest> for LoanApplicationDraft {
    fn from(value: CreateLoanRequest) -> Self {
        Self {
            full_name: value.full_name,
            loan_amount: value.loan_amount,
            loan_tenure: value.loan_tenure,
            employment_status: value.employment_status,
            reason_for_loan: value.reason_for_loan,
            employer_address: value.employer_address,
        }
    }
}

/// Body of `PATCH /api/loans/{id}/status`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Requested status; matched case-insensitively.
    #[schema(example = "approved")]
    pub status: Option<String>,
}

/// Raw pagination query parameters; parsed by the handler so bad values get
/// field-level errors.
#[derive(Debug, Default, Deserialize)]
pub struct ListLoansQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Client-facing projection of a loan record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanView {
    #[schema(format = "uuid")]
    pub id: String,
    pub full_name: String,
    pub amount: f64,
    pub tenure: u32,
    pub employment_status: String,
    pub reason_for_loan: String,
    pub employer_address: String,
    /// Application date in long form, e.g. `October 19, 2026`.
    #[schema(example = "October 19, 2026")]
    pub date: String,
    pub status: LoanStatus,
    pub status_color: StatusColor,
    pub officer: String,
}

impl From<&LoanRecord> for LoanView {
    fn from(record: &LoanRecord) -> Self {
        let application = record.application();
        Self {
            id: record.id().to_string(),
            full_name: application.full_name().to_string(),
            amount: application.loan_amount().value(),
            tenure: application.loan_tenure().months(),
            employment_status: application.employment_status().to_string(),
            reason_for_loan: application.reason_for_loan().to_string(),
            employer_address: application.employer_address().to_string(),
            date: record.date_label(),
            status: record.status(),
            status_color: record.status_color(),
            officer: record.officer().to_owned(),
        }
    }
}

/// Single-loan envelope. `success` is always `true`; failures use the error
/// body instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoanResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: LoanView,
}

impl From<&LoanRecord> for LoanResponse {
    fn from(record: &LoanRecord) -> Self {
        Self {
            success: true,
            data: LoanView::from(record),
        }
    }
}

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationBody {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl From<PageMeta> for PaginationBody {
    fn from(meta: PageMeta) -> Self {
        Self {
            page: meta.page,
            limit: meta.limit,
            total: meta.total,
            pages: meta.pages,
        }
    }
}

/// List envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoanListResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<LoanView>,
    pub pagination: PaginationBody,
}

impl LoanListResponse {
    /// Successful page of loans.
    #[must_use]
    pub fn new(records: &[LoanRecord], meta: PageMeta) -> Self {
        Self {
            success: true,
            data: records.iter().map(LoanView::from).collect(),
            pagination: meta.into(),
        }
    }
}
