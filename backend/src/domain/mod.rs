//! Domain primitives, services and ports for loan applications.
//!
//! Purpose: hold the loan lifecycle rules independent of HTTP and storage.
//! Inbound adapters talk to the services through the driving ports in
//! [`ports`]; storage adapters implement [`ports::LoanRepository`].
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `LoanRecord` and its validated parts (`loan`).
//! - `LoanStatus` / `StatusColor` / `StatusAssignment`: the status engine.
//! - `LoanService`: create, list, get and update-status use cases.
//! - `DashboardService` / `DashboardStats`: dashboard aggregation.
//! - `TraceId`: request correlation identifier.

pub mod dashboard;
pub mod error;
pub mod loan;
pub mod loan_service;
pub mod loan_status;
pub mod ports;
pub mod trace_id;

pub use self::dashboard::{DashboardService, DashboardStats, RecentLoan, format_usd};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::loan::{
    DEFAULT_OFFICER, LoanAmount, LoanApplication, LoanApplicationDraft, LoanField, LoanId,
    LoanIdError, LoanRecord, LoanTenure, LoanValidationError, MAX_TENURE_MONTHS, NewLoan,
    NumericInput, RequiredText, format_long_date,
};
pub use self::loan_service::LoanService;
pub use self::loan_status::{
    InvalidStatusError, LoanStatus, StatusAssignment, StatusColor, derive_color,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
