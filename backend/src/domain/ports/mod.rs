//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoanCommand`, `LoanQuery`, `DashboardQuery`) are consumed
//! by inbound adapters. The driven port (`LoanRepository`) is implemented by
//! the storage adapters under `outbound`.

mod macros;
pub(crate) use macros::define_port_error;

mod dashboard_query;
mod loan_command;
mod loan_query;
mod loan_repository;

#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{DashboardQuery, FixtureDashboardQuery};
#[cfg(test)]
pub use loan_command::MockLoanCommand;
pub use loan_command::{FixtureLoanCommand, LoanCommand};
#[cfg(test)]
pub use loan_query::MockLoanQuery;
pub use loan_query::{FixtureLoanQuery, LoanQuery};
#[cfg(test)]
pub use loan_repository::MockLoanRepository;
pub use loan_repository::{FixtureLoanRepository, LoanRepository, LoanRepositoryError};
