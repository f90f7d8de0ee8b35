//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed `LoanRepository` using Diesel ORM.
//! - **memory**: volatile `LoanRepository` for running without a database.
//!
//! Adapters translate between domain types and storage representations and
//! contain no loan rules.

pub mod memory;
pub mod persistence;
