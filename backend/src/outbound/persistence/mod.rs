//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! records; no loan rules live here. Row structs (`models`) and table
//! definitions (`schema`) stay private to this module. Connections come from a
//! `bb8` pool driven by `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use loan_desk::outbound::persistence::{DbPool, DieselLoanRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/loans")).await?;
//! let repo = DieselLoanRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_loan_repository;
mod models;
mod pool;
mod schema;

pub use diesel_loan_repository::DieselLoanRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
