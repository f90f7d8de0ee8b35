//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod loans;
pub mod loans_dto;
pub mod state;
pub mod stats;
pub mod validation;

pub use error::ApiResult;
