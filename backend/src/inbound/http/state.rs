//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DashboardQuery, FixtureDashboardQuery, FixtureLoanCommand, FixtureLoanQuery, LoanCommand,
    LoanQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub loans: Arc<dyn LoanCommand>,
    pub loans_query: Arc<dyn LoanQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use loan_desk::domain::ports::{FixtureDashboardQuery, FixtureLoanCommand, FixtureLoanQuery};
    /// use loan_desk::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoanCommand),
    ///     Arc::new(FixtureLoanQuery),
    ///     Arc::new(FixtureDashboardQuery),
    /// );
    /// let _loans = state.loans.clone();
    /// ```
    pub fn new(
        loans: Arc<dyn LoanCommand>,
        loans_query: Arc<dyn LoanQuery>,
        dashboard: Arc<dyn DashboardQuery>,
    ) -> Self {
        Self {
            loans,
            loans_query,
            dashboard,
        }
    }
}

impl Default for HttpState {
    /// State backed entirely by fixtures; handlers respond without storage.
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureLoanCommand),
            Arc::new(FixtureLoanQuery),
            Arc::new(FixtureDashboardQuery),
        )
    }
}
