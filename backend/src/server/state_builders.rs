//! Builders for the HTTP state from the configured loan store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use loan_desk::domain::ports::LoanRepository;
use loan_desk::domain::{DashboardService, LoanService};
use loan_desk::inbound::http::state::HttpState;
use loan_desk::outbound::memory::InMemoryLoanRepository;
use loan_desk::outbound::persistence::DieselLoanRepository;

use super::ServerConfig;

/// Wire both services over one shared repository.
fn state_over<R>(repo: Arc<R>, clock: Arc<dyn Clock>, cash_received_offset: f64) -> HttpState
where
    R: LoanRepository + 'static,
{
    let loans = Arc::new(LoanService::new(Arc::clone(&repo), clock));
    let dashboard = Arc::new(DashboardService::new(repo, cash_received_offset));
    HttpState::new(loans.clone(), loans, dashboard)
}

/// Use the pool-backed repository when a pool exists, otherwise a volatile
/// in-memory store.
fn build_state_with_pool<Pool, R, MakeRepo>(
    pool: &Option<Pool>,
    make_repo: MakeRepo,
    clock: Arc<dyn Clock>,
    cash_received_offset: f64,
) -> HttpState
where
    R: LoanRepository + 'static,
    MakeRepo: FnOnce(&Pool) -> R,
{
    match pool {
        Some(pool) => {
            info!("loan store: postgres");
            state_over(Arc::new(make_repo(pool)), clock, cash_received_offset)
        }
        None => {
            warn!("no database configured; loans are kept in memory and lost on restart");
            state_over(
                Arc::new(InMemoryLoanRepository::default()),
                clock,
                cash_received_offset,
            )
        }
    }
}

/// Build the shared HTTP state for the configured loan store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(build_state_with_pool(
        &config.db_pool,
        |pool| DieselLoanRepository::new(pool.clone()),
        Arc::new(DefaultClock),
        config.cash_received_offset,
    ))
}
