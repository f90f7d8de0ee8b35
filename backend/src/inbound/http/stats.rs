//! Dashboard statistics handler.
//!
//! ```text
//! GET /api/stats/dashboard
//! ```

use actix_web::{get, web};

use crate::domain::{DashboardStats, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Summary figures computed over every stored loan.
///
/// `cashReceived`, `savings` and `otherAccounts` are placeholder figures,
/// not ledger values.
#[utoipa::path(
    get,
    path = "/api/stats/dashboard",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["stats"],
    operation_id = "dashboardStats"
)]
#[get("/stats/dashboard")]
pub async fn dashboard_stats(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DashboardStats>> {
    let stats = state.dashboard.dashboard_stats().await?;
    Ok(web::Json(stats))
}
