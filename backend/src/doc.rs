//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP path from the inbound layer together with
//! the schemas they reference. The document backs Swagger UI in debug builds
//! and is exported by `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{DashboardStats, Error, ErrorCode, LoanStatus, RecentLoan, StatusColor};
use crate::inbound::http::loans_dto::{
    CreateLoanRequest, LoanListResponse, LoanResponse, LoanView, PaginationBody,
    UpdateStatusRequest,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Loan desk API",
        description = "Back-office interface for loan applications, their status and dashboard figures."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::loans::create_loan,
        crate::inbound::http::loans::list_loans,
        crate::inbound::http::loans::get_loan,
        crate::inbound::http::loans::update_loan_status,
        crate::inbound::http::stats::dashboard_stats,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoanStatus,
        StatusColor,
        CreateLoanRequest,
        UpdateStatusRequest,
        LoanView,
        LoanResponse,
        LoanListResponse,
        PaginationBody,
        DashboardStats,
        RecentLoan,
    )),
    tags(
        (name = "loans", description = "Loan application lifecycle"),
        (name = "stats", description = "Dashboard aggregates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
