//! Loan application HTTP handlers.
//!
//! ```text
//! POST  /api/loans
//! GET   /api/loans?page=1&limit=10
//! GET   /api/loans/{id}
//! PATCH /api/loans/{id}/status {"status":"approved"}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::loans_dto::{
    CreateLoanRequest, ListLoansQuery, LoanListResponse, LoanResponse, UpdateStatusRequest,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_page_request};

/// Submit a loan application. The new record always starts out `PENDING`.
#[utoipa::path(
    post,
    path = "/api/loans",
    request_body = CreateLoanRequest,
    responses(
        (status = 201, description = "Application stored", body = LoanResponse),
        (status = 400, description = "Invalid application", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["loans"],
    operation_id = "createLoan"
)]
#[post("/loans")]
pub async fn create_loan(
    state: web::Data<HttpState>,
    payload: web::Json<CreateLoanRequest>,
) -> ApiResult<HttpResponse> {
    let record = state.loans.create_loan(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(LoanResponse::from(&record)))
}

/// List loan applications, newest first.
#[utoipa::path(
    get,
    path = "/api/loans",
    params(
        ("page" = Option<u64>, Query, description = "One-based page number (default 1)"),
        ("limit" = Option<u64>, Query, description = "Page size, 1 to 100 (default 10)")
    ),
    responses(
        (status = 200, description = "Page of loans", body = LoanListResponse),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["loans"],
    operation_id = "listLoans"
)]
#[get("/loans")]
pub async fn list_loans(
    state: web::Data<HttpState>,
    query: web::Query<ListLoansQuery>,
) -> ApiResult<web::Json<LoanListResponse>> {
    let ListLoansQuery { page, limit } = query.into_inner();
    let request = parse_page_request(page.as_deref(), limit.as_deref())?;
    let (records, meta) = state.loans_query.list_loans(request).await?.into_parts();
    Ok(web::Json(LoanListResponse::new(&records, meta)))
}

/// Fetch one loan application.
#[utoipa::path(
    get,
    path = "/api/loans/{id}",
    params(("id" = String, Path, description = "Loan identifier")),
    responses(
        (status = 200, description = "Loan", body = LoanResponse),
        (status = 404, description = "Unknown or malformed id", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["loans"],
    operation_id = "getLoan"
)]
#[get("/loans/{id}")]
pub async fn get_loan(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<LoanResponse>> {
    let record = state.loans_query.get_loan(&path.into_inner()).await?;
    Ok(web::Json(LoanResponse::from(&record)))
}

/// Move a loan to another status. Any canonical status is accepted.
#[utoipa::path(
    patch,
    path = "/api/loans/{id}/status",
    params(("id" = String, Path, description = "Loan identifier")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated loan", body = LoanResponse),
        (status = 400, description = "Missing or unknown status", body = Error),
        (status = 404, description = "Unknown or malformed id", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["loans"],
    operation_id = "updateLoanStatus"
)]
#[patch("/loans/{id}/status")]
pub async fn update_loan_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> ApiResult<web::Json<LoanResponse>> {
    let status = payload
        .into_inner()
        .status
        .ok_or_else(|| missing_field_error(FieldName::new("status")))?;
    let record = state
        .loans
        .update_status(&path.into_inner(), &status)
        .await?;
    Ok(web::Json(LoanResponse::from(&record)))
}

#[cfg(test)]
#[path = "loans_tests.rs"]
mod tests;
