//! Tests for loan HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::LoanRepository;
use crate::domain::{
    DashboardService, LoanApplicationDraft, LoanService, NewLoan, NumericInput, TRACE_ID_HEADER,
};
use crate::inbound::http::loans_dto::LoanView;
use crate::inbound::http::validation::json_config;
use crate::outbound::memory::InMemoryLoanRepository;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn repo() -> Arc<InMemoryLoanRepository> {
    Arc::new(InMemoryLoanRepository::default())
}

fn state_for(repo: &Arc<InMemoryLoanRepository>) -> HttpState {
    let loans = Arc::new(LoanService::new(
        Arc::clone(repo),
        Arc::new(FixtureClock { utc_now: now() }),
    ));
    HttpState::new(
        loans.clone(),
        loans,
        Arc::new(DashboardService::new(Arc::clone(repo), 500_000.0)),
    )
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(crate::Trace)
        .service(
            web::scope("/api")
                .service(create_loan)
                .service(list_loans)
                .service(get_loan)
                .service(update_loan_status),
        )
}

fn ada_payload() -> Value {
    json!({
        "fullName": "Ada Lovelace",
        "loanAmount": "1000",
        "loanTenure": "6",
        "employmentStatus": "Employed",
        "reasonForLoan": "Repairs",
        "employerAddress": "1 Main St"
    })
}

fn seeded_loan(name: &str, at: DateTime<Utc>) -> NewLoan {
    let application = LoanApplicationDraft {
        full_name: Some(name.into()),
        loan_amount: Some(NumericInput::Number(500.0)),
        loan_tenure: Some(NumericInput::Number(3.0)),
        employment_status: Some("Employed".into()),
        reason_for_loan: Some("Stock".into()),
        employer_address: Some("2 High St".into()),
    }
    .validate()
    .expect("valid draft");
    NewLoan::pending(application, at)
}

fn error_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get("details")
        .and_then(|d| d.get(key))
        .and_then(Value::as_str)
}

async fn create_ada(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> LoanView {
    let req = actix_test::TestRequest::post()
        .uri("/api/loans")
        .set_json(ada_payload())
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: LoanResponse = actix_test::read_body_json(res).await;
    assert!(body.success);
    body.data
}

#[rstest]
#[actix_web::test]
async fn create_returns_pending_projection(repo: Arc<InMemoryLoanRepository>) {
    let app = actix_test::init_service(test_app(state_for(&repo))).await;

    let view = create_ada(&app).await;

    assert_eq!(view.full_name, "Ada Lovelace");
    assert_eq!(view.amount, 1000.0);
    assert_eq!(view.tenure, 6);
    assert_eq!(view.status.as_str(), "PENDING");
    assert_eq!(view.status_color.as_str(), "pending");
    assert_eq!(view.date, "October 19, 2026");
    assert_eq!(view.officer, "Loan Officer");
    assert_eq!(repo.count().await.expect("count"), 1);
}

#[rstest]
#[case::zero_amount("loanAmount", json!(0), "not_positive")]
#[case::negative_amount("loanAmount", json!("-5"), "not_positive")]
#[case::text_amount("loanAmount", json!("lots"), "not_a_number")]
#[case::fractional_tenure("loanTenure", json!(2.5), "not_whole_number")]
#[case::unstorable_tenure("loanTenure", json!("3000000000"), "out_of_range")]
#[case::blank_name("fullName", json!("   "), "missing")]
#[case::null_address("employerAddress", Value::Null, "missing")]
#[actix_web::test]
async fn create_rejects_invalid_fields(
    repo: Arc<InMemoryLoanRepository>,
    #[case] field: &str,
    #[case] value: Value,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(state_for(&repo))).await;
    let mut payload = ada_payload();
    payload[field] = value;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/loans")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
    assert_eq!(error_field(&body, "field"), Some(field));
    assert_eq!(error_field(&body, "code"), Some(code));
    assert_eq!(repo.count().await.expect("count"), 0);
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_a_validation_error(repo: Arc<InMemoryLoanRepository>) {
    let app = actix_test::init_service(test_app(state_for(&repo))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/loans")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_field(&body, "code"), Some("malformed_body"));
}

#[rstest]
#[actix_web::test]
async fn list_pages_newest_first(repo: Arc<InMemoryLoanRepository>) {
    for day in 0..25 {
        repo.insert(&seeded_loan(
            &format!("Applicant {day}"),
            now() - Duration::days(day),
        ))
        .await
        .expect("seed");
    }
    let app = actix_test::init_service(test_app(state_for(&repo))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/loans?page=1&limit=10")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: LoanListResponse = actix_test::read_body_json(res).await;
    assert!(body.success);
    assert_eq!(body.data.len(), 10);
    assert_eq!(
        body.data.first().map(|v| v.full_name.as_str()),
        Some("Applicant 0")
    );
    assert_eq!(
        body.data.last().map(|v| v.full_name.as_str()),
        Some("Applicant 9")
    );
    assert_eq!(body.pagination.total, 25);
    assert_eq!(body.pagination.pages, 3);
}

#[rstest]
#[actix_web::test]
async fn list_past_the_end_is_empty(repo: Arc<InMemoryLoanRepository>) {
    repo.insert(&seeded_loan("Solo", now())).await.expect("seed");
    let app = actix_test::init_service(test_app(state_for(&repo))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/loans?page=9")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: LoanListResponse = actix_test::read_body_json(res).await;
    assert!(body.data.is_empty());
    assert_eq!(body.pagination.page, 9);
    assert_eq!(body.pagination.limit, 10);
    assert_eq!(body.pagination.total, 1);
}

#[rstest]
#[case::text_page("/api/loans?page=first", "page")]
#[case::zero_limit("/api/loans?limit=0", "limit")]
#[case::huge_limit("/api/loans?limit=1000", "limit")]
#[actix_web::test]
async fn list_rejects_bad_pagination(
    repo: Arc<InMemoryLoanRepository>,
    #[case] uri: &str,
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(state_for(&repo))).await;

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_field(&body, "field"), Some(field));
}

#[rstest]
#[actix_web::test]
async fn get_returns_created_loan(repo: Arc<InMemoryLoanRepository>) {
    let app = actix_test::init_service(test_app(state_for(&repo))).await;
    let created = create_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/loans/{}", created.id))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: LoanResponse = actix_test::read_body_json(res).await;
    assert_eq!(body.data, created);
}

#[rstest]
#[case::malformed("not-a-uuid")]
#[case::absent("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[actix_web::test]
async fn unknown_ids_are_not_found(repo: Arc<InMemoryLoanRepository>, #[case] id: &str) {
    let app = actix_test::init_service(test_app(state_for(&repo))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/loans/{id}"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("not_found"));
    assert_eq!(body.get("message").and_then(Value::as_str), Some("loan not found"));
}

#[rstest]
#[case::pending("pending", "PENDING")]
#[case::approved("Approved", "APPROVED")]
#[case::rejected("REJECTED", "REJECTED")]
#[case::disbursed("disbursed", "DISBURSED")]
#[actix_web::test]
async fn status_update_rederives_colour(
    repo: Arc<InMemoryLoanRepository>,
    #[case] requested: &str,
    #[case] expected: &str,
) {
    let app = actix_test::init_service(test_app(state_for(&repo))).await;
    let created = create_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/loans/{}/status", created.id))
            .set_json(json!({ "status": requested }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let updated: LoanResponse = actix_test::read_body_json(res).await;
    assert_eq!(updated.data.status.as_str(), expected);
    assert_eq!(updated.data.status_color.as_str(), expected.to_lowercase());
    assert_eq!(
        LoanView {
            status: created.status,
            status_color: created.status_color,
            ..updated.data.clone()
        },
        created
    );
}

#[rstest]
#[actix_web::test]
async fn bogus_status_leaves_record_untouched(repo: Arc<InMemoryLoanRepository>) {
    let app = actix_test::init_service(test_app(state_for(&repo))).await;
    let created = create_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/loans/{}/status", created.id))
            .set_json(json!({ "status": "bogus" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_status"));

    let after = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/loans/{}", created.id))
            .to_request(),
    )
    .await;
    let stored: LoanResponse = actix_test::read_body_json(after).await;
    assert_eq!(stored.data, created);
}

#[rstest]
#[actix_web::test]
async fn missing_status_is_a_validation_error(repo: Arc<InMemoryLoanRepository>) {
    let app = actix_test::init_service(test_app(state_for(&repo))).await;
    let created = create_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/loans/{}/status", created.id))
            .set_json(json!({}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
    assert_eq!(error_field(&body, "field"), Some("status"));
}

#[rstest]
#[actix_web::test]
async fn storage_outage_is_reported_as_unavailable(repo: Arc<InMemoryLoanRepository>) {
    let app = actix_test::init_service(test_app(state_for(&repo))).await;
    repo.set_unavailable(true);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/loans").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("service_unavailable")
    );
}
