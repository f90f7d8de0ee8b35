//! Behaviour-driven tests for the loan lifecycle.
//!
//! Scenarios run the loan and dashboard services over the in-memory store, so
//! they need no database.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use futures::executor::block_on;
use loan_desk::domain::ports::{DashboardQuery, LoanCommand, LoanQuery, LoanRepository};
use loan_desk::domain::{
    DashboardService, DashboardStats, Error, LoanApplicationDraft, LoanRecord, LoanService,
    NewLoan, NumericInput,
};
use loan_desk::outbound::memory::InMemoryLoanRepository;
use mockable::Clock;
use pagination::{Page, PageRequest};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

// -----------------------------------------------------------------------------
// Test World
// -----------------------------------------------------------------------------

struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        opening_time()
    }
}

fn opening_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Services sharing one store.
#[derive(Clone)]
struct Desk {
    repo: Arc<InMemoryLoanRepository>,
    loans: Arc<LoanService<InMemoryLoanRepository>>,
    dashboard: Arc<DashboardService<InMemoryLoanRepository>>,
}

impl Desk {
    fn new() -> Self {
        let repo = Arc::new(InMemoryLoanRepository::default());
        Self {
            loans: Arc::new(LoanService::new(Arc::clone(&repo), Arc::new(FixedClock))),
            dashboard: Arc::new(DashboardService::new(Arc::clone(&repo), 500_000.0)),
            repo,
        }
    }
}

#[derive(Default, ScenarioState)]
struct LoanDeskWorld {
    desk: Slot<Desk>,
    last_loan: Slot<LoanRecord>,
    last_error: Slot<Error>,
    last_page: Slot<Page<LoanRecord>>,
    stats: Slot<DashboardStats>,
}

impl LoanDeskWorld {
    fn desk(&self) -> Desk {
        self.desk.get().expect("desk initialised")
    }

    fn record(&self, result: Result<LoanRecord, Error>) {
        match result {
            Ok(record) => self.last_loan.set(record),
            Err(err) => self.last_error.set(err),
        }
    }

    fn apply(&self, amount: &str, tenure: &str) {
        let draft = LoanApplicationDraft {
            full_name: Some("Ada Lovelace".into()),
            loan_amount: Some(NumericInput::Text(amount.to_owned())),
            loan_tenure: Some(NumericInput::Text(tenure.to_owned())),
            employment_status: Some("Employed".into()),
            reason_for_loan: Some("Repairs".into()),
            employer_address: Some("1 Main St".into()),
        };
        let result = block_on(self.desk().loans.create_loan(draft));
        self.record(result);
    }

    fn stored_loan(&self) -> LoanRecord {
        let id = self.last_loan.get().expect("a loan was created").id();
        block_on(self.desk().loans.get_loan(&id.to_string())).expect("stored loan readable")
    }
}

#[fixture]
fn world() -> LoanDeskWorld {
    LoanDeskWorld::default()
}

fn seeded(index: i64) -> NewLoan {
    let application = LoanApplicationDraft {
        full_name: Some(format!("Applicant {index}")),
        loan_amount: Some(NumericInput::Number(750.0)),
        loan_tenure: Some(NumericInput::Number(12.0)),
        employment_status: Some("Self-employed".into()),
        reason_for_loan: Some("Equipment".into()),
        employer_address: Some("5 Mill Lane".into()),
    }
    .validate()
    .expect("valid draft");
    NewLoan::pending(application, opening_time() - Duration::hours(index))
}

// -----------------------------------------------------------------------------
// Given Steps
// -----------------------------------------------------------------------------

#[given("an empty loan desk")]
fn an_empty_loan_desk(world: &LoanDeskWorld) {
    world.desk.set(Desk::new());
}

#[given("Ada has applied")]
fn ada_has_applied(world: &LoanDeskWorld) {
    world.apply("1000", "6");
    assert!(world.last_loan.get().is_some(), "application should be stored");
}

#[given("a loan desk holding {count} applications")]
fn a_loan_desk_holding(world: &LoanDeskWorld, count: String) {
    let count: i64 = count.parse().expect("numeric count");
    let desk = Desk::new();
    for index in 0..count {
        block_on(desk.repo.insert(&seeded(index))).expect("seed loan");
    }
    world.desk.set(desk);
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("Ada applies for {amount} over {tenure} months")]
fn ada_applies(world: &LoanDeskWorld, amount: String, tenure: String) {
    world.apply(&amount, &tenure);
}

#[when("an application arrives with amount {amount} and tenure {tenure}")]
fn an_application_arrives(world: &LoanDeskWorld, amount: String, tenure: String) {
    world.apply(&amount, &tenure);
}

#[when("the loan status is changed to {status}")]
fn the_loan_status_is_changed(world: &LoanDeskWorld, status: String) {
    let id = world.last_loan.get().expect("a loan was created").id();
    let result = block_on(world.desk().loans.update_status(&id.to_string(), &status));
    world.record(result);
}

#[when("loan {id} is fetched")]
fn loan_is_fetched(world: &LoanDeskWorld, id: String) {
    let result = block_on(world.desk().loans.get_loan(&id));
    world.record(result);
}

#[when("page {page} is listed with limit {limit}")]
fn page_is_listed(world: &LoanDeskWorld, page: String, limit: String) {
    let request = PageRequest::new(
        page.parse().expect("numeric page"),
        limit.parse().expect("numeric limit"),
    )
    .expect("valid page request");
    let listed = block_on(world.desk().loans.list_loans(request)).expect("listing succeeds");
    world.last_page.set(listed);
}

#[when("the dashboard is computed")]
fn the_dashboard_is_computed(world: &LoanDeskWorld) {
    let stats = block_on(world.desk().dashboard.dashboard_stats()).expect("stats succeed");
    world.stats.set(stats);
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

#[then("the stored loan is {status} with colour {colour}")]
fn the_stored_loan_is(world: &LoanDeskWorld, status: String, colour: String) {
    let stored = world.stored_loan();
    assert_eq!(stored.status().as_str(), status);
    assert_eq!(stored.status_color().as_str(), colour);
    assert_eq!(stored.date_applied(), opening_time());
}

#[then("the stored loan has amount {amount} and tenure {tenure}")]
fn the_stored_loan_has(world: &LoanDeskWorld, amount: String, tenure: String) {
    let stored = world.stored_loan();
    let expected_amount: f64 = amount.parse().expect("numeric amount");
    let expected_tenure: u32 = tenure.parse().expect("numeric tenure");
    assert_eq!(stored.application().loan_amount().value(), expected_amount);
    assert_eq!(stored.application().loan_tenure().months(), expected_tenure);
}

#[then("the request fails with {code}")]
fn the_request_fails_with(world: &LoanDeskWorld, code: String) {
    let err = world.last_error.get().expect("an error was recorded");
    let actual = serde_json::to_value(err.code()).expect("code serialises");
    assert_eq!(actual.as_str(), Some(code.as_str()));
}

#[then("the desk holds {count} loans")]
fn the_desk_holds(world: &LoanDeskWorld, count: String) {
    let expected: u64 = count.parse().expect("numeric count");
    assert_eq!(block_on(world.desk().repo.count()).expect("count"), expected);
}

#[then("{count} loans are returned newest first")]
fn loans_are_returned_newest_first(world: &LoanDeskWorld, count: String) {
    let page = world.last_page.get().expect("a page was listed");
    let expected: usize = count.parse().expect("numeric count");
    assert_eq!(page.items().len(), expected);
    assert!(
        page.items()
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.date_applied() >= b.date_applied()))
    );
}

#[then("the listing reports {total} loans over {pages} pages")]
fn the_listing_reports(world: &LoanDeskWorld, total: String, pages: String) {
    let meta = world.last_page.get().expect("a page was listed").meta();
    assert_eq!(meta.total, total.parse::<u64>().expect("numeric total"));
    assert_eq!(meta.pages, pages.parse::<u64>().expect("numeric pages"));
}

#[then("the dashboard reports {total} loans with {disbursed} disbursed")]
fn the_dashboard_reports(world: &LoanDeskWorld, total: String, disbursed: String) {
    let stats = world.stats.get().expect("stats computed");
    assert_eq!(stats.total_loans, total.parse::<u64>().expect("numeric total"));
    assert_eq!(
        stats.cash_disbursed,
        disbursed.parse::<f64>().expect("numeric amount")
    );
    assert_eq!(stats.recent_loans.len(), 1);
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/loan_lifecycle.feature",
    name = "New applications start pending"
)]
fn new_applications_start_pending(world: LoanDeskWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/loan_lifecycle.feature",
    name = "Status changes re-derive the colour"
)]
fn status_changes_rederive_the_colour(world: LoanDeskWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/loan_lifecycle.feature",
    name = "Unknown statuses are rejected without touching storage"
)]
fn unknown_statuses_are_rejected(world: LoanDeskWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/loan_lifecycle.feature",
    name = "Zero amounts are rejected"
)]
fn zero_amounts_are_rejected(world: LoanDeskWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/loan_lifecycle.feature",
    name = "Fractional tenures are rejected"
)]
fn fractional_tenures_are_rejected(world: LoanDeskWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/loan_lifecycle.feature",
    name = "Unknown and malformed ids are not found"
)]
fn unknown_and_malformed_ids_are_not_found(world: LoanDeskWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/loan_lifecycle.feature",
    name = "Listing pages newest first"
)]
fn listing_pages_newest_first(world: LoanDeskWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/loan_lifecycle.feature",
    name = "Dashboard summarises disbursed loans"
)]
fn dashboard_summarises_disbursed_loans(world: LoanDeskWorld) {
    let _ = world;
}
