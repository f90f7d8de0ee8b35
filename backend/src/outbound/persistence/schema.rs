//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Loan applications.
    ///
    /// `status_color` is constrained to `lower(status)` by a check
    /// constraint, so the pair can only change together.
    loans (id) {
        /// Primary key, generated by the database.
        id -> Uuid,
        /// Applicant's full name, trimmed.
        full_name -> Text,
        /// Requested principal; strictly positive.
        loan_amount -> Float8,
        /// Repayment term in months; at least one.
        loan_tenure -> Int4,
        /// Applicant's employment status.
        employment_status -> Text,
        /// Purpose of the loan.
        reason_for_loan -> Text,
        /// Applicant's employer address.
        employer_address -> Text,
        /// Creation timestamp; never updated.
        date_applied -> Timestamptz,
        /// Canonical upper-case status.
        #[max_length = 16]
        status -> Varchar,
        /// Lower-case display colour derived from `status`.
        #[max_length = 16]
        status_color -> Varchar,
        /// Officer handling the application.
        officer -> Text,
    }
}
