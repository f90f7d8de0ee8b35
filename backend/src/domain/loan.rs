//! Loan application records and their field-level validation.
//!
//! Raw input arrives as a [`LoanApplicationDraft`] whose numeric fields may be
//! JSON numbers or numeric strings. [`LoanApplicationDraft::validate`] turns it
//! into a [`LoanApplication`] with trimmed text and typed numbers, or reports
//! the first offending field. A [`LoanRecord`] is an application that has been
//! stored: it gains an identifier, an application date, a status assignment and
//! an officer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::loan_status::{LoanStatus, StatusAssignment, StatusColor};

/// Officer recorded on applications that have not been assigned one.
pub const DEFAULT_OFFICER: &str = "Loan Officer";

/// Input fields of a loan application, named as clients send them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanField {
    /// Applicant's full name.
    FullName,
    /// Requested principal.
    LoanAmount,
    /// Repayment term in months.
    LoanTenure,
    /// Applicant's employment status.
    EmploymentStatus,
    /// Purpose of the loan.
    ReasonForLoan,
    /// Applicant's employer address.
    EmployerAddress,
}

impl LoanField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::LoanAmount => "loanAmount",
            Self::LoanTenure => "loanTenure",
            Self::EmploymentStatus => "employmentStatus",
            Self::ReasonForLoan => "reasonForLoan",
            Self::EmployerAddress => "employerAddress",
        }
    }
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for loan application input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanValidationError {
    /// A required field is absent, null or blank.
    Missing { field: LoanField },
    /// A numeric field could not be read as a finite number.
    NotANumber { field: LoanField },
    /// A numeric field is zero or negative.
    NotPositive { field: LoanField },
    /// The tenure has a fractional part.
    NotWholeNumber { field: LoanField },
    /// The tenure exceeds [`MAX_TENURE_MONTHS`].
    OutOfRange { field: LoanField },
}

impl LoanValidationError {
    /// Field that failed validation.
    #[must_use]
    pub const fn field(&self) -> LoanField {
        match self {
            Self::Missing { field }
            | Self::NotANumber { field }
            | Self::NotPositive { field }
            | Self::NotWholeNumber { field }
            | Self::OutOfRange { field } => *field,
        }
    }

    /// Machine-readable reason, used in error details.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing",
            Self::NotANumber { .. } => "not_a_number",
            Self::NotPositive { .. } => "not_positive",
            Self::NotWholeNumber { .. } => "not_whole_number",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

impl fmt::Display for LoanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.field()) {
            (Self::Missing { field }, _) => write!(f, "{field} is required"),
            (Self::OutOfRange { field }, _) => {
                write!(f, "{field} must be at most {MAX_TENURE_MONTHS} months")
            }
            (_, LoanField::LoanTenure) => write!(f, "loanTenure must be a positive integer"),
            (_, field) => write!(f, "{field} must be a positive number"),
        }
    }
}

impl std::error::Error for LoanValidationError {}

/// Raised when a loan identifier is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("loan id must be a valid UUID")]
pub struct LoanIdError;

/// Store-assigned loan identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanId(Uuid);

impl LoanId {
    /// Wrap a UUID issued by the store.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for LoanId {
    type Err = LoanIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| LoanIdError)
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A numeric field as supplied by a client: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// A JSON number.
    Number(f64),
    /// A string expected to hold a number, e.g. `"1000"`.
    Text(String),
}

impl NumericInput {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    fn to_finite(&self, field: LoanField) -> Result<f64, LoanValidationError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| LoanValidationError::NotANumber { field })?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(LoanValidationError::NotANumber { field })
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Non-empty text with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequiredText(String);

impl RequiredText {
    /// Trim `raw`, rejecting blank input on behalf of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`LoanValidationError::Missing`] when nothing remains after
    /// trimming.
    pub fn new(field: LoanField, raw: &str) -> Result<Self, LoanValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LoanValidationError::Missing { field });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strictly positive, finite principal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LoanAmount(f64);

impl LoanAmount {
    /// Validate a principal.
    ///
    /// # Errors
    ///
    /// [`LoanValidationError::NotANumber`] for non-finite values and
    /// [`LoanValidationError::NotPositive`] for zero or negative ones.
    pub fn new(value: f64) -> Result<Self, LoanValidationError> {
        let field = LoanField::LoanAmount;
        if !value.is_finite() {
            return Err(LoanValidationError::NotANumber { field });
        }
        if value <= 0.0 {
            return Err(LoanValidationError::NotPositive { field });
        }
        Ok(Self(value))
    }

    /// The principal as a float.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Longest accepted tenure; matches the signed 32-bit storage column.
pub const MAX_TENURE_MONTHS: u32 = i32::MAX.unsigned_abs();

/// Repayment term in whole months, between one and [`MAX_TENURE_MONTHS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoanTenure(u32);

impl LoanTenure {
    /// Validate a tenure expressed in months.
    ///
    /// # Errors
    ///
    /// [`LoanValidationError::NotPositive`] when `months` is zero and
    /// [`LoanValidationError::OutOfRange`] above [`MAX_TENURE_MONTHS`].
    pub const fn new(months: u32) -> Result<Self, LoanValidationError> {
        let field = LoanField::LoanTenure;
        if months == 0 {
            return Err(LoanValidationError::NotPositive { field });
        }
        if months > MAX_TENURE_MONTHS {
            return Err(LoanValidationError::OutOfRange { field });
        }
        Ok(Self(months))
    }

    /// Validate a tenure supplied as a float, e.g. from JSON.
    ///
    /// # Errors
    ///
    /// Rejects non-finite, non-positive and fractional values, and values
    /// beyond [`MAX_TENURE_MONTHS`].
    pub fn from_f64(value: f64) -> Result<Self, LoanValidationError> {
        let field = LoanField::LoanTenure;
        if !value.is_finite() {
            return Err(LoanValidationError::NotANumber { field });
        }
        if value < 1.0 {
            return Err(LoanValidationError::NotPositive { field });
        }
        if value.fract() != 0.0 {
            return Err(LoanValidationError::NotWholeNumber { field });
        }
        if value > f64::from(MAX_TENURE_MONTHS) {
            return Err(LoanValidationError::OutOfRange { field });
        }
        // Range and integrality are checked above.
        Self::new(value as u32)
    }

    /// Number of months.
    #[must_use]
    pub const fn months(self) -> u32 {
        self.0
    }
}

/// Unvalidated loan application input.
///
/// Every field is optional so that absence can be reported per field rather
/// than as a generic deserialisation failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplicationDraft {
    /// Applicant's full name.
    pub full_name: Option<String>,
    /// Requested principal.
    pub loan_amount: Option<NumericInput>,
    /// Repayment term in months.
    pub loan_tenure: Option<NumericInput>,
    /// Applicant's employment status.
    pub employment_status: Option<String>,
    /// Purpose of the loan.
    pub reason_for_loan: Option<String>,
    /// Applicant's employer address.
    pub employer_address: Option<String>,
}

impl LoanApplicationDraft {
    /// Validate every field and produce a normalised application.
    ///
    /// Presence is checked for all fields first, in wire order; numeric
    /// ranges are checked afterwards. The first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the [`LoanValidationError`] for the first offending field.
    ///
    /// # Examples
    /// ```
    /// use loan_desk::domain::{LoanApplicationDraft, NumericInput};
    ///
    /// let draft = LoanApplicationDraft {
    ///     full_name: Some(" Ada Lovelace ".into()),
    ///     loan_amount: Some(NumericInput::Text("1000".into())),
    ///     loan_tenure: Some(NumericInput::Text("6".into())),
    ///     employment_status: Some("Employed".into()),
    ///     reason_for_loan: Some("Repairs".into()),
    ///     employer_address: Some("1 Main St".into()),
    /// };
    /// let application = draft.validate().expect("valid draft");
    /// assert_eq!(application.full_name().as_ref(), "Ada Lovelace");
    /// assert_eq!(application.loan_tenure().months(), 6);
    /// ```
    pub fn validate(self) -> Result<LoanApplication, LoanValidationError> {
        self.ensure_present()?;

        let loan_amount = self
            .loan_amount
            .as_ref()
            .ok_or(LoanValidationError::Missing {
                field: LoanField::LoanAmount,
            })?
            .to_finite(LoanField::LoanAmount)
            .and_then(LoanAmount::new)?;
        let loan_tenure = self
            .loan_tenure
            .as_ref()
            .ok_or(LoanValidationError::Missing {
                field: LoanField::LoanTenure,
            })?
            .to_finite(LoanField::LoanTenure)
            .and_then(LoanTenure::from_f64)?;

        Ok(LoanApplication {
            full_name: required(LoanField::FullName, self.full_name.as_deref())?,
            loan_amount,
            loan_tenure,
            employment_status: required(
                LoanField::EmploymentStatus,
                self.employment_status.as_deref(),
            )?,
            reason_for_loan: required(LoanField::ReasonForLoan, self.reason_for_loan.as_deref())?,
            employer_address: required(
                LoanField::EmployerAddress,
                self.employer_address.as_deref(),
            )?,
        })
    }

    fn ensure_present(&self) -> Result<(), LoanValidationError> {
        let text_present =
            |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        let number_present =
            |value: &Option<NumericInput>| value.as_ref().is_some_and(|v| !v.is_blank());

        let checks = [
            (LoanField::FullName, text_present(&self.full_name)),
            (LoanField::LoanAmount, number_present(&self.loan_amount)),
            (LoanField::LoanTenure, number_present(&self.loan_tenure)),
            (
                LoanField::EmploymentStatus,
                text_present(&self.employment_status),
            ),
            (LoanField::ReasonForLoan, text_present(&self.reason_for_loan)),
            (LoanField::EmployerAddress, text_present(&self.employer_address)),
        ];
        match checks.into_iter().find(|(_, present)| !present) {
            Some((field, _)) => Err(LoanValidationError::Missing { field }),
            None => Ok(()),
        }
    }
}

fn required(field: LoanField, value: Option<&str>) -> Result<RequiredText, LoanValidationError> {
    RequiredText::new(field, value.unwrap_or_default())
}

/// A validated loan application, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanApplication {
    full_name: RequiredText,
    loan_amount: LoanAmount,
    loan_tenure: LoanTenure,
    employment_status: RequiredText,
    reason_for_loan: RequiredText,
    employer_address: RequiredText,
}

impl LoanApplication {
    /// Applicant's full name.
    #[must_use]
    pub const fn full_name(&self) -> &RequiredText {
        &self.full_name
    }

    /// Requested principal.
    #[must_use]
    pub const fn loan_amount(&self) -> LoanAmount {
        self.loan_amount
    }

    /// Repayment term.
    #[must_use]
    pub const fn loan_tenure(&self) -> LoanTenure {
        self.loan_tenure
    }

    /// Applicant's employment status.
    #[must_use]
    pub const fn employment_status(&self) -> &RequiredText {
        &self.employment_status
    }

    /// Purpose of the loan.
    #[must_use]
    pub const fn reason_for_loan(&self) -> &RequiredText {
        &self.reason_for_loan
    }

    /// Applicant's employer address.
    #[must_use]
    pub const fn employer_address(&self) -> &RequiredText {
        &self.employer_address
    }
}

/// An application about to be written for the first time.
///
/// The store assigns the identifier on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    /// Validated application fields.
    pub application: LoanApplication,
    /// Creation timestamp.
    pub date_applied: DateTime<Utc>,
    /// Initial status and colour.
    pub assignment: StatusAssignment,
    /// Officer handling the application.
    pub officer: String,
}

impl NewLoan {
    /// A pending application stamped at `date_applied`, handled by the
    /// default officer.
    #[must_use]
    pub fn pending(application: LoanApplication, date_applied: DateTime<Utc>) -> Self {
        Self {
            application,
            date_applied,
            assignment: StatusAssignment::initial(),
            officer: DEFAULT_OFFICER.to_owned(),
        }
    }

    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn into_record(self, id: LoanId) -> LoanRecord {
        LoanRecord {
            id,
            application: self.application,
            date_applied: self.date_applied,
            assignment: self.assignment,
            officer: self.officer,
        }
    }
}

/// A stored loan application.
///
/// ## Invariants
/// - `status_color()` always equals the colour derived from `status()`.
/// - `id` and `date_applied` never change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRecord {
    id: LoanId,
    application: LoanApplication,
    date_applied: DateTime<Utc>,
    assignment: StatusAssignment,
    officer: String,
}

impl LoanRecord {
    /// Rebuild a record read back from storage.
    ///
    /// A blank officer falls back to [`DEFAULT_OFFICER`].
    #[must_use]
    pub fn restore(
        id: LoanId,
        application: LoanApplication,
        date_applied: DateTime<Utc>,
        status: LoanStatus,
        officer: &str,
    ) -> Self {
        let officer = match officer.trim() {
            "" => DEFAULT_OFFICER,
            trimmed => trimmed,
        };
        Self {
            id,
            application,
            date_applied,
            assignment: StatusAssignment::for_status(status),
            officer: officer.to_owned(),
        }
    }

    /// Copy of this record with a new status assignment; every other field is
    /// kept.
    #[must_use]
    pub fn with_assignment(&self, assignment: StatusAssignment) -> Self {
        Self {
            assignment,
            ..self.clone()
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> LoanId {
        self.id
    }

    /// Validated application fields.
    #[must_use]
    pub const fn application(&self) -> &LoanApplication {
        &self.application
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn date_applied(&self) -> DateTime<Utc> {
        self.date_applied
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> LoanStatus {
        self.assignment.status()
    }

    /// Colour derived from the current status.
    #[must_use]
    pub const fn status_color(&self) -> StatusColor {
        self.assignment.color()
    }

    /// Officer handling the application.
    #[must_use]
    pub fn officer(&self) -> &str {
        &self.officer
    }

    /// Application date in US long form, e.g. `October 19, 2026`.
    #[must_use]
    pub fn date_label(&self) -> String {
        format_long_date(self.date_applied)
    }
}

/// Render `at` as `Month D, YYYY` in UTC.
#[must_use]
pub fn format_long_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
#[path = "loan_tests.rs"]
mod tests;
