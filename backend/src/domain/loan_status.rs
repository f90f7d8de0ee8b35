//! Canonical loan statuses and the status-to-colour derivation.
//!
//! Every write path goes through [`StatusAssignment`], which pairs a
//! normalised [`LoanStatus`] with the [`StatusColor`] derived from it. Storage
//! adapters persist the pair as one unit, so a record can never carry a colour
//! that disagrees with its status.
//!
//! Transitions are permissive: any canonical status may follow any other,
//! including `DISBURSED` straight from `PENDING`. No workflow order is
//! enforced here; adding one is a product decision, not a validation rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raised when a status string is not one of the canonical values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status: {value}")]
pub struct InvalidStatusError {
    value: String,
}

impl InvalidStatusError {
    /// The rejected input, exactly as supplied.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Lifecycle status of a loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// Initial status of every new application.
    Pending,
    /// Approved by an officer.
    Approved,
    /// Declined by an officer.
    Rejected,
    /// Funds have been paid out.
    Disbursed,
}

impl LoanStatus {
    /// All canonical statuses in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Disbursed,
    ];

    /// Upper-case `raw` and match it against the canonical set.
    ///
    /// Whitespace is significant: `" approved"` is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatusError`] when the upper-cased value is not one of
    /// `PENDING`, `APPROVED`, `REJECTED` or `DISBURSED`.
    ///
    /// # Examples
    /// ```
    /// use loan_desk::domain::LoanStatus;
    ///
    /// assert_eq!(LoanStatus::normalize("disbursed"), Ok(LoanStatus::Disbursed));
    /// assert!(LoanStatus::normalize("bogus").is_err());
    /// ```
    pub fn normalize(raw: &str) -> Result<Self, InvalidStatusError> {
        let upper = raw.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| InvalidStatusError {
                value: raw.to_owned(),
            })
    }

    /// Canonical upper-case spelling, as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Disbursed => "DISBURSED",
        }
    }

    /// Title-cased label for dashboards (`Pending`, `Approved`, ...).
    #[must_use]
    pub const fn display_label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Disbursed => "Disbursed",
        }
    }

    /// Display colour for this status.
    #[must_use]
    pub const fn color(self) -> StatusColor {
        derive_color(self)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

/// Display colour token rendered next to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    /// Colour for [`LoanStatus::Pending`].
    Pending,
    /// Colour for [`LoanStatus::Approved`].
    Approved,
    /// Colour for [`LoanStatus::Rejected`].
    Rejected,
    /// Colour for [`LoanStatus::Disbursed`].
    Disbursed,
}

impl StatusColor {
    /// Lower-case token, as stored and serialised.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Disbursed => "disbursed",
        }
    }

    /// Parse a stored colour token. Unknown tokens yield `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        LoanStatus::ALL
            .into_iter()
            .map(derive_color)
            .find(|color| color.as_str() == token)
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single status-to-colour mapping.
///
/// Total over [`LoanStatus`]; invalid strings never reach it because they fail
/// [`LoanStatus::normalize`] first.
#[must_use]
pub const fn derive_color(status: LoanStatus) -> StatusColor {
    match status {
        LoanStatus::Pending => StatusColor::Pending,
        LoanStatus::Approved => StatusColor::Approved,
        LoanStatus::Rejected => StatusColor::Rejected,
        LoanStatus::Disbursed => StatusColor::Disbursed,
    }
}

/// A status together with its derived colour, written as one unit.
///
/// The only constructors derive the colour, so `color == derive_color(status)`
/// holds for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusAssignment {
    status: LoanStatus,
    color: StatusColor,
}

impl StatusAssignment {
    /// Assignment for a freshly created application.
    #[must_use]
    pub const fn initial() -> Self {
        Self::for_status(LoanStatus::Pending)
    }

    /// Assignment for an already-normalised status.
    #[must_use]
    pub const fn for_status(status: LoanStatus) -> Self {
        Self {
            status,
            color: derive_color(status),
        }
    }

    /// Normalise `raw` and derive its colour.
    ///
    /// # Errors
    ///
    /// Propagates [`InvalidStatusError`] from [`LoanStatus::normalize`].
    pub fn parse(raw: &str) -> Result<Self, InvalidStatusError> {
        LoanStatus::normalize(raw).map(Self::for_status)
    }

    /// The assigned status.
    #[must_use]
    pub const fn status(&self) -> LoanStatus {
        self.status
    }

    /// The colour derived from [`Self::status`].
    #[must_use]
    pub const fn color(&self) -> StatusColor {
        self.color
    }
}

impl Default for StatusAssignment {
    fn default() -> Self {
        Self::initial()
    }
}
