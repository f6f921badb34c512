//! Person data model and registration validation.

use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identifier::{Identifier, IdentifierKind};
use super::money::Money;

/// Minimum age, in whole years, accepted at registration time.
pub const MINIMUM_AGE_YEARS: i32 = 18;

/// Validation errors for person fields and registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    InvalidBirthDateFormat,
    InvalidCalendarDate,
    UnderageApplicant { minimum_years: i32 },
    InvertedLoanRange,
}

impl fmt::Display for PersonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "person id must not be empty"),
            Self::InvalidId => write!(f, "person id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidBirthDateFormat => {
                write!(f, "birth date must use the YYYY-MM-DD format")
            }
            Self::InvalidCalendarDate => write!(f, "birth date must be a real calendar date"),
            Self::UnderageApplicant { minimum_years } => {
                write!(f, "person must be at least {minimum_years} years old")
            }
            Self::InvertedLoanRange => {
                write!(f, "minimum loan amount must not exceed the maximum")
            }
        }
    }
}

impl std::error::Error for PersonValidationError {}

/// Stable person identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonId(Uuid, String);

impl PersonId {
    /// Validate and construct a [`PersonId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PersonValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`PersonId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, PersonValidationError> {
        if id.is_empty() {
            return Err(PersonValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(PersonValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| PersonValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PersonId> for String {
    fn from(value: PersonId) -> Self {
        let PersonId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for PersonId {
    type Error = PersonValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Display name for a registered person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`], trimming surrounding space.
    pub fn new(name: impl Into<String>) -> Result<Self, PersonValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PersonValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = PersonValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static BIRTH_DATE_RE: OnceLock<Regex> = OnceLock::new();

fn birth_date_regex() -> &'static Regex {
    BIRTH_DATE_RE.get_or_init(|| {
        let pattern = r"^\d{4}-\d{2}-\d{2}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("birth date regex failed to compile: {error}"))
    })
}

/// Calendar birth date carried as an ISO 8601 day.
///
/// ## Invariants
/// - Parses only strict `YYYY-MM-DD` strings naming a real calendar date
///   with a four-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Parse a strict `YYYY-MM-DD` string.
    pub fn parse(raw: &str) -> Result<Self, PersonValidationError> {
        if !birth_date_regex().is_match(raw) {
            return Err(PersonValidationError::InvalidBirthDateFormat);
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| PersonValidationError::InvalidCalendarDate)?;
        if date.year() < 1000 {
            // The core treats three-digit years as malformed input.
            return Err(PersonValidationError::InvalidBirthDateFormat);
        }
        Ok(Self(date))
    }

    /// Whole years completed on `today`.
    ///
    /// Precise year-month-day comparison: a birthday later in the current
    /// year has not happened yet and does not count.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut years = today.year() - self.0.year();
        if (today.month(), today.day()) < (self.0.month(), self.0.day()) {
            years -= 1;
        }
        years
    }

    /// Whether the person reaches [`MINIMUM_AGE_YEARS`] on `today`.
    pub fn is_adult_on(&self, today: NaiveDate) -> bool {
        self.age_on(today) >= MINIMUM_AGE_YEARS
    }

    /// The underlying calendar date.
    pub const fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<BirthDate> for String {
    fn from(value: BirthDate) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for BirthDate {
    type Error = PersonValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Approved loan-amount bounds for one person.
///
/// ## Invariants
/// - `minimum <= maximum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanRange {
    minimum: Money,
    maximum: Money,
}

impl LoanRange {
    /// Validate and construct a range.
    pub fn new(minimum: Money, maximum: Money) -> Result<Self, PersonValidationError> {
        if minimum > maximum {
            return Err(PersonValidationError::InvertedLoanRange);
        }
        Ok(Self { minimum, maximum })
    }

    /// Range admitting any representable amount.
    pub fn unbounded() -> Self {
        Self {
            minimum: Money::from(0),
            maximum: Money::from(i64::MAX),
        }
    }

    /// Lower bound on requested amounts.
    pub const fn minimum(&self) -> Money {
        self.minimum
    }

    /// Upper bound on requested amounts.
    pub const fn maximum(&self) -> Money {
        self.maximum
    }

    /// Whether `amount` falls inside the approved range.
    pub fn contains(&self, amount: Money) -> bool {
        self.minimum <= amount && amount <= self.maximum
    }
}

/// Registered person as read back from the lending core.
///
/// ## Invariants
/// - Built only from validated components; never mutated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: PersonId,
    name: PersonName,
    identifier: Identifier,
    identifier_kind: IdentifierKind,
    birth_date: BirthDate,
    loan_range: LoanRange,
}

impl Person {
    /// Build a [`Person`] from validated components.
    pub fn new(
        id: PersonId,
        name: PersonName,
        identifier: Identifier,
        identifier_kind: IdentifierKind,
        birth_date: BirthDate,
        loan_range: LoanRange,
    ) -> Self {
        Self {
            id,
            name,
            identifier,
            identifier_kind,
            birth_date,
            loan_range,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &PersonId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Normalised identification digits.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Identification document category.
    pub fn identifier_kind(&self) -> &IdentifierKind {
        &self.identifier_kind
    }

    /// The identifier punctuated for display.
    pub fn formatted_identifier(&self) -> String {
        self.identifier_kind.format(self.identifier.as_ref())
    }

    /// Birth date.
    pub fn birth_date(&self) -> &BirthDate {
        &self.birth_date
    }

    /// Approved loan-amount bounds.
    pub fn loan_range(&self) -> &LoanRange {
        &self.loan_range
    }
}

/// Normalised registration payload ready for transmission to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: PersonName,
    identifier: Identifier,
    birth_date: BirthDate,
}

impl Registration {
    /// Assemble a registration from validated fields.
    pub fn new(name: PersonName, identifier: Identifier, birth_date: BirthDate) -> Self {
        Self {
            name,
            identifier,
            birth_date,
        }
    }

    /// Validated name.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Digits-only identifier.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Validated birth date.
    pub fn birth_date(&self) -> &BirthDate {
        &self.birth_date
    }
}
