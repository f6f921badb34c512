//! Loan data model and loan-request validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::{Money, MoneyParseError};
use super::person::{Person, PersonId};

/// Smallest accepted installment count.
pub const INSTALLMENTS_MIN: u8 = 1;
/// Largest accepted installment count.
pub const INSTALLMENTS_MAX: u8 = 24;
/// Character cap applied to the installments form field.
pub const INSTALLMENTS_INPUT_LIMIT: usize = 2;

/// Validation errors for loan-request fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanValidationError {
    EmptyLoanId,
    InvalidLoanId,
    EmptyAmount,
    AmountTooLarge,
    NonPositiveAmount,
    EmptyInstallments,
    InstallmentsTooLong { limit: usize },
    InstallmentsNotANumber,
    InstallmentsOutOfRange { min: u8, max: u8 },
}

impl fmt::Display for LoanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLoanId => write!(f, "loan id must not be empty"),
            Self::InvalidLoanId => write!(f, "loan id must be a valid UUID"),
            Self::EmptyAmount => write!(f, "amount must contain at least one digit"),
            Self::AmountTooLarge => write!(f, "amount is too large"),
            Self::NonPositiveAmount => {
                write!(f, "amount must be greater than R$ 0,00")
            }
            Self::EmptyInstallments => write!(f, "number of installments is required"),
            Self::InstallmentsTooLong { limit } => {
                write!(f, "number of installments must have at most {limit} characters")
            }
            Self::InstallmentsNotANumber => {
                write!(f, "number of installments must be a whole number")
            }
            Self::InstallmentsOutOfRange { min, max } => {
                write!(f, "number of installments must be between {min} and {max}")
            }
        }
    }
}

impl std::error::Error for LoanValidationError {}

/// Stable loan identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoanId(Uuid, String);

impl LoanId {
    /// Validate and construct a [`LoanId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, LoanValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`LoanId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, LoanValidationError> {
        if id.is_empty() {
            return Err(LoanValidationError::EmptyLoanId);
        }
        if id.trim() != id {
            return Err(LoanValidationError::InvalidLoanId);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| LoanValidationError::InvalidLoanId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for LoanId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<LoanId> for String {
    fn from(value: LoanId) -> Self {
        let LoanId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for LoanId {
    type Error = LoanValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Number of repayment installments.
///
/// ## Invariants
/// - Between [`INSTALLMENTS_MIN`] and [`INSTALLMENTS_MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct InstallmentCount(u8);

impl InstallmentCount {
    /// Validate and construct from an already numeric count.
    pub fn new(count: u8) -> Result<Self, LoanValidationError> {
        if !(INSTALLMENTS_MIN..=INSTALLMENTS_MAX).contains(&count) {
            return Err(LoanValidationError::InstallmentsOutOfRange {
                min: INSTALLMENTS_MIN,
                max: INSTALLMENTS_MAX,
            });
        }
        Ok(Self(count))
    }

    /// Validate raw form input: at most two characters, a whole number,
    /// between 1 and 24 inclusive.
    pub fn parse(raw: &str) -> Result<Self, LoanValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LoanValidationError::EmptyInstallments);
        }
        if trimmed.chars().count() > INSTALLMENTS_INPUT_LIMIT {
            return Err(LoanValidationError::InstallmentsTooLong {
                limit: INSTALLMENTS_INPUT_LIMIT,
            });
        }
        let count = trimmed
            .parse::<u8>()
            .map_err(|_| LoanValidationError::InstallmentsNotANumber)?;
        Self::new(count)
    }

    /// The validated count.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for InstallmentCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<InstallmentCount> for u8 {
    fn from(value: InstallmentCount) -> Self {
        value.0
    }
}

impl TryFrom<u8> for InstallmentCount {
    type Error = LoanValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Repayment state of a loan. Exactly one transition exists:
/// pending to paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Paid,
}

impl LoanStatus {
    /// Whether the loan has been settled.
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

impl FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            other => Err(format!("unknown loan status: {other}")),
        }
    }
}

/// Validate a raw amount string into a positive monetary value.
///
/// Display punctuation is accepted and stripped; the remaining digits are
/// minor units and must be strictly positive. A minus sign anywhere before
/// the first digit, including after a currency symbol, is rejected outright
/// rather than silently discarded.
pub fn parse_positive_amount(raw: &str) -> Result<Money, LoanValidationError> {
    let negated = raw
        .chars()
        .take_while(|c| !c.is_ascii_digit())
        .any(|c| c == '-');
    if negated {
        return Err(LoanValidationError::NonPositiveAmount);
    }
    let amount = Money::parse_display(raw).map_err(|err| match err {
        MoneyParseError::NoDigits => LoanValidationError::EmptyAmount,
        MoneyParseError::TooLarge => LoanValidationError::AmountTooLarge,
    })?;
    if !amount.is_positive() {
        return Err(LoanValidationError::NonPositiveAmount);
    }
    Ok(amount)
}

/// Normalised loan request ready for transmission to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRequest {
    person_id: PersonId,
    amount: Money,
    installments: InstallmentCount,
}

impl LoanRequest {
    /// Assemble a request from validated fields.
    pub fn new(person_id: PersonId, amount: Money, installments: InstallmentCount) -> Self {
        Self {
            person_id,
            amount,
            installments,
        }
    }

    /// The borrowing person.
    pub fn person_id(&self) -> &PersonId {
        &self.person_id
    }

    /// Requested amount in minor units.
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Requested installment count.
    pub const fn installments(&self) -> InstallmentCount {
        self.installments
    }
}

/// Loan as read back from the lending core, embedding its person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    id: LoanId,
    amount: Money,
    installments: InstallmentCount,
    status: LoanStatus,
    created_at: DateTime<Utc>,
    person: Person,
}

impl Loan {
    /// Build a [`Loan`] from validated components.
    pub fn new(
        id: LoanId,
        amount: Money,
        installments: InstallmentCount,
        status: LoanStatus,
        created_at: DateTime<Utc>,
        person: Person,
    ) -> Self {
        Self {
            id,
            amount,
            installments,
            status,
            created_at,
            person,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &LoanId {
        &self.id
    }

    /// Amount in minor units.
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Installment count.
    pub const fn installments(&self) -> InstallmentCount {
        self.installments
    }

    /// Repayment state.
    pub const fn status(&self) -> LoanStatus {
        self.status
    }

    /// Creation timestamp reported by the core.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The borrowing person.
    pub fn person(&self) -> &Person {
        &self.person
    }

    /// Whether the payment action still applies. Paid loans are final;
    /// acting on them again is a no-op.
    pub const fn is_payable(&self) -> bool {
        !self.status.is_paid()
    }
}
