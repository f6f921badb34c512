//! Port for the external lending core.

use async_trait::async_trait;
use thiserror::Error;

use chrono::Utc;

use crate::domain::identifier::{Identifier, IdentifierKind};
use crate::domain::loan::{Loan, LoanId, LoanRequest, LoanStatus};
use crate::domain::money::Money;
use crate::domain::person::{LoanRange, Person, PersonId, PersonName, Registration};

/// A business rejection reported by the lending core.
///
/// The core signals these through error bodies rather than dedicated status
/// codes, so the adapter parses its messages into structured variants. The
/// `Display` output is the staff-facing message, with monetary bounds
/// rendered in display format.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BackendRejection {
    /// The individual taxpayer number failed the core's check digits.
    InvalidIndividualIdentifier,
    /// The corporate taxpayer number failed the core's check digits.
    InvalidCorporateIdentifier,
    /// The identifier matched no supported shape.
    InvalidIdentifierFormat,
    /// Another person is already registered with this identifier.
    IdentifierAlreadyExists,
    /// The applicant is younger than the minimum age.
    UnderageApplicant,
    /// The requested amount is below this person's minimum.
    AmountBelowMinimum { minimum: Money },
    /// The requested amount is above this person's maximum.
    AmountAboveMaximum { maximum: Money },
    /// The referenced person does not exist.
    PersonNotFound,
    /// The referenced loan does not exist.
    LoanNotFound,
    /// A rejection the adapter could not classify.
    Other(String),
}

impl std::fmt::Display for BackendRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIndividualIdentifier => {
                write!(f, "the CPF entered is not valid")
            }
            Self::InvalidCorporateIdentifier => {
                write!(f, "the CNPJ entered is not valid")
            }
            Self::InvalidIdentifierFormat => {
                write!(f, "the identifier entered is not valid")
            }
            Self::IdentifierAlreadyExists => {
                write!(f, "a person with this identifier is already registered")
            }
            Self::UnderageApplicant => {
                write!(f, "the applicant must be at least 18 years old")
            }
            Self::AmountBelowMinimum { minimum } => {
                write!(f, "the loan amount is below the minimum of {minimum}")
            }
            Self::AmountAboveMaximum { maximum } => {
                write!(f, "the loan amount is above the maximum of {maximum}")
            }
            Self::PersonNotFound => write!(f, "the person could not be found"),
            Self::LoanNotFound => write!(f, "the loan could not be found"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

/// Failures surfaced by a [`LendingBackend`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LendingBackendError {
    /// The request could not reach the core.
    #[error("lending core transport failure: {message}")]
    Transport { message: String },
    /// The core did not answer within the configured deadline.
    #[error("lending core timed out: {message}")]
    Timeout { message: String },
    /// The core answered with a body the adapter could not interpret.
    #[error("lending core response could not be decoded: {message}")]
    Decode { message: String },
    /// The core refused the action for a business reason.
    #[error("{rejection}")]
    Rejected { rejection: BackendRejection },
    /// The core reported it cannot serve requests right now.
    #[error("lending core unavailable: {message}")]
    Unavailable { message: String },
}

impl LendingBackendError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn rejected(rejection: BackendRejection) -> Self {
        Self::Rejected { rejection }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Gateway to the external lending core.
///
/// One outbound call per staff action, no retries. Implementations live in
/// [`crate::outbound`]; tests substitute [`MockLendingBackend`] or
/// [`FixtureLendingBackend`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LendingBackend: Send + Sync {
    /// Register a new person with the core.
    async fn register_person(
        &self,
        registration: &Registration,
    ) -> Result<Person, LendingBackendError>;

    /// Fetch every registered person.
    async fn list_persons(&self) -> Result<Vec<Person>, LendingBackendError>;

    /// Request a loan on behalf of a registered person.
    async fn request_loan(&self, request: &LoanRequest) -> Result<Loan, LendingBackendError>;

    /// Fetch every loan, each embedding its person.
    async fn list_loans(&self) -> Result<Vec<Loan>, LendingBackendError>;

    /// Mark a pending loan as paid. Paying a paid loan succeeds unchanged.
    async fn pay_loan(&self, id: &LoanId) -> Result<(), LendingBackendError>;
}

/// Inert [`LendingBackend`] for wiring tests: empty listings, every
/// mutation accepted with a synthetic record.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureLendingBackend;

impl FixtureLendingBackend {
    fn person_from(registration: &Registration) -> Person {
        let kind = match registration.identifier().as_ref().len() {
            14 => IdentifierKind::Corporate,
            _ => IdentifierKind::Individual,
        };
        Person::new(
            PersonId::random(),
            registration.name().clone(),
            registration.identifier().clone(),
            kind,
            *registration.birth_date(),
            LoanRange::unbounded(),
        )
    }

    fn canned_person() -> Person {
        let name = PersonName::new("Fixture Person")
            .unwrap_or_else(|error| panic!("fixture name rejected: {error}"));
        let identifier = Identifier::normalise("12345678901")
            .unwrap_or_else(|error| panic!("fixture identifier rejected: {error}"));
        let birth_date = crate::domain::person::BirthDate::parse("1990-01-01")
            .unwrap_or_else(|error| panic!("fixture birth date rejected: {error}"));
        Person::new(
            PersonId::random(),
            name,
            identifier,
            IdentifierKind::Individual,
            birth_date,
            LoanRange::unbounded(),
        )
    }
}

#[async_trait]
impl LendingBackend for FixtureLendingBackend {
    async fn register_person(
        &self,
        registration: &Registration,
    ) -> Result<Person, LendingBackendError> {
        Ok(Self::person_from(registration))
    }

    async fn list_persons(&self) -> Result<Vec<Person>, LendingBackendError> {
        Ok(Vec::new())
    }

    async fn request_loan(&self, request: &LoanRequest) -> Result<Loan, LendingBackendError> {
        Ok(Loan::new(
            LoanId::random(),
            request.amount(),
            request.installments(),
            LoanStatus::Pending,
            Utc::now(),
            Self::canned_person(),
        ))
    }

    async fn list_loans(&self) -> Result<Vec<Loan>, LendingBackendError> {
        Ok(Vec::new())
    }

    async fn pay_loan(&self, _id: &LoanId) -> Result<(), LendingBackendError> {
        Ok(())
    }
}
