//! Core business logic, transport agnostic.
//!
//! Validated value types for persons and loans, monetary and identifier
//! formatting, the shared API error payload, and the outbound port to the
//! lending core. Everything here is pure and synchronous except the port
//! trait itself.

pub mod error;
pub mod identifier;
pub mod loan;
pub mod money;
pub mod person;
pub mod ports;

pub use error::{Error, ErrorCode};
pub use identifier::{Identifier, IdentifierKind, IdentifierValidationError};
pub use loan::{
    INSTALLMENTS_INPUT_LIMIT, INSTALLMENTS_MAX, INSTALLMENTS_MIN, InstallmentCount, Loan, LoanId,
    LoanRequest, LoanStatus, LoanValidationError, parse_positive_amount,
};
pub use money::{Money, MoneyParseError};
pub use person::{
    BirthDate, LoanRange, MINIMUM_AGE_YEARS, Person, PersonId, PersonName, PersonValidationError,
    Registration,
};
pub use ports::{BackendRejection, FixtureLendingBackend, LendingBackend, LendingBackendError};

/// Result alias for handlers returning the shared API error payload.
pub type ApiResult<T> = Result<T, Error>;
