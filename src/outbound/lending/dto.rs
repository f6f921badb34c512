//! DTOs for the lending core's JSON wire format.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! validated domain records in one pass. Outbound bodies borrow from the
//! already validated domain values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::BackendRejection;
use crate::domain::{
    BirthDate, Identifier, IdentifierKind, InstallmentCount, Loan, LoanId, LoanRange, LoanRequest,
    Money, Person, PersonId, PersonName, Registration,
};

const BELOW_MINIMUM_PREFIX: &str = "Loan amount is less than the minimum allowed: ";
const ABOVE_MAXIMUM_PREFIX: &str = "Loan amount exceeds the maximum allowed: ";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PersonDto {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) identifier: String,
    pub(super) birth_date: String,
    pub(super) identifier_type: String,
    pub(super) min_loan_amount: i64,
    pub(super) max_loan_amount: i64,
}

impl PersonDto {
    pub(super) fn into_domain(self) -> Result<Person, String> {
        let id = PersonId::new(&self.id).map_err(|err| format!("person {}: {err}", self.id))?;
        let name =
            PersonName::new(self.name).map_err(|err| format!("person {}: {err}", self.id))?;
        let identifier = Identifier::normalise(&self.identifier)
            .map_err(|err| format!("person {}: {err}", self.id))?;
        let birth_date = BirthDate::parse(&self.birth_date)
            .map_err(|err| format!("person {}: {err}", self.id))?;
        let loan_range = LoanRange::new(
            Money::from(self.min_loan_amount),
            Money::from(self.max_loan_amount),
        )
        .map_err(|err| format!("person {}: {err}", self.id))?;
        Ok(Person::new(
            id,
            name,
            identifier,
            IdentifierKind::from_type_code(&self.identifier_type),
            birth_date,
            loan_range,
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoanDto {
    pub(super) id: String,
    pub(super) amount: i64,
    pub(super) number_of_installments: u8,
    pub(super) status: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) person: PersonDto,
}

impl LoanDto {
    pub(super) fn into_domain(self) -> Result<Loan, String> {
        let id = LoanId::new(&self.id).map_err(|err| format!("loan {}: {err}", self.id))?;
        let installments = InstallmentCount::new(self.number_of_installments)
            .map_err(|err| format!("loan {}: {err}", self.id))?;
        let status = self
            .status
            .parse()
            .map_err(|err| format!("loan {}: {err}", self.id))?;
        let person = self.person.into_domain()?;
        Ok(Loan::new(
            id,
            Money::from(self.amount),
            installments,
            status,
            self.created_at,
            person,
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegistrationDto<'a> {
    name: &'a str,
    identifier: &'a str,
    birth_date: String,
}

impl<'a> From<&'a Registration> for RegistrationDto<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            name: registration.name().as_ref(),
            identifier: registration.identifier().as_ref(),
            birth_date: registration.birth_date().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoanRequestDto<'a> {
    person_id: &'a str,
    amount: i64,
    number_of_installments: u8,
}

impl<'a> From<&'a LoanRequest> for LoanRequestDto<'a> {
    fn from(request: &'a LoanRequest) -> Self {
        Self {
            person_id: request.person_id().as_ref(),
            amount: request.amount().minor_units(),
            number_of_installments: request.installments().get(),
        }
    }
}

/// Error body shape used by the core for every rejection.
#[derive(Debug, Deserialize)]
pub(super) struct BackendErrorDto {
    pub(super) message: Option<String>,
}

/// Classify a core rejection message into a structured variant.
///
/// Bound violations carry the raw minor-unit figure at the end of the
/// message; anything unparsable falls through to [`BackendRejection::Other`].
pub(super) fn parse_rejection(message: &str) -> BackendRejection {
    if let Some(raw) = message.strip_prefix(BELOW_MINIMUM_PREFIX) {
        if let Ok(minimum) = raw.trim().parse::<i64>() {
            return BackendRejection::AmountBelowMinimum {
                minimum: Money::from(minimum),
            };
        }
    }
    if let Some(raw) = message.strip_prefix(ABOVE_MAXIMUM_PREFIX) {
        if let Ok(maximum) = raw.trim().parse::<i64>() {
            return BackendRejection::AmountAboveMaximum {
                maximum: Money::from(maximum),
            };
        }
    }
    match message {
        "Invalid CPF" => BackendRejection::InvalidIndividualIdentifier,
        "Invalid CNPJ" => BackendRejection::InvalidCorporateIdentifier,
        "Invalid identifier" => BackendRejection::InvalidIdentifierFormat,
        "Identifier already exists" => BackendRejection::IdentifierAlreadyExists,
        "Person must be at least 18 years old" => BackendRejection::UnderageApplicant,
        "Person not found" => BackendRejection::PersonNotFound,
        "Loan not found" => BackendRejection::LoanNotFound,
        other => BackendRejection::Other(other.to_owned()),
    }
}
