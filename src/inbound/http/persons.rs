//! Person registration and listing handlers.
//!
//! ```text
//! POST /api/v1/persons {"name":"Ana","identifier":"123.456.789-01","birthDate":"1990-05-10"}
//! GET /api/v1/persons
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{
    ApiResult, BirthDate, Error, Identifier, MINIMUM_AGE_YEARS, Person, PersonName,
    PersonValidationError, Registration,
};
use crate::inbound::http::error::map_backend_error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::FieldErrors;

/// Registration form body for `POST /api/v1/persons`.
///
/// Every field arrives as free text; the identifier may carry display
/// punctuation, which is stripped before transmission to the core.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPersonRequest {
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub birth_date: Option<String>,
}

/// Person row returned to staff clients, with display-formatted fields
/// alongside the raw values.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: String,
    pub name: String,
    pub identifier: String,
    pub identifier_formatted: String,
    pub identifier_type: String,
    pub birth_date: String,
    pub min_loan_amount: i64,
    pub max_loan_amount: i64,
    pub min_loan_amount_formatted: String,
    pub max_loan_amount_formatted: String,
}

impl From<&Person> for PersonResponse {
    fn from(person: &Person) -> Self {
        let range = person.loan_range();
        Self {
            id: person.id().to_string(),
            name: person.name().to_string(),
            identifier: person.identifier().as_ref().to_owned(),
            identifier_formatted: person.formatted_identifier(),
            identifier_type: person.identifier_kind().type_code().to_owned(),
            birth_date: person.birth_date().to_string(),
            min_loan_amount: range.minimum().minor_units(),
            max_loan_amount: range.maximum().minor_units(),
            min_loan_amount_formatted: range.minimum().format_brl(),
            max_loan_amount_formatted: range.maximum().format_brl(),
        }
    }
}

/// Validate the registration form, reporting every field failure at once.
fn parse_registration(body: &RegisterPersonRequest) -> Result<Registration, Error> {
    let mut errors = FieldErrors::new();

    let name = errors
        .require("name", body.name.as_deref())
        .and_then(|raw| errors.capture("name", PersonName::new(raw)));
    let identifier = errors
        .require("identifier", body.identifier.as_deref())
        .and_then(|raw| errors.capture("identifier", Identifier::normalise(raw)));
    let birth_date = errors
        .require("birthDate", body.birth_date.as_deref())
        .and_then(|raw| errors.capture("birthDate", BirthDate::parse(raw)));

    if let Some(birth_date) = birth_date {
        if !birth_date.is_adult_on(Utc::now().date_naive()) {
            errors.reject(
                "birthDate",
                PersonValidationError::UnderageApplicant {
                    minimum_years: MINIMUM_AGE_YEARS,
                }
                .to_string(),
            );
        }
    }

    errors.finish()?;
    match (name, identifier, birth_date) {
        (Some(name), Some(identifier), Some(birth_date)) => {
            Ok(Registration::new(name, identifier, birth_date))
        }
        // finish() errors whenever a field failed, so this is unreachable
        // in practice; fail closed instead of panicking.
        _ => Err(Error::internal("registration validation lost a field")),
    }
}

/// Register a person with the lending core.
#[utoipa::path(
    post,
    path = "/api/v1/persons",
    request_body = RegisterPersonRequest,
    responses(
        (status = 201, description = "Person registered", body = PersonResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Identifier already registered", body = Error),
        (status = 503, description = "Lending core unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["persons"],
    operation_id = "registerPerson"
)]
#[post("/persons")]
pub async fn register_person(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterPersonRequest>,
) -> ApiResult<HttpResponse> {
    let registration = parse_registration(&payload)?;
    let person = state
        .backend
        .register_person(&registration)
        .await
        .map_err(map_backend_error)?;
    Ok(HttpResponse::Created().json(PersonResponse::from(&person)))
}

/// List every registered person.
#[utoipa::path(
    get,
    path = "/api/v1/persons",
    responses(
        (status = 200, description = "Registered persons", body = [PersonResponse]),
        (status = 503, description = "Lending core unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["persons"],
    operation_id = "listPersons"
)]
#[get("/persons")]
pub async fn list_persons(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PersonResponse>>> {
    let persons = state
        .backend
        .list_persons()
        .await
        .map_err(map_backend_error)?;
    Ok(web::Json(persons.iter().map(PersonResponse::from).collect()))
}
