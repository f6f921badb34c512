//! Loan origination, listing, and payment handlers.
//!
//! ```text
//! POST /api/v1/loans {"personId":"...","amount":"R$ 1.234,56","installments":"12"}
//! GET /api/v1/loans
//! POST /api/v1/loans/{id}/pay
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ApiResult, Error, InstallmentCount, Loan, LoanId, LoanRequest, PersonId, parse_positive_amount,
};
use crate::inbound::http::error::map_backend_error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::FieldErrors;

/// Origination form body for `POST /api/v1/loans`.
///
/// The amount arrives as masked display text and the installment count as
/// the raw characters typed into the form.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestLoanRequest {
    pub person_id: Option<String>,
    pub amount: Option<String>,
    pub installments: Option<String>,
}

/// Loan row returned to staff clients.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    pub id: String,
    pub person_id: String,
    pub person_name: String,
    pub person_identifier_formatted: String,
    pub amount: i64,
    pub amount_formatted: String,
    pub number_of_installments: u8,
    pub status: String,
    pub payable: bool,
    pub created_at: String,
}

impl From<&Loan> for LoanResponse {
    fn from(loan: &Loan) -> Self {
        let person = loan.person();
        Self {
            id: loan.id().to_string(),
            person_id: person.id().to_string(),
            person_name: person.name().to_string(),
            person_identifier_formatted: person.formatted_identifier(),
            amount: loan.amount().minor_units(),
            amount_formatted: loan.amount().format_brl(),
            number_of_installments: loan.installments().get(),
            status: loan.status().to_string(),
            payable: loan.is_payable(),
            created_at: loan.created_at().to_rfc3339(),
        }
    }
}

/// Validate the origination form, reporting every field failure at once.
fn parse_loan_request(body: &RequestLoanRequest) -> Result<LoanRequest, Error> {
    let mut errors = FieldErrors::new();

    let person_id = errors
        .require("personId", body.person_id.as_deref())
        .and_then(|raw| errors.capture("personId", PersonId::new(raw)));
    let amount = errors
        .require("amount", body.amount.as_deref())
        .and_then(|raw| errors.capture("amount", parse_positive_amount(raw)));
    let installments = errors
        .require("installments", body.installments.as_deref())
        .and_then(|raw| errors.capture("installments", InstallmentCount::parse(raw)));

    errors.finish()?;
    match (person_id, amount, installments) {
        (Some(person_id), Some(amount), Some(installments)) => {
            Ok(LoanRequest::new(person_id, amount, installments))
        }
        _ => Err(Error::internal("loan validation lost a field")),
    }
}

/// Request a loan for a registered person.
#[utoipa::path(
    post,
    path = "/api/v1/loans",
    request_body = RequestLoanRequest,
    responses(
        (status = 201, description = "Loan originated", body = LoanResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Person not found", body = Error),
        (status = 503, description = "Lending core unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["loans"],
    operation_id = "requestLoan"
)]
#[post("/loans")]
pub async fn request_loan(
    state: web::Data<HttpState>,
    payload: web::Json<RequestLoanRequest>,
) -> ApiResult<HttpResponse> {
    let request = parse_loan_request(&payload)?;
    let loan = state
        .backend
        .request_loan(&request)
        .await
        .map_err(map_backend_error)?;
    Ok(HttpResponse::Created().json(LoanResponse::from(&loan)))
}

/// List every loan, each embedding its person.
#[utoipa::path(
    get,
    path = "/api/v1/loans",
    responses(
        (status = 200, description = "Loans", body = [LoanResponse]),
        (status = 503, description = "Lending core unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["loans"],
    operation_id = "listLoans"
)]
#[get("/loans")]
pub async fn list_loans(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<LoanResponse>>> {
    let loans = state.backend.list_loans().await.map_err(map_backend_error)?;
    Ok(web::Json(loans.iter().map(LoanResponse::from).collect()))
}

/// Mark a loan as paid. Paying an already paid loan is a no-op success.
#[utoipa::path(
    post,
    path = "/api/v1/loans/{id}/pay",
    params(("id" = String, Path, description = "Loan identifier")),
    responses(
        (status = 204, description = "Loan settled"),
        (status = 400, description = "Invalid loan id", body = Error),
        (status = 404, description = "Loan not found", body = Error),
        (status = 503, description = "Lending core unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["loans"],
    operation_id = "payLoan"
)]
#[post("/loans/{id}/pay")]
pub async fn pay_loan(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = LoanId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    state
        .backend
        .pay_loan(&id)
        .await
        .map_err(map_backend_error)?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
