//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the staff REST API. The generated document backs Swagger UI in debug
//! builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::loans::{LoanResponse, RequestLoanRequest};
use crate::inbound::http::persons::{PersonResponse, RegisterPersonRequest};

/// OpenAPI document for the staff REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending desk API",
        description = "HTTP interface for registering people, originating loans, and settling them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::persons::register_person,
        crate::inbound::http::persons::list_persons,
        crate::inbound::http::loans::request_loan,
        crate::inbound::http::loans::list_loans,
        crate::inbound::http::loans::pay_loan,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterPersonRequest,
        PersonResponse,
        RequestLoanRequest,
        LoanResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "persons", description = "Person registration and listing"),
        (name = "loans", description = "Loan origination, listing, and settlement"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
