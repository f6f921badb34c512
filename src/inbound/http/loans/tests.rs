use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{LendingBackend, LendingBackendError, MockLendingBackend};
use crate::domain::{
    BackendRejection, BirthDate, Identifier, IdentifierKind, LoanRange, LoanStatus, Money, Person,
    PersonName,
};

const LOAN_ID: &str = "7f1f4c6e-9a14-4b6b-8c1a-2f4f0a8c9d21";
const PERSON_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn sample_person() -> Person {
    Person::new(
        PersonId::new(PERSON_ID).expect("valid id"),
        PersonName::new("Ana Souza").expect("valid name"),
        Identifier::normalise("12345678901").expect("valid identifier"),
        IdentifierKind::Individual,
        BirthDate::parse("1990-05-10").expect("valid date"),
        LoanRange::new(Money::from(3_000), Money::from(1_000_000)).expect("valid range"),
    )
}

fn sample_loan(status: LoanStatus) -> Loan {
    Loan::new(
        LoanId::new(LOAN_ID).expect("valid id"),
        Money::from(123_456),
        InstallmentCount::new(12).expect("valid count"),
        status,
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).single().expect("valid timestamp"),
        sample_person(),
    )
}

fn test_app(
    backend: impl LendingBackend + 'static,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(std::sync::Arc::new(backend))))
        .service(
            web::scope("/api/v1")
                .service(request_loan)
                .service(list_loans)
                .service(pay_loan),
        )
}

#[actix_web::test]
async fn request_returns_created_loan_with_display_fields() {
    let mut backend = MockLendingBackend::new();
    backend
        .expect_request_loan()
        .withf(|request| request.amount() == Money::from(123_456))
        .returning(|_| Ok(sample_loan(LoanStatus::Pending)));
    let app = actix_test::init_service(test_app(backend)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/loans")
        .set_json(json!({
            "personId": PERSON_ID,
            "amount": "R$ 1.234,56",
            "installments": "12"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["amount"], 123_456);
    assert_eq!(body["amountFormatted"], "R$ 1.234,56");
    assert_eq!(body["numberOfInstallments"], 12);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["payable"], true);
    assert_eq!(body["personName"], "Ana Souza");
}

#[actix_web::test]
async fn request_reports_every_invalid_field_at_once() {
    let app = actix_test::init_service(test_app(MockLendingBackend::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/loans")
        .set_json(json!({
            "personId": "not-a-uuid",
            "amount": "R$ 0,00",
            "installments": "25"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    let fields = &body["details"]["fieldErrors"];
    assert_eq!(fields["personId"], "person id must be a valid UUID");
    assert_eq!(fields["amount"], "amount must be greater than R$ 0,00");
    assert_eq!(
        fields["installments"],
        "number of installments must be between 1 and 24"
    );
}

#[actix_web::test]
async fn request_rejects_overlong_installment_input() {
    let app = actix_test::init_service(test_app(MockLendingBackend::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/loans")
        .set_json(json!({
            "personId": PERSON_ID,
            "amount": "R$ 100,00",
            "installments": "120"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["details"]["fieldErrors"]["installments"],
        "number of installments must have at most 2 characters"
    );
}

#[actix_web::test]
async fn request_surfaces_below_minimum_rejection_with_formatted_bound() {
    let mut backend = MockLendingBackend::new();
    backend.expect_request_loan().returning(|_| {
        Err(LendingBackendError::rejected(
            BackendRejection::AmountBelowMinimum {
                minimum: Money::from(3_000),
            },
        ))
    });
    let app = actix_test::init_service(test_app(backend)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/loans")
        .set_json(json!({
            "personId": PERSON_ID,
            "amount": "R$ 5,00",
            "installments": "6"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["message"],
        "the loan amount is below the minimum of R$ 30,00"
    );
}

#[actix_web::test]
async fn list_marks_paid_loans_unpayable() {
    let mut backend = MockLendingBackend::new();
    backend.expect_list_loans().returning(|| {
        Ok(vec![
            sample_loan(LoanStatus::Pending),
            sample_loan(LoanStatus::Paid),
        ])
    });
    let app = actix_test::init_service(test_app(backend)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/loans")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert!(response.status().is_success());

    let body: Value = actix_test::read_body_json(response).await;
    let rows = body.as_array().expect("array of loans");
    assert_eq!(rows[0]["payable"], true);
    assert_eq!(rows[1]["payable"], false);
    assert_eq!(rows[1]["status"], "paid");
}

#[actix_web::test]
async fn pay_returns_no_content_on_success() {
    let mut backend = MockLendingBackend::new();
    backend
        .expect_pay_loan()
        .withf(|id| id.as_ref() == LOAN_ID)
        .returning(|_| Ok(()));
    let app = actix_test::init_service(test_app(backend)).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/loans/{LOAN_ID}/pay"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn pay_rejects_malformed_loan_ids() {
    let app = actix_test::init_service(test_app(MockLendingBackend::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/loans/not-a-uuid/pay")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "loan id must be a valid UUID");
}

#[actix_web::test]
async fn pay_surfaces_missing_loans_as_not_found() {
    let mut backend = MockLendingBackend::new();
    backend
        .expect_pay_loan()
        .returning(|_| Err(LendingBackendError::rejected(BackendRejection::LoanNotFound)));
    let app = actix_test::init_service(test_app(backend)).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/loans/{LOAN_ID}/pay"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[rstest]
#[case::plain_digits("123456")]
#[case::masked("R$ 1.234,56")]
fn parse_loan_request_accepts_masked_and_plain_amounts(#[case] amount: &str) {
    let body = RequestLoanRequest {
        person_id: Some(PERSON_ID.into()),
        amount: Some(amount.into()),
        installments: Some("12".into()),
    };
    let request = parse_loan_request(&body).expect("valid request");
    assert_eq!(request.amount(), Money::from(123_456));
}
