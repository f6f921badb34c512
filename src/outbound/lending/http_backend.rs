//! Reqwest-backed lending-core adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into validated domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;
use tracing::debug;

use super::dto::{BackendErrorDto, LoanDto, LoanRequestDto, PersonDto, RegistrationDto,
    parse_rejection};
use crate::domain::ports::{LendingBackend, LendingBackendError};
use crate::domain::{Loan, LoanId, LoanRequest, Person, Registration};

/// Lending-core adapter performing JSON requests against one base URL.
pub struct LendingHttpBackend {
    client: Client,
    base_url: Url,
}

impl LendingHttpBackend {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, LendingBackendError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                LendingBackendError::transport("base URL cannot carry path segments")
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, LendingBackendError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "lending core GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_body(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, LendingBackendError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "lending core POST");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_body(response).await
    }

    async fn post_empty(&self, segments: &[&str]) -> Result<(), LendingBackendError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "lending core POST");
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(())
    }
}

async fn decode_body<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, LendingBackendError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref()).map_err(|error| {
        LendingBackendError::decode(format!("invalid lending core JSON payload: {error}"))
    })
}

#[async_trait]
impl LendingBackend for LendingHttpBackend {
    async fn register_person(
        &self,
        registration: &Registration,
    ) -> Result<Person, LendingBackendError> {
        let dto: PersonDto = self
            .post_json(&["person"], &RegistrationDto::from(registration))
            .await?;
        dto.into_domain().map_err(LendingBackendError::decode)
    }

    async fn list_persons(&self) -> Result<Vec<Person>, LendingBackendError> {
        let dtos: Vec<PersonDto> = self.get_json(&["person"]).await?;
        dtos.into_iter()
            .map(|dto| dto.into_domain().map_err(LendingBackendError::decode))
            .collect()
    }

    async fn request_loan(&self, request: &LoanRequest) -> Result<Loan, LendingBackendError> {
        let dto: LoanDto = self
            .post_json(&["loans"], &LoanRequestDto::from(request))
            .await?;
        dto.into_domain().map_err(LendingBackendError::decode)
    }

    async fn list_loans(&self) -> Result<Vec<Loan>, LendingBackendError> {
        let dtos: Vec<LoanDto> = self.get_json(&["loans"]).await?;
        dtos.into_iter()
            .map(|dto| dto.into_domain().map_err(LendingBackendError::decode))
            .collect()
    }

    async fn pay_loan(&self, id: &LoanId) -> Result<(), LendingBackendError> {
        self.post_empty(&["loans", id.as_ref(), "pay"]).await
    }
}

fn map_transport_error(error: reqwest::Error) -> LendingBackendError {
    if error.is_timeout() {
        LendingBackendError::timeout(error.to_string())
    } else {
        LendingBackendError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> LendingBackendError {
    let message = serde_json::from_slice::<BackendErrorDto>(body)
        .ok()
        .and_then(|dto| dto.message);

    if status.is_client_error() {
        if let Some(message) = message {
            return LendingBackendError::rejected(parse_rejection(&message));
        }
    }

    let preview = body_preview(body);
    let detail = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            LendingBackendError::unavailable(detail)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            LendingBackendError::timeout(detail)
        }
        _ => LendingBackendError::transport(detail),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
