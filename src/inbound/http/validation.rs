//! Shared validation helpers for inbound HTTP handlers.
//!
//! Staff forms submit every field as free text. Handlers validate each
//! field independently and report all rejections at once so a form can
//! mark every offending input in a single round trip.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde_json::json;

use crate::domain::Error;

/// Collector mapping field names to one displayable rejection each.
///
/// `BTreeMap` keeps `fieldErrors` keys ordered deterministically.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a rejection for `field`, keeping the first one reported.
    pub(crate) fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Unwrap `result`, recording its error against `field`.
    pub(crate) fn capture<T, E: Display>(
        &mut self,
        field: &'static str,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.reject(field, err.to_string());
                None
            }
        }
    }

    /// Unwrap a required field, recording `missing` when it is absent.
    pub(crate) fn require<'a>(
        &mut self,
        field: &'static str,
        value: Option<&'a str>,
    ) -> Option<&'a str> {
        if value.is_none() {
            self.reject(field, format!("{field} is required"));
        }
        value
    }

    /// Convert collected rejections into one `invalid_request` error, or
    /// `Ok(())` when every field passed.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(
            Error::invalid_request("one or more fields failed validation")
                .with_details(json!({ "fieldErrors": self.errors })),
        )
    }
}
