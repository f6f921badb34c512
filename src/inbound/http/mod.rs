//! HTTP inbound adapter exposing the staff REST endpoints.

pub mod error;
pub mod health;
pub mod loans;
pub mod persons;
pub mod state;
pub mod validation;

pub use crate::domain::ApiResult;
