//! Lending-core outbound adapter.
//!
//! A thin HTTP implementation of the `LendingBackend` port.

mod dto;
mod http_backend;

pub use http_backend::LendingHttpBackend;
