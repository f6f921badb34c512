//! Outbound ports.
//!
//! Traits the domain depends on, implemented by adapters in
//! [`crate::outbound`]. Handlers talk to these traits so the lending core
//! can be swapped for fixtures in tests.

mod lending_backend;

pub use lending_backend::{
    BackendRejection, FixtureLendingBackend, LendingBackend, LendingBackendError,
};

#[cfg(test)]
pub use lending_backend::MockLendingBackend;
