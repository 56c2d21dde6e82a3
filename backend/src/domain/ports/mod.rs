//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod service_probe;
mod standards_backend;

#[cfg(test)]
pub use service_probe::MockServiceProbe;
pub use service_probe::{FixtureServiceProbe, ServiceProbe};
#[cfg(test)]
pub use standards_backend::MockStandardsBackend;
pub use standards_backend::{FixtureStandardsBackend, StandardsBackend, StandardsBackendError};
