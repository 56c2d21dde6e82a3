//! Driven port for liveness checks against dependent services.

use async_trait::async_trait;

/// Reachability check for one dependency.
///
/// Implementations bound their own wait and fold every failure into `false`;
/// a probe never errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceProbe: Send + Sync {
    /// Report whether the dependency answered successfully.
    async fn is_reachable(&self) -> bool;
}

/// Fixture probe with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixtureServiceProbe {
    /// Value returned from every probe.
    pub reachable: bool,
}

#[async_trait]
impl ServiceProbe for FixtureServiceProbe {
    async fn is_reachable(&self) -> bool {
        self.reachable
    }
}
