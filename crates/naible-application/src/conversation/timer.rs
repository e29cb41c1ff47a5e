//! Step timer driving the automatic site-assembly transition.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait StepTimer: Send + Sync {
    /// Resolves once `delay` has elapsed.
    async fn wait(&self, delay: Duration);
}

/// Sleeps on the tokio clock, so paused-time tests can advance it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioStepTimer;

#[async_trait]
impl StepTimer for TokioStepTimer {
    async fn wait(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateStepTimer;

#[async_trait]
impl StepTimer for ImmediateStepTimer {
    async fn wait(&self, _delay: Duration) {}
}
