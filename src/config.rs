//! Configuration types.

use std::time::Duration;

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Agent name for identification.
    pub name: String,
    /// Base simulated processing delay before each agent reply.
    pub reply_delay: Duration,
    /// Upper bound of the random jitter added to the base delay.
    pub reply_delay_jitter: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "scholarship-agent".to_string(),
            reply_delay: Duration::from_millis(1500),
            reply_delay_jitter: Duration::from_millis(1000),
        }
    }
}

impl AgentConfig {
    /// Configuration with no simulated delay, for tests.
    pub fn instant() -> Self {
        Self {
            reply_delay: Duration::ZERO,
            reply_delay_jitter: Duration::ZERO,
            ..Self::default()
        }
    }
}
