// Processing Delay Port
// Simulated work duration; the uniform random implementation lives in infra-system

use std::time::Duration;

/// Decides how long the simulated work of one job takes
pub trait ProcessingDelay: Send + Sync {
    fn next_delay(&self) -> Duration;
}

/// Constant delay (tests and demos)
pub struct FixedDelay(pub Duration);

impl ProcessingDelay for FixedDelay {
    fn next_delay(&self) -> Duration {
        self.0
    }
}
