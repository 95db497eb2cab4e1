// Uniform random processing delay
use rand::Rng;
use std::time::Duration;

use promptmock_core::application::worker::constants::{
    DEFAULT_MAX_DELAY_SECS, DEFAULT_MIN_DELAY_SECS,
};
use promptmock_core::port::ProcessingDelay;
use promptmock_core::{AppError, Result};

/// Whole-second delay drawn uniformly from `[min_secs, max_secs]`
#[derive(Debug, Clone)]
pub struct UniformDelay {
    min_secs: u64,
    max_secs: u64,
}

impl UniformDelay {
    pub fn new(min_secs: u64, max_secs: u64) -> Result<Self> {
        if min_secs > max_secs {
            return Err(AppError::Config(format!(
                "min delay {}s exceeds max delay {}s",
                min_secs, max_secs
            )));
        }
        Ok(Self { min_secs, max_secs })
    }
}

impl Default for UniformDelay {
    fn default() -> Self {
        Self {
            min_secs: DEFAULT_MIN_DELAY_SECS,
            max_secs: DEFAULT_MAX_DELAY_SECS,
        }
    }
}

impl ProcessingDelay for UniformDelay {
    fn next_delay(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }
}
