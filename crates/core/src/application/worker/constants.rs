// Worker constants (no magic values)
use std::time::Duration;

/// Lower bound of the simulated processing time (seconds)
pub const DEFAULT_MIN_DELAY_SECS: u64 = 10;

/// Upper bound of the simulated processing time (seconds, inclusive)
pub const DEFAULT_MAX_DELAY_SECS: u64 = 20;

/// Sleep duration after worker error before retry (1s)
pub const ERROR_RECOVERY_SLEEP_DURATION: Duration = Duration::from_secs(1);

/// How long the daemon waits for the worker to stop on shutdown (5s)
pub const WORKER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
