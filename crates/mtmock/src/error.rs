use thiserror::Error;

use mtmock_middleware::TransportError;
use mtmock_scheduler::ScheduleError;

/// Fatal producer failure. Trips the shared shutdown signal.
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}
