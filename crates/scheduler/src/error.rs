use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
}

/// First fatal outcome observed by a [`crate::ProducerCoordinator`].
#[derive(Error, Debug)]
pub enum CoordinatorError<E>
where
    E: std::error::Error + 'static,
{
    #[error("producer {task} failed: {source}")]
    Failed {
        task: &'static str,
        #[source]
        source: E,
    },
    #[error("producer {task} panicked: {message}")]
    Panicked { task: &'static str, message: String },
}

impl<E> CoordinatorError<E>
where
    E: std::error::Error + 'static,
{
    /// Name of the producer that failed
    pub fn task(&self) -> &'static str {
        match self {
            CoordinatorError::Failed { task, .. } => task,
            CoordinatorError::Panicked { task, .. } => task,
        }
    }
}
