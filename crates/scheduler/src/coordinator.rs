use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::error::CoordinatorError;
use crate::shutdown::ShutdownSignal;

type Joined<E> = (&'static str, Result<Result<(), E>, String>);

/// Runs producer tasks under one shared [`ShutdownSignal`].
///
/// The first task to fail (or panic) trips the signal so the rest wind down
/// at their next check point. [`wait`](Self::wait) returns only after every
/// task has returned, reporting that first failure.
pub struct ProducerCoordinator<E> {
    shutdown: ShutdownSignal,
    tasks: JoinSet<Joined<E>>,
}

impl<E> ProducerCoordinator<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    pub fn new(shutdown: ShutdownSignal) -> Self {
        Self {
            shutdown,
            tasks: JoinSet::new(),
        }
    }

    pub fn shutdown(&self) -> &ShutdownSignal {
        &self.shutdown
    }

    /// Start a producer. It receives its own handle on the shared signal.
    pub fn spawn<F, Fut>(&mut self, name: &'static str, producer: F)
    where
        F: FnOnce(ShutdownSignal) -> Fut,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        let task = producer(self.shutdown.clone());
        debug!(task = name, "spawning producer");
        self.tasks.spawn(async move {
            let outcome = AssertUnwindSafe(task)
                .catch_unwind()
                .await
                .map_err(panic_message);
            (name, outcome)
        });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Block until every producer has returned.
    ///
    /// Successful completion of one producer does not stop the others.
    pub async fn wait(mut self) -> Result<(), CoordinatorError<E>> {
        let mut first_failure: Option<CoordinatorError<E>> = None;

        while let Some(joined) = self.tasks.join_next().await {
            let failure = match joined {
                Ok((task, Ok(Ok(())))) => {
                    info!(task, "producer finished");
                    continue;
                }
                Ok((task, Ok(Err(source)))) => CoordinatorError::Failed { task, source },
                Ok((task, Err(message))) => CoordinatorError::Panicked { task, message },
                Err(e) => CoordinatorError::Panicked {
                    task: "<unknown>",
                    message: e.to_string(),
                },
            };

            if first_failure.is_none() {
                error!(task = failure.task(), error = %failure, "producer failed, shutting down remaining producers");
                self.shutdown.trigger();
                first_failure = Some(failure);
            } else {
                error!(task = failure.task(), error = %failure, "producer failed during shutdown");
            }
        }

        match first_failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
