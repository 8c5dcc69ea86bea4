use std::iter::FusedIterator;

use crate::shutdown::ShutdownSignal;

/// Step counter for receive loops: yields 0, 1, 2, ... until shutdown.
///
/// Performs no waiting. Pair each step with one bounded-timeout receive so
/// shutdown is observed within that timeout.
#[derive(Debug, Clone)]
pub struct PollLoop {
    shutdown: ShutdownSignal,
    step: u64,
}

impl PollLoop {
    pub fn new(shutdown: ShutdownSignal) -> Self {
        Self { shutdown, step: 0 }
    }
}

impl Iterator for PollLoop {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.shutdown.is_triggered() {
            return None;
        }
        let step = self.step;
        self.step += 1;
        Some(step)
    }
}

// Shutdown never un-trips
impl FusedIterator for PollLoop {}
