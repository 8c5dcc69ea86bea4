//! mtmock-scheduler: time-aligned, cancellable scheduling
//!
//! - [`AlignedRange`]: finite backfill of period boundaries in `(from, to]`
//! - [`PeriodicSchedule`]: unbounded live ticks on wall-clock boundaries
//! - [`PollLoop`]: step counter for bounded-timeout receive loops
//! - [`ShutdownSignal`]: the single process-wide cancellation scope
//! - [`ProducerCoordinator`]: fail-fast supervisor for producer tasks
//!
//! Every sequence checks the shutdown signal before yielding, so nothing is
//! emitted once it has tripped.

pub mod coordinator;
pub mod error;
pub mod period;
pub mod periodic;
pub mod poll;
pub mod range;
pub mod shutdown;

pub use coordinator::ProducerCoordinator;
pub use error::{CoordinatorError, ScheduleError};
pub use period::Period;
pub use periodic::{PeriodicSchedule, Tick};
pub use poll::PollLoop;
pub use range::AlignedRange;
pub use shutdown::ShutdownSignal;
