//! mtmock-middleware: pub/sub transport abstraction
//!
//! Provides the `Transport` / `Subscription` traits the mock producers
//! publish through, a NATS implementation for real deployments and an
//! in-memory implementation for tests.

pub mod error;
pub mod memory;
pub mod nats;
pub mod transport;

pub use error::TransportError;
pub use memory::InMemoryTransport;
pub use nats::{NatsTransport, SubjectBuilder};
pub use transport::{Subscription, Transport, TransportMessage};
