pub mod subjects;
mod transport;

pub use subjects::SubjectBuilder;
pub use transport::NatsTransport;
