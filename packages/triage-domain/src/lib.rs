mod error;

pub mod corpus;
pub mod ingest;
pub mod ticket;

pub use corpus::Corpus;
pub use error::{Error, Result};
pub use ticket::Ticket;
