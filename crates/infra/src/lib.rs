//! Infrastructure layer: account directory, session and the bank service.

pub mod bank;
pub mod directory;
pub mod session;

pub use bank::{BankService, DEFAULT_ACCOUNTS};
pub use directory::{AccountDirectory, InMemoryDirectory};
pub use session::Session;
