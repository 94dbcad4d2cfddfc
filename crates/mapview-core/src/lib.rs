mod error;
pub use error::{Diagnostic, Error, IntoError, Severity};

pub mod schema;
pub use schema::Schema;

pub mod stmt;

/// A Result type alias that uses the crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
