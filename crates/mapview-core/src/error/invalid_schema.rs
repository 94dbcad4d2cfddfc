use super::Error;

/// Error when a schema or mapping definition is structurally invalid.
///
/// This occurs when:
/// - Names are duplicated within a container
/// - A mapping references an extent, field or column that does not exist
/// - A foreign key's field lists do not line up
/// - A type hierarchy contains a cycle
///
/// These errors are raised while the schema is built, before any view is
/// requested.
#[derive(Debug)]
pub(super) struct InvalidSchemaError {
    message: Box<str>,
}

impl std::error::Error for InvalidSchemaError {}

impl core::fmt::Display for InvalidSchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchemaError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.find_kind(|kind| match kind {
            super::ErrorKind::InvalidSchema(err) => Some(err),
            _ => None,
        })
        .is_some()
    }
}
