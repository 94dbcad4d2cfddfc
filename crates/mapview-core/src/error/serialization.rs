use super::Error;

/// Error when a serialized artifact cannot be decoded.
#[derive(Debug)]
pub(super) struct SerializationError {
    inner: serde_json::Error,
}

impl std::error::Error for SerializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl core::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "malformed artifact: {}", self.inner)
    }
}

impl From<serde_json::Error> for Error {
    fn from(inner: serde_json::Error) -> Error {
        Error::from(super::ErrorKind::Serialization(SerializationError { inner }))
    }
}

impl Error {
    /// Returns `true` if this error came from decoding a malformed artifact.
    pub fn is_serialization(&self) -> bool {
        self.find_kind(|kind| match kind {
            super::ErrorKind::Serialization(err) => Some(err),
            _ => None,
        })
        .is_some()
    }
}
