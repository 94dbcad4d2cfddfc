use super::{Diagnostic, Error};

/// Error when the mapping is inconsistent with the views resolved for it.
///
/// Raised when:
/// - A pre-generated view artifact was built from a different mapping
/// - Two association sets ambiguously match the same foreign key pattern
/// - The view generation algorithm reports error diagnostics
///
/// The mapping is immutable for the lifetime of the views built from it, so
/// these errors are never retried; the same failure is reproduced until the
/// mapping or the artifact is fixed.
#[derive(Debug)]
pub(super) struct MappingError {
    message: Box<str>,
    diagnostics: Vec<Diagnostic>,
}

impl std::error::Error for MappingError {}

impl core::fmt::Display for MappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "mapping error: {}", self.message)?;

        for diagnostic in &self.diagnostics {
            write!(f, "\n  {diagnostic}")?;
        }

        Ok(())
    }
}

impl Error {
    /// Creates a mapping error with no attached diagnostics.
    pub fn mapping(message: impl Into<String>) -> Error {
        Error::mapping_with_diagnostics(message, vec![])
    }

    /// Creates a mapping error carrying the full diagnostic list reported by
    /// view generation.
    pub fn mapping_with_diagnostics(
        message: impl Into<String>,
        diagnostics: Vec<Diagnostic>,
    ) -> Error {
        Error::from(super::ErrorKind::Mapping(MappingError {
            message: message.into().into(),
            diagnostics,
        }))
    }

    /// Returns `true` if this error is a mapping error.
    pub fn is_mapping(&self) -> bool {
        self.find_kind(|kind| match kind {
            super::ErrorKind::Mapping(err) => Some(err),
            _ => None,
        })
        .is_some()
    }

    /// Diagnostics attached to the mapping error in this chain, if any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.find_kind(|kind| match kind {
            super::ErrorKind::Mapping(err) => Some(err),
            _ => None,
        })
        .map(|err| &err.diagnostics[..])
        .unwrap_or(&[])
    }
}
