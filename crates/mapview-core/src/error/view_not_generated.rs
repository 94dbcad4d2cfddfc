use super::Error;

/// Error when a mapped extent has no view after every lookup fallback.
///
/// This points at a defect in the mapping or in the generation algorithm;
/// well-formed mappings never produce it.
#[derive(Debug)]
pub(super) struct ViewNotGeneratedError {
    extent: Box<str>,
}

impl std::error::Error for ViewNotGeneratedError {}

impl core::fmt::Display for ViewNotGeneratedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no view was generated for extent `{}`", self.extent)
    }
}

impl Error {
    /// Creates a view-not-generated error for the named extent.
    pub fn view_not_generated(extent: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ViewNotGenerated(ViewNotGeneratedError {
            extent: extent.into().into(),
        }))
    }

    /// Returns `true` if this error is a view-not-generated error.
    pub fn is_view_not_generated(&self) -> bool {
        self.find_kind(|kind| match kind {
            super::ErrorKind::ViewNotGenerated(err) => Some(err),
            _ => None,
        })
        .is_some()
    }
}
