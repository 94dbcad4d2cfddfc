use crate::view::ViewBody;
use mapview_core::{schema::Extent, Diagnostic};

use indexmap::IndexMap;

/// Output of one generation operation.
#[derive(Debug, Clone, Default)]
pub struct Generated {
    pub views: IndexMap<Extent, ViewBody>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generated {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(mut self, extent: impl Into<Extent>, body: impl Into<ViewBody>) -> Self {
        self.views.insert(extent.into(), body.into());
        self
    }

    pub fn diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(|diagnostic| diagnostic.is_warning())
    }
}
