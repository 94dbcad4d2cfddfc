use super::{PreGeneratedViews, ViewAssembly};
use mapview_core::{Error, Result};

use std::sync::Arc;

/// An assembly whose artifacts are embedded as JSON documents.
#[derive(Debug, Clone)]
pub struct JsonViewAssembly {
    name: String,
    documents: Vec<String>,
    references: Vec<Arc<dyn ViewAssembly>>,
}

impl JsonViewAssembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: vec![],
            references: vec![],
        }
    }

    pub fn document(mut self, json: impl Into<String>) -> Self {
        self.documents.push(json.into());
        self
    }

    pub fn artifact(self, artifact: &PreGeneratedViews) -> Result<Self> {
        let json = artifact.to_json()?;
        Ok(self.document(json))
    }

    pub fn reference(mut self, assembly: Arc<dyn ViewAssembly>) -> Self {
        self.references.push(assembly);
        self
    }
}

impl ViewAssembly for JsonViewAssembly {
    fn name(&self) -> &str {
        &self.name
    }

    fn artifacts(&self) -> Result<Vec<PreGeneratedViews>> {
        self.documents
            .iter()
            .enumerate()
            .map(|(index, json)| {
                PreGeneratedViews::from_json(json).map_err(|err| {
                    err.context(Error::from_args(format_args!(
                        "document {index} of assembly `{}`",
                        self.name
                    )))
                })
            })
            .collect()
    }

    fn references(&self) -> Vec<Arc<dyn ViewAssembly>> {
        self.references.clone()
    }
}
