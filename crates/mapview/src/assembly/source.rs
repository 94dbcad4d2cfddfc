use super::ViewAssembly;

use std::{collections::HashSet, fmt::Debug, sync::Arc, sync::OnceLock};

/// Decides which assemblies are scanned for pre-generated views.
pub trait ViewAssemblySource: Debug + Send + Sync + 'static {
    fn candidates(&self) -> Vec<Arc<dyn ViewAssembly>>;
}

/// Scans the assemblies already known to the host, then the entry assembly
/// and the assemblies it references directly.
///
/// The entry assembly's references are resolved once, on the first scan.
#[derive(Debug, Default)]
pub struct DefaultViewAssemblySource {
    known: Vec<Arc<dyn ViewAssembly>>,
    entry: Option<Arc<dyn ViewAssembly>>,
    entry_closure: OnceLock<Vec<Arc<dyn ViewAssembly>>>,
}

/// Scans exactly the assemblies it was given.
#[derive(Debug, Default, Clone)]
pub struct FixedViewAssemblySource {
    assemblies: Vec<Arc<dyn ViewAssembly>>,
}

impl DefaultViewAssemblySource {
    pub fn new(known: Vec<Arc<dyn ViewAssembly>>) -> Self {
        Self {
            known,
            ..Self::default()
        }
    }

    pub fn entry(mut self, entry: Arc<dyn ViewAssembly>) -> Self {
        self.entry = Some(entry);
        self
    }

    fn entry_closure(&self) -> &[Arc<dyn ViewAssembly>] {
        self.entry_closure.get_or_init(|| match &self.entry {
            Some(entry) => {
                let mut closure = vec![entry.clone()];
                closure.extend(entry.references());
                closure
            }
            None => vec![],
        })
    }
}

impl ViewAssemblySource for DefaultViewAssemblySource {
    fn candidates(&self) -> Vec<Arc<dyn ViewAssembly>> {
        let mut seen = HashSet::new();

        self.known
            .iter()
            .chain(self.entry_closure())
            .filter(|assembly| seen.insert(assembly.name().to_string()))
            .cloned()
            .collect()
    }
}

impl FixedViewAssemblySource {
    pub fn new(assemblies: Vec<Arc<dyn ViewAssembly>>) -> Self {
        Self { assemblies }
    }
}

impl ViewAssemblySource for FixedViewAssemblySource {
    fn candidates(&self) -> Vec<Arc<dyn ViewAssembly>> {
        self.assemblies.clone()
    }
}
