//! Discovery of pre-generated view artifacts.
//!
//! An assembly is any unit that may carry pre-generated views. How assemblies
//! are located and how their artifacts are stored is up to the host; this
//! module only needs the declarative records they yield.

mod artifact;
pub use artifact::PreGeneratedViews;

mod cache;
pub use cache::AssemblyCache;

mod json;
pub use json::JsonViewAssembly;

mod source;
pub use source::{DefaultViewAssemblySource, FixedViewAssemblySource, ViewAssemblySource};

use mapview_core::Result;

use std::{fmt::Debug, sync::Arc};

pub trait ViewAssembly: Debug + Send + Sync + 'static {
    /// Identifies the assembly in logs and de-duplicates scan results.
    fn name(&self) -> &str;

    /// Loads the pre-generated view artifacts the assembly carries.
    ///
    /// A failure makes the assembly unusable as a source of views; it is
    /// logged and skipped by the caller.
    fn artifacts(&self) -> Result<Vec<PreGeneratedViews>>;

    /// Assemblies this one references directly.
    fn references(&self) -> Vec<Arc<dyn ViewAssembly>> {
        vec![]
    }
}
