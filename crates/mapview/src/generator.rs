//! The view generation algorithm, as seen from the cache layer.
//!
//! The algorithm itself lives outside this crate. The dictionary calls it
//! through [`Generator`] at most once per container, and at most once per
//! type-restricted view key.

mod config;
pub use config::Config;

mod generated;
pub use generated::Generated;

pub mod operation;
pub use operation::Operation;

use mapview_core::{schema::mapping::ContainerMapping, Result, Schema};

use std::fmt::Debug;

pub trait Generator: Debug + Send + Sync + 'static {
    /// Runs one generation operation.
    ///
    /// Problems with the mapping are reported as error diagnostics in the
    /// returned [`Generated`]; `Err` is reserved for failures of the
    /// generator itself.
    fn generate(&self, cx: &Context<'_>, op: Operation) -> Result<Generated>;
}

/// Inputs shared by every operation on one container.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub schema: &'a Schema,
    pub mapping: &'a ContainerMapping,
    pub config: &'a Config,
}
