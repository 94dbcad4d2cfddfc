use mapview_core::Result;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Views generated ahead of time for one container pair.
///
/// Untrusted input: it is only adopted after `container_pair` matches a live
/// mapping and `hash` matches that mapping's closure hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreGeneratedViews {
    /// `Conceptual:Store` container names the views were generated for
    pub container_pair: String,

    /// Closure hash of the mapping at generation time, 64 hex characters
    pub hash: String,

    /// View text keyed by qualified extent name
    pub views: IndexMap<String, String>,
}

impl PreGeneratedViews {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
