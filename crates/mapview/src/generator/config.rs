/// Generation options.
///
/// Passed through to the generator and consulted by the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Look for pre-generated views before running the generator. When unset
    /// the dictionary starts in runtime generation mode.
    pub pregenerated_views: bool,

    /// Generate update views for store tables along with query views.
    pub generate_update_views: bool,

    /// Validate the mapping while generating.
    pub validate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pregenerated_views: true,
            generate_update_views: true,
            validate: true,
        }
    }
}
