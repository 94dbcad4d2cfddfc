mod generated;
pub use generated::{GeneratedView, Origin, ViewBody};

mod key;
pub use key::{OfTypeKey, ViewKey};
