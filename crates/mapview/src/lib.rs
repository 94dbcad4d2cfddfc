pub mod assembly;
pub use assembly::{AssemblyCache, PreGeneratedViews, ViewAssembly, ViewAssemblySource};

mod closure_hash;
pub use closure_hash::ClosureHash;

pub mod dictionary;
pub use dictionary::{Mode, ViewDictionary};

mod fk;
pub use fk::ForeignKeyViews;

pub mod generator;
pub use generator::{Config, Generator};

mod members;
pub use members::{interesting_members, Member, Scenario};

mod memoizer;
pub use memoizer::Memoizer;

mod user_views;
pub use user_views::UserViews;

pub mod view;
pub use view::{GeneratedView, OfTypeKey, Origin, ViewBody, ViewKey};

pub use mapview_core::{schema, stmt, Diagnostic, Error, Result, Schema, Severity};
