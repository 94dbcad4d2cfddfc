//! Query-view expressions.
//!
//! A query view describes how the rows of one extent are produced from a
//! scan of another. The tree is intentionally small: the general view
//! generation algorithm is an external collaborator and only hands back text,
//! while views synthesized in this workspace (foreign-key associations) are
//! built from these nodes and printed with [`Query::to_text`].

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_field;
pub use expr_field::ExprField;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_is_of;
pub use expr_is_of::ExprIsOf;

mod expr_record;
pub use expr_record::ExprRecord;

mod expr_ref;
pub use expr_ref::ExprRef;

mod expr_relationship;
pub use expr_relationship::ExprRelationship;

mod print;

mod query;
pub use query::Query;

mod source;
pub use source::Source;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

pub mod visit;
