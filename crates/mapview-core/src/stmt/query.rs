use super::{Expr, Source};
use crate::Schema;

/// A complete query view: scan `source`, keep the rows matching `filter` and
/// produce one `returning` value per surviving row.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub source: Source,

    /// Row filter. `true` when every row is kept.
    pub filter: Expr,

    /// Expression evaluated once per surviving row.
    pub returning: Expr,
}

impl Query {
    pub fn new(source: Source, returning: impl Into<Expr>) -> Self {
        Self {
            source,
            filter: true.into(),
            returning: returning.into(),
        }
    }

    /// Narrows the rows returned by the query with an additional predicate.
    pub fn add_filter(&mut self, filter: impl Into<Expr>) {
        let filter = filter.into();
        self.filter = Expr::and(std::mem::take(&mut self.filter), filter);
    }

    /// Renders the query in its textual form, resolving ids through `schema`.
    pub fn to_text(&self, schema: &Schema) -> String {
        super::print::Printer::new(schema).query(self)
    }
}
