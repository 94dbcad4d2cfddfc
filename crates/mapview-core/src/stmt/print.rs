use super::{Expr, Query, Source};
use crate::{schema::Extent, Schema};

use std::fmt::Write;

/// Renders query views as text.
///
/// The scanned row is always aliased `T`.
pub(crate) struct Printer<'a> {
    schema: &'a Schema,
    out: String,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            out: String::new(),
        }
    }

    pub(crate) fn query(mut self, query: &Query) -> String {
        self.out.push_str("SELECT VALUE ");
        self.expr(&query.returning);

        match &query.source {
            Source::Scan(extent) => {
                self.out.push_str(" FROM ");
                self.extent(*extent);
                self.out.push_str(" AS T");
            }
        }

        if !query.filter.is_true() {
            self.out.push_str(" WHERE ");
            self.expr(&query.filter);
        }

        self.out
    }

    fn extent(&mut self, extent: Extent) {
        let name = self.schema.extent_name(extent);
        self.out.push_str(&name);
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::And(expr_and) => self.list(&expr_and.operands, " AND "),
            Expr::Field(expr) => {
                let field = self.schema.app.field(expr.field);
                let _ = write!(self.out, "T.{}", field.name);
            }
            Expr::IsNull(expr) => {
                self.expr(&expr.expr);
                self.out.push_str(if expr.negate {
                    " IS NOT NULL"
                } else {
                    " IS NULL"
                });
            }
            Expr::IsOf(expr) => {
                let model = self.schema.app.model(expr.ty);
                let only = if expr.only { "ONLY " } else { "" };
                let _ = write!(self.out, "T IS OF ({only}{})", model.name);
            }
            Expr::Record(expr) => {
                self.out.push_str("ROW(");
                self.list(&expr.fields, ", ");
                self.out.push(')');
            }
            Expr::Ref(expr) => {
                self.out.push_str("CreateRef(");
                self.extent(expr.entity_set.into());
                self.out.push_str(", ROW(");
                self.list(&expr.key.fields, ", ");
                self.out.push_str("))");
            }
            Expr::Relationship(expr) => {
                let association = self.schema.app.association(expr.association);
                let _ = write!(self.out, "{}(", association.name);
                self.list(&expr.ends, ", ");
                self.out.push(')');
            }
            Expr::Value(value) => {
                let _ = write!(self.out, "{value}");
            }
        }
    }

    fn list(&mut self, exprs: &[Expr], separator: &str) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            self.expr(expr);
        }
    }
}
