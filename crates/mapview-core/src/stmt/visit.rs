use super::{Expr, ExprAnd, ExprIsNull, ExprRecord, ExprRef, ExprRelationship, Query};

pub trait Visit {
    fn visit_expr(&mut self, i: &Expr) {
        visit_expr(self, i);
    }

    fn visit_expr_and(&mut self, i: &ExprAnd) {
        visit_expr_and(self, i);
    }

    fn visit_expr_is_null(&mut self, i: &ExprIsNull) {
        visit_expr_is_null(self, i);
    }

    fn visit_expr_record(&mut self, i: &ExprRecord) {
        visit_expr_record(self, i);
    }

    fn visit_expr_ref(&mut self, i: &ExprRef) {
        visit_expr_ref(self, i);
    }

    fn visit_expr_relationship(&mut self, i: &ExprRelationship) {
        visit_expr_relationship(self, i);
    }

    fn visit_query(&mut self, i: &Query) {
        visit_query(self, i);
    }
}

/// A node of the view tree that can be walked by a [`Visit`]or.
pub trait Node {
    fn visit<V: Visit>(&self, visit: V);
}

impl Node for Expr {
    fn visit<V: Visit>(&self, mut visit: V) {
        visit.visit_expr(self);
    }
}

impl Node for Query {
    fn visit<V: Visit>(&self, mut visit: V) {
        visit.visit_query(self);
    }
}

pub fn visit_expr<V>(v: &mut V, node: &Expr)
where
    V: Visit + ?Sized,
{
    match node {
        Expr::And(expr) => v.visit_expr_and(expr),
        Expr::IsNull(expr) => v.visit_expr_is_null(expr),
        Expr::Record(expr) => v.visit_expr_record(expr),
        Expr::Ref(expr) => v.visit_expr_ref(expr),
        Expr::Relationship(expr) => v.visit_expr_relationship(expr),
        Expr::Field(_) | Expr::IsOf(_) | Expr::Value(_) => {}
    }
}

pub fn visit_expr_and<V>(v: &mut V, node: &ExprAnd)
where
    V: Visit + ?Sized,
{
    for expr in node {
        v.visit_expr(expr);
    }
}

pub fn visit_expr_is_null<V>(v: &mut V, node: &ExprIsNull)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);
}

pub fn visit_expr_record<V>(v: &mut V, node: &ExprRecord)
where
    V: Visit + ?Sized,
{
    for expr in node {
        v.visit_expr(expr);
    }
}

pub fn visit_expr_ref<V>(v: &mut V, node: &ExprRef)
where
    V: Visit + ?Sized,
{
    v.visit_expr_record(&node.key);
}

pub fn visit_expr_relationship<V>(v: &mut V, node: &ExprRelationship)
where
    V: Visit + ?Sized,
{
    for expr in &node.ends {
        v.visit_expr(expr);
    }
}

pub fn visit_query<V>(v: &mut V, node: &Query)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.filter);
    v.visit_expr(&node.returning);
}

pub fn for_each_expr<F>(node: &impl Node, f: F)
where
    F: FnMut(&Expr),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F> Visit for ForEach<F>
    where
        F: FnMut(&Expr),
    {
        fn visit_expr(&mut self, node: &Expr) {
            visit_expr(self, node);
            (self.f)(node);
        }
    }

    node.visit(ForEach { f });
}

/// Returns `true` if any expression reachable from `node` satisfies `f`.
pub fn any_expr<F>(node: &impl Node, mut f: F) -> bool
where
    F: FnMut(&Expr) -> bool,
{
    let mut found = false;
    for_each_expr(node, |expr| found |= f(expr));
    found
}
