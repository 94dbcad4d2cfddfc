use crate::view::{GeneratedView, Origin};
use mapview_core::{
    schema::{
        app::{Association, AssociationSet, AssociationSetId, ForeignKey},
        Extent,
    },
    stmt::{Expr, Query, Source},
    Error, Result, Schema,
};

use tracing::debug;

/// Builds the query view of a foreign-key association set without running
/// the generator.
///
/// The view scans the dependent entity set and turns each row into a
/// relationship instance. The principal end is referenced through the
/// dependent's foreign-key values, so the principal's storage is never read.
#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyViews<'a> {
    schema: &'a Schema,
}

impl<'a> ForeignKeyViews<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Returns `true` if views of `set` are synthesized here.
    pub fn applies_to(&self, set: AssociationSetId) -> bool {
        let set = self.schema.app.association_set(set);
        self.schema
            .app
            .association(set.association)
            .foreign_key()
            .is_some()
    }

    /// Synthesizes the view of `set`.
    ///
    /// Returns `Ok(None)` when the association is not foreign-key backed.
    pub fn synthesize(&self, id: AssociationSetId) -> Result<Option<GeneratedView>> {
        let set = self.schema.app.association_set(id);
        let association = self.schema.app.association(set.association);

        let Some(fk) = association.foreign_key() else {
            return Ok(None);
        };

        if association.is_abstract {
            debug!(association = %association.name, "abstract foreign-key association");
            return Err(Error::view_not_generated(
                self.schema.extent_name(Extent::AssociationSet(id)),
            ));
        }

        self.verify_unambiguous(set, association, fk)?;

        let query = self.query(set, association, fk);
        Ok(Some(GeneratedView::new(
            self.schema,
            Extent::AssociationSet(id),
            query.into(),
            Origin::ForeignKey,
        )))
    }

    fn query(&self, set: &AssociationSet, association: &Association, fk: &ForeignKey) -> Query {
        let app = &self.schema.app;

        let dependent_set = set.ends[fk.dependent];
        let dependent = association.end(fk.dependent);
        let principal = association.end(fk.principal);

        // Foreign-key fields in the order of the principal key they reference
        let sources = app
            .key_fields(principal.model)
            .iter()
            .filter_map(|target| {
                fk.fields
                    .iter()
                    .find(|field| field.target == *target)
                    .map(|field| field.source)
            })
            .collect::<Vec<_>>();

        let ends = (0..2)
            .map(|index| {
                if index == fk.dependent {
                    // The dependent, by its own key
                    let key = app.key_fields(dependent.model);
                    Expr::create_ref(
                        dependent_set,
                        key.iter().map(|field| Expr::field(*field)).collect::<Vec<_>>(),
                    )
                } else {
                    // The principal, by the foreign-key values
                    let values = sources.iter().map(|field| Expr::field(*field)).collect::<Vec<_>>();
                    Expr::create_ref(set.ends[fk.principal], values)
                }
            })
            .collect();

        let mut query = Query::new(
            Source::scan(dependent_set),
            Expr::relationship(association.id, ends),
        );

        if app.is_strict_subtype(dependent.model, self.schema.element_type(dependent_set)) {
            query.add_filter(Expr::is_of(dependent.model));
        }

        // A null foreign key means there is no relationship instance.
        if principal.multiplicity.is_optional() {
            for source in &sources {
                query.add_filter(Expr::is_not_null(Expr::field(*source)));
            }
        }

        query
    }

    /// Another set of the same association reading the same dependent entity
    /// set would describe the same relationship instances.
    fn verify_unambiguous(
        &self,
        set: &AssociationSet,
        association: &Association,
        fk: &ForeignKey,
    ) -> Result<()> {
        let container = self.schema.app.container(set.id.container);
        let dependent_set = set.ends[fk.dependent];

        let conflict = container.association_sets.iter().find(|other| {
            other.id != set.id
                && other.association == association.id
                && other.ends[fk.dependent] == dependent_set
        });

        match conflict {
            Some(other) => Err(Error::mapping(format!(
                "association sets `{}` and `{}` both map foreign key `{}` on entity set `{}`",
                set.name,
                other.name,
                association.name,
                self.schema.app.entity_set(dependent_set).name
            ))),
            None => Ok(()),
        }
    }
}
