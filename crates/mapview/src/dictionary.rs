mod builder;
pub use builder::Builder;

mod mode;
pub use mode::Mode;
use mode::ModeFlag;

use crate::{
    assembly::{AssemblyCache, PreGeneratedViews},
    closure_hash::ClosureHash,
    fk::ForeignKeyViews,
    generator::{
        operation::{GenerateContainer, GenerateOfType},
        Config, Context, Generated, Generator,
    },
    members::{interesting_members, Member, Scenario},
    memoizer::Memoizer,
    user_views::UserViews,
    view::{GeneratedView, OfTypeKey, Origin, ViewBody},
};
use mapview_core::{
    err,
    schema::{
        app::{self, AssociationSetId, EntitySetId, ModelId},
        Extent,
    },
    Diagnostic, Error, Result, Schema,
};

use indexmap::{IndexMap, IndexSet};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Extent-level views of one container pair, keyed by extent.
type ContainerViews = IndexMap<Extent, Arc<GeneratedView>>;

/// Resolves the query views of a mapped schema.
///
/// Every view is computed at most once for the life of the dictionary, even
/// when requested from many threads at once, and the same `Arc` is returned
/// to every caller. Extent-level views come, in order of preference, from the
/// user's own views in the mapping, from foreign-key synthesis, from a
/// pre-generated artifact matching the mapping, or from the view generator.
///
/// The schema must not change for as long as the dictionary lives.
#[derive(Debug)]
pub struct ViewDictionary {
    schema: Arc<Schema>,
    generator: Arc<dyn Generator>,
    assemblies: Arc<AssemblyCache>,
    config: Config,
    user_views: UserViews,
    mode: ModeFlag,

    /// Keyed by the conceptual side of the container pair
    container_views: Memoizer<app::ContainerId, Result<Arc<ContainerViews>>>,

    /// `None` when the view cannot be generated for the type
    of_type_views: Memoizer<OfTypeKey, Option<Arc<GeneratedView>>>,

    fk_views: Memoizer<AssociationSetId, Result<Arc<GeneratedView>>>,
    closure_hashes: Memoizer<app::ContainerId, Option<ClosureHash>>,
    members: Memoizer<(EntitySetId, ModelId, Scenario), Result<Arc<IndexSet<Member>>>>,

    /// Warning diagnostics reported by the generator
    warnings: Mutex<Vec<Diagnostic>>,
}

impl ViewDictionary {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the view of `extent`.
    ///
    /// Fails with a "view not generated" error when no view exists after
    /// every source has been tried, and with a mapping error when the mapping
    /// is inconsistent or the generator reports errors. Failures are cached
    /// like views: asking again returns the same error.
    pub fn get_view(&self, extent: impl Into<Extent>) -> Result<Arc<GeneratedView>> {
        let extent = extent.into();

        if let Some(view) = self.user_views.get(extent) {
            return Ok(view.clone());
        }

        if let Extent::AssociationSet(set) = extent {
            if ForeignKeyViews::new(&self.schema).applies_to(set) {
                return self
                    .fk_views
                    .get_or_compute(&set, |set| self.synthesize_fk_view(*set));
            }
        }

        let container = self
            .schema
            .canonical_container(self.schema.container_of(extent))
            .ok_or_else(|| Error::view_not_generated(self.schema.extent_name(extent)))?;

        let views = self
            .container_views
            .get_or_compute(&container, |container| self.resolve_container(*container))?;

        views
            .get(&extent)
            .cloned()
            .ok_or_else(|| Error::view_not_generated(self.schema.extent_name(extent)))
    }

    /// Returns the view of `entity_set` restricted to `ty`, with or without
    /// its subtypes.
    ///
    /// `None` means there is no such view: the type is abstract, the user
    /// replaced the entity set's view without providing one for the type, or
    /// the generator cannot produce one.
    pub fn get_view_of_type(
        &self,
        entity_set: EntitySetId,
        ty: ModelId,
        include_subtypes: bool,
    ) -> Option<Arc<GeneratedView>> {
        let key = OfTypeKey::new(entity_set, ty, include_subtypes);

        if let Some(view) = self.user_views.get(key) {
            return Some(view.clone());
        }

        if self.schema.app.model(ty).is_abstract() {
            return None;
        }

        if self.user_views.overrides_extent(Extent::EntitySet(entity_set)) {
            return None;
        }

        self.of_type_views
            .get_or_compute(&key, |key| self.of_type_view(*key))
    }

    /// Returns the members of `ty` in `entity_set` that matter for
    /// `scenario`.
    pub fn interesting_members(
        &self,
        entity_set: EntitySetId,
        ty: ModelId,
        scenario: Scenario,
    ) -> Result<Arc<IndexSet<Member>>> {
        self.members
            .get_or_compute(&(entity_set, ty, scenario), |(entity_set, ty, scenario)| {
                interesting_members(&self.schema, *entity_set, *ty, *scenario).map(Arc::new)
            })
    }

    /// Closure hash of the live mapping of `container`, or `None` when the
    /// container is not mapped.
    pub fn closure_hash(&self, container: app::ContainerId) -> Option<ClosureHash> {
        self.closure_hashes
            .get_or_compute(&container, |container| {
                ClosureHash::compute(&self.schema, *container)
            })
    }

    /// Packages the extent-level views of `container` as an artifact that
    /// later runs can adopt instead of running the generator.
    pub fn export_views(&self, container: app::ContainerId) -> Result<PreGeneratedViews> {
        let Some(container) = self.schema.canonical_container(container) else {
            return Err(self.container_not_mapped(container));
        };

        let views = self
            .container_views
            .get_or_compute(&container, |container| self.resolve_container(*container))?;
        let hash = self
            .closure_hash(container)
            .ok_or_else(|| self.container_not_mapped(container))?;

        Ok(PreGeneratedViews {
            container_pair: self.schema.container_pair_name(container),
            hash: hash.to_string(),
            views: views
                .iter()
                .map(|(extent, view)| (self.schema.extent_name(*extent), view.text().to_string()))
                .collect(),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    /// Warning diagnostics reported by the generator so far.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.warnings.lock().clone()
    }

    /// Forgets the assembly scan so the next pre-generated view lookup scans
    /// again. Views already resolved by any dictionary are kept.
    pub fn clear_cache(&self) {
        self.assemblies.clear();
    }

    fn synthesize_fk_view(&self, set: AssociationSetId) -> Result<Arc<GeneratedView>> {
        let extent = Extent::AssociationSet(set);

        match ForeignKeyViews::new(&self.schema).synthesize(set)? {
            Some(view) => {
                debug!(extent = %self.schema.extent_name(extent), "synthesized foreign-key view");
                Ok(Arc::new(view))
            }
            None => Err(Error::view_not_generated(self.schema.extent_name(extent))),
        }
    }

    /// First access to a container. Runs under the container's memo slot, so
    /// the mode switch and the generator call happen once per container.
    fn resolve_container(&self, container: app::ContainerId) -> Result<Arc<ContainerViews>> {
        if self.mode.get() == Mode::GeneratedViews {
            let views = self.pregenerated_views(container)?;

            if !views.is_empty() {
                info!(
                    container = %self.schema.container_pair_name(container),
                    views = views.len(),
                    "adopted pre-generated views"
                );
                return Ok(Arc::new(views));
            }

            if self.mode.switch_to_runtime() {
                info!("no pre-generated views found; switching to runtime view generation");
            }
        }

        self.generate_container_views(container)
    }

    fn pregenerated_views(&self, container: app::ContainerId) -> Result<ContainerViews> {
        let pair = self.schema.container_pair_name(container);
        let mut views = ContainerViews::new();
        let mut extents = None;

        for assembly in self.assemblies.candidates().iter() {
            let artifacts = match assembly.artifacts() {
                Ok(artifacts) => artifacts,
                Err(err) => {
                    warn!(assembly = assembly.name(), error = %err, "skipping view assembly");
                    continue;
                }
            };

            for artifact in artifacts.iter().filter(|artifact| artifact.container_pair == pair) {
                let extents = extents.get_or_insert_with(|| self.schema.extents_by_name(container));
                self.adopt(container, extents, assembly.name(), artifact, &mut views)?;
            }
        }

        Ok(views)
    }

    /// Validates one artifact against the live mapping and adds its views.
    ///
    /// An artifact that cannot be read is skipped. A readable artifact whose
    /// hash differs from the mapping's is an error.
    fn adopt(
        &self,
        container: app::ContainerId,
        extents: &IndexMap<String, Extent>,
        assembly: &str,
        artifact: &PreGeneratedViews,
        views: &mut ContainerViews,
    ) -> Result<()> {
        let expected = match artifact.hash.parse::<ClosureHash>() {
            Ok(hash) => hash,
            Err(err) => {
                warn!(assembly, error = %err, "skipping pre-generated views with a malformed hash");
                return Ok(());
            }
        };

        let live = self
            .closure_hash(container)
            .ok_or_else(|| self.container_not_mapped(container))?;
        if expected != live {
            return Err(Error::mapping(format!(
                "pre-generated views for `{}` in assembly `{assembly}` do not match the mapping \
                 (artifact hash {expected}, mapping hash {live}); regenerate the views",
                artifact.container_pair
            )));
        }

        let mut resolved = Vec::with_capacity(artifact.views.len());
        for (name, text) in &artifact.views {
            let Some(&extent) = extents.get(name) else {
                warn!(assembly, extent = %name, "skipping pre-generated views naming an unknown extent");
                return Ok(());
            };
            resolved.push((extent, name, text));
        }

        for (extent, name, text) in resolved {
            if views.contains_key(&extent) {
                return Err(Error::mapping(format!(
                    "extent `{name}` has views in more than one pre-generated artifact"
                )));
            }

            let view = GeneratedView::new(
                &self.schema,
                extent,
                ViewBody::Text(text.clone()),
                Origin::PreGenerated,
            );
            views.insert(extent, Arc::new(view));
        }

        Ok(())
    }

    fn generate_container_views(&self, container: app::ContainerId) -> Result<Arc<ContainerViews>> {
        let pair = self.schema.container_pair_name(container);
        let generated = self.generator.generate(
            &self.context(container),
            GenerateContainer { container }.into(),
        )?;

        if generated.has_errors() {
            return Err(Error::mapping_with_diagnostics(
                format!("view generation failed for `{pair}`"),
                generated.diagnostics,
            ));
        }

        self.record_warnings(&generated);

        let views: ContainerViews = generated
            .views
            .into_iter()
            .map(|(extent, body)| {
                let view = GeneratedView::new(&self.schema, extent, body, Origin::Runtime);
                (extent, Arc::new(view))
            })
            .collect();

        debug!(container = %pair, views = views.len(), "generated container views");
        Ok(Arc::new(views))
    }

    fn of_type_view(&self, key: OfTypeKey) -> Option<Arc<GeneratedView>> {
        let container = key.entity_set.container;
        if !self.schema.mapping.containers.contains_key(&container) {
            return None;
        }

        let mut generated = match self
            .generator
            .generate(&self.context(container), GenerateOfType { key }.into())
        {
            Ok(generated) => generated,
            Err(err) => {
                warn!(?key, error = %err, "type-specific view generation failed");
                return None;
            }
        };

        if generated.has_errors() {
            debug!(?key, "type-specific view cannot be generated");
            return None;
        }

        self.record_warnings(&generated);

        let body = generated
            .views
            .swap_remove(&Extent::EntitySet(key.entity_set))?;

        Some(Arc::new(GeneratedView::new(
            &self.schema,
            key,
            body,
            Origin::Runtime,
        )))
    }

    fn container_not_mapped(&self, container: app::ContainerId) -> Error {
        err!(
            "container `{}` is not mapped",
            self.schema.app.container(container).name
        )
    }

    fn context(&self, container: app::ContainerId) -> Context<'_> {
        Context {
            schema: &self.schema,
            mapping: self.schema.mapping.container(container),
            config: &self.config,
        }
    }

    fn record_warnings(&self, generated: &Generated) {
        let mut warnings = self.warnings.lock();

        for diagnostic in generated.warnings() {
            warn!(%diagnostic, "view generation warning");
            warnings.push(diagnostic.clone());
        }
    }
}
