use super::{mode::ModeFlag, Mode, ViewDictionary};
use crate::{
    assembly::AssemblyCache,
    generator::{Config, Generator},
    memoizer::Memoizer,
    user_views::UserViews,
};
use mapview_core::{err, Result, Schema};

use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    generator: Option<Arc<dyn Generator>>,
    assemblies: Option<Arc<AssemblyCache>>,
    config: Config,
}

impl Builder {
    /// The view generation algorithm. Required.
    pub fn generator(&mut self, generator: Arc<dyn Generator>) -> &mut Self {
        self.generator = Some(generator);
        self
    }

    /// The assembly scan cache. Dictionaries sharing a cache share one scan.
    /// Defaults to a cache over no assemblies.
    pub fn assembly_cache(&mut self, assemblies: Arc<AssemblyCache>) -> &mut Self {
        self.assemblies = Some(assemblies);
        self
    }

    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn build(&self, schema: Arc<Schema>) -> Result<ViewDictionary> {
        let generator = self
            .generator
            .clone()
            .ok_or_else(|| err!("a view generator is required"))?;

        let assemblies = self
            .assemblies
            .clone()
            .unwrap_or_else(|| Arc::new(AssemblyCache::empty()));

        let mode = if self.config.pregenerated_views {
            Mode::GeneratedViews
        } else {
            Mode::RuntimeGeneration
        };

        Ok(ViewDictionary {
            user_views: UserViews::from_schema(&schema),
            schema,
            generator,
            assemblies,
            config: self.config.clone(),
            mode: ModeFlag::new(mode),
            container_views: Memoizer::new(),
            of_type_views: Memoizer::new(),
            fk_views: Memoizer::new(),
            closure_hashes: Memoizer::new(),
            members: Memoizer::new(),
            warnings: Mutex::new(vec![]),
        })
    }
}
