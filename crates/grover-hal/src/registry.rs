//! Name-based backend lookup.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backend::{Backend, BackendConfig, BackendFactory};
use crate::error::{HalError, HalResult};

type Factory = Box<dyn Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync>;

/// Registry mapping backend names to constructors.
pub struct BackendRegistry {
    factories: FxHashMap<String, Factory>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Register a backend type under `name`.
    pub fn register<B>(&mut self, name: impl Into<String>)
    where
        B: BackendFactory + 'static,
    {
        let name = name.into();
        debug!(backend = %name, "Registering backend");
        self.factories.insert(
            name,
            Box::new(|config| Ok(Box::new(B::from_config(config)?) as Box<dyn Backend>)),
        );
    }

    /// Register a backend with a custom constructor.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!(backend = %name, "Registering backend factory");
        self.factories.insert(name, Box::new(factory));
    }

    /// Create the backend named in `config`.
    pub fn create(&self, config: BackendConfig) -> HalResult<Box<dyn Backend>> {
        match self.factories.get(&config.name) {
            Some(factory) => factory(config),
            None => Err(HalError::BackendUnavailable(format!(
                "no backend registered with name '{}' (available: {})",
                config.name,
                self.available_backends().join(", ")
            ))),
        }
    }

    /// All registered names, sorted.
    pub fn available_backends(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a backend is registered under `name`.
    pub fn has_backend(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
