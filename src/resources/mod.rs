use std::{collections::HashMap, pin::Pin};

use thiserror::Error;

/**
 * This module contains all logic for declaring and loading the named
 * resources a scene needs before construction starts.
 */
#[cfg(not(target_arch = "wasm32"))]
pub mod fs;

/// Resource category, driving kind-based decoding and attachment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Texture,
    Font,
    Model,
}

/// One named resource to load before scene construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub kind: AssetKind,
    pub path: String,
}

impl ManifestEntry {
    pub fn texture(name: &str, path: &str) -> Self {
        Self::new(name, AssetKind::Texture, path)
    }

    pub fn font(name: &str, path: &str) -> Self {
        Self::new(name, AssetKind::Font, path)
    }

    pub fn model(name: &str, path: &str) -> Self {
        Self::new(name, AssetKind::Model, path)
    }

    fn new(name: &str, kind: AssetKind, path: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            path: path.to_string(),
        }
    }
}

/// A loaded resource. Opaque to the core beyond its kind.
#[derive(Clone, Debug)]
pub enum Resource {
    Texture(image::RgbaImage),
    Font(Vec<u8>),
    Model(Vec<u8>),
}

impl Resource {
    pub fn kind(&self) -> AssetKind {
        match self {
            Resource::Texture(_) => AssetKind::Texture,
            Resource::Font(_) => AssetKind::Font,
            Resource::Model(_) => AssetKind::Model,
        }
    }
}

/// Fatal initialization failure: the whole init aborts and no partial scene
/// graph is built. The caller decides the user-visible fallback.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load asset `{name}` from `{path}`")]
    Fetch {
        name: String,
        path: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("asset `{0}` is not present in the registry")]
    MissingAsset(String),
}

/// Name → resource mapping, fully populated before any node referencing a
/// named asset is constructed.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: HashMap<String, Resource>,
}

impl AssetRegistry {
    pub fn insert(&mut self, name: String, resource: Resource) {
        self.assets.insert(name, resource);
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.assets.get(name)
    }

    /// Resolves `name` or reports the init-fatal gap.
    pub fn require(&self, name: &str) -> Result<&Resource, LoadError> {
        self.get(name)
            .ok_or_else(|| LoadError::MissingAsset(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// The black-box loading transport: fetches one manifest entry.
pub trait AssetFetcher {
    fn fetch(&self, entry: &ManifestEntry)
    -> Pin<Box<dyn Future<Output = anyhow::Result<Resource>> + '_>>;
}

/// Drives the fetcher over a whole manifest, all-or-nothing.
pub struct AssetCatalog {
    fetcher: Box<dyn AssetFetcher>,
}

impl AssetCatalog {
    pub fn new(fetcher: Box<dyn AssetFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetches every entry concurrently. Any single failure fails the whole
    /// load, naming the offending entry.
    pub async fn load(&self, manifest: &[ManifestEntry]) -> Result<AssetRegistry, LoadError> {
        let fetches = manifest.iter().map(|entry| self.fetcher.fetch(entry));
        let results = futures::future::join_all(fetches).await;

        let mut registry = AssetRegistry::default();
        for (entry, result) in manifest.iter().zip(results) {
            match result {
                Ok(resource) => registry.insert(entry.name.clone(), resource),
                Err(source) => {
                    return Err(LoadError::Fetch {
                        name: entry.name.clone(),
                        path: entry.path.clone(),
                        source,
                    });
                }
            }
        }
        log::info!("loaded {} assets", registry.len());
        Ok(registry)
    }
}
