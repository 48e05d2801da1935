//! Filesystem-backed asset fetcher for native hosts and tests.

use std::{path::PathBuf, pin::Pin};

use anyhow::Context as _;

use crate::resources::{AssetFetcher, AssetKind, ManifestEntry, Resource};

/// Reads manifest paths relative to a base directory; textures are decoded
/// through the `image` crate, fonts and models stay raw bytes for the
/// backend to interpret.
pub struct FsAssetFetcher {
    base: PathBuf,
}

impl FsAssetFetcher {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl AssetFetcher for FsAssetFetcher {
    fn fetch(
        &self,
        entry: &ManifestEntry,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Resource>> + '_>> {
        let path = self.base.join(&entry.path);
        let kind = entry.kind;
        Box::pin(async move {
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            match kind {
                AssetKind::Texture => {
                    let decoded = image::load_from_memory(&bytes)
                        .with_context(|| format!("decoding {}", path.display()))?;
                    Ok(Resource::Texture(decoded.to_rgba8()))
                }
                AssetKind::Font => Ok(Resource::Font(bytes)),
                AssetKind::Model => Ok(Resource::Model(bytes)),
            }
        })
    }
}
