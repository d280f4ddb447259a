use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::assets::decode::decode_image;
use crate::foundation::error::{TweenError, TweenResult};
use crate::scene::config::{MissingAssetPolicy, ShowConfig};

/// Decoded image, premultiplied RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Assets decoded up front, before the first frame.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    images: HashMap<String, PreparedImage>,
    failed: BTreeMap<String, String>,
    font: Option<Arc<Vec<u8>>>,
    policy: MissingAssetPolicy,
}

impl AssetStore {
    /// Store with nothing loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every asset `config` declares, relative to `root`.
    ///
    /// Images are decoded in parallel and joined before returning. Failures are reported or
    /// recorded according to `config.missing_assets`.
    #[tracing::instrument(skip(config), fields(assets = config.assets.len()))]
    pub fn prepare(config: &ShowConfig, root: &Path) -> TweenResult<Self> {
        let loaded: Vec<(String, TweenResult<PreparedImage>)> = config
            .assets
            .par_iter()
            .map(|(key, rel)| (key.clone(), load_image(root, rel)))
            .collect();

        let mut out = Self {
            policy: config.missing_assets,
            ..Self::default()
        };
        for (key, res) in loaded {
            match res {
                Ok(img) => {
                    tracing::debug!(%key, width = img.width, height = img.height, "image ready");
                    out.images.insert(key, img);
                }
                Err(e) if config.missing_assets == MissingAssetPolicy::Fail => {
                    return Err(TweenError::asset(format!("asset '{key}': {e}")));
                }
                Err(e) => {
                    tracing::warn!(%key, error = %e, policy = ?config.missing_assets, "asset unavailable");
                    out.failed.insert(key, e.to_string());
                }
            }
        }

        if let Some(rel) = &config.font {
            match read_bytes(root, rel) {
                Ok(bytes) => out.font = Some(Arc::new(bytes)),
                Err(e) if config.missing_assets == MissingAssetPolicy::Fail => {
                    return Err(TweenError::asset(format!("font '{rel}': {e}")));
                }
                Err(e) => tracing::warn!(font = %rel, error = %e, "font unavailable, labels disabled"),
            }
        }

        Ok(out)
    }

    /// Register an already decoded image.
    pub fn insert_image(&mut self, key: impl Into<String>, image: PreparedImage) {
        let key = key.into();
        self.failed.remove(&key);
        self.images.insert(key, image);
    }

    /// Register raw font bytes for labels.
    pub fn set_font(&mut self, bytes: Vec<u8>) {
        self.font = Some(Arc::new(bytes));
    }

    /// Look up a decoded image.
    pub fn image(&self, key: &str) -> Option<&PreparedImage> {
        self.images.get(key)
    }

    /// Iterate over decoded images.
    pub fn images(&self) -> impl Iterator<Item = (&str, &PreparedImage)> {
        self.images.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Font bytes, if a font was configured and loaded.
    pub fn font(&self) -> Option<&Arc<Vec<u8>>> {
        self.font.as_ref()
    }

    /// Keys that failed to load, with the reason.
    pub fn failed(&self) -> &BTreeMap<String, String> {
        &self.failed
    }

    /// Policy the store was prepared with.
    pub fn policy(&self) -> MissingAssetPolicy {
        self.policy
    }

    /// Whether a loop depending on `keys` may start.
    ///
    /// Under [`MissingAssetPolicy::Stall`] every key must be loaded; otherwise loading already
    /// succeeded or was waived.
    pub fn gate_open<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> bool {
        match self.policy {
            MissingAssetPolicy::Stall => keys.into_iter().all(|k| self.images.contains_key(k)),
            MissingAssetPolicy::Fail | MissingAssetPolicy::Skip => true,
        }
    }
}

fn load_image(root: &Path, rel: &str) -> TweenResult<PreparedImage> {
    let bytes = read_bytes(root, rel)?;
    decode_image(&bytes)
}

fn read_bytes(root: &Path, rel: &str) -> TweenResult<Vec<u8>> {
    let path = resolve_rel_path(root, rel)?;
    std::fs::read(&path)
        .map_err(|e| TweenError::asset(format!("failed to read '{}': {e}", path.display())))
}

/// Join `rel` onto `root`, refusing absolute paths and `..` segments.
pub(crate) fn resolve_rel_path(root: &Path, rel: &str) -> TweenResult<PathBuf> {
    let rel_path = Path::new(rel.trim());
    let mut out = root.to_path_buf();
    for comp in rel_path.components() {
        match comp {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(TweenError::validation(format!(
                    "asset path '{rel}' must be relative and stay inside the config directory"
                )));
            }
        }
    }
    if out == root {
        return Err(TweenError::validation(format!(
            "asset path '{rel}' is empty"
        )));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
