// Backing stores for sitemap payloads and icon images
//
// A store maps a relative resource path (`sitemap/demo.json`,
// `icon/classic/light-on.png`) to raw bytes. Missing resources are `Ok(None)`;
// `Err` is reserved for real I/O failures.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Byte source addressed by relative paths
pub trait ResourceStore {
    fn open(&self, path: &str) -> io::Result<Option<Vec<u8>>>;
}

/// Files below a root directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceStore for DirectoryStore {
    fn open(&self, path: &str) -> io::Result<Option<Vec<u8>>> {
        let relative = Path::new(path);
        // Only plain names below the root; `..` or absolute paths never resolve
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            tracing::warn!("Refusing resource path outside store: {}", path);
            return Ok(None);
        }

        match std::fs::read(self.root.join(relative)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// In-memory path → bytes map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Cow<'static, [u8]>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) {
        self.entries.insert(path.into(), bytes.into());
    }

    /// Builder-style insert
    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        self.insert(path, bytes);
        self
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceStore for MemoryStore {
    fn open(&self, path: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.get(path).map(|bytes| bytes.to_vec()))
    }
}

/// Stores consulted in order; the first one holding the path wins
#[derive(Default)]
pub struct LayeredStore {
    layers: Vec<Box<dyn ResourceStore>>,
}

impl LayeredStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, store: impl ResourceStore + 'static) -> Self {
        self.layers.push(Box::new(store));
        self
    }
}

impl ResourceStore for LayeredStore {
    fn open(&self, path: &str) -> io::Result<Option<Vec<u8>>> {
        for layer in &self.layers {
            if let Some(bytes) = layer.open(path)? {
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bundled demo resources (compiled into binary)
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! bundled {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/", $path)))),*]
    };
}

const BUNDLED: &[(&str, &[u8])] = bundled![
    "sitemap/demo.json",
    "sitemap/demo/kitchen.json",
    "sitemap/demo/living.json",
    "icon/classic/house.png",
    "icon/classic/kitchen.png",
    "icon/classic/sofa.png",
    "icon/classic/temperature.png",
    "icon/classic/light.png",
    "icon/classic/light-on.png",
    "icon/classic/light-off.png",
    "icon/classic/slider.png",
    "icon/material/navigate-next.png",
    "icon/material/arrow-back.png",
    "icon/material/more-vert.png",
];

/// Demo sitemap and icon sets shipped with the binary
pub fn bundled_store() -> MemoryStore {
    BUNDLED
        .iter()
        .fold(MemoryStore::new(), |store, (path, bytes)| {
            store.with(*path, Cow::Borrowed(*bytes))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_missing_is_none() {
        let store = MemoryStore::new().with("sitemap/demo.json", b"{}".to_vec());
        assert_eq!(store.open("sitemap/demo.json").unwrap(), Some(b"{}".to_vec()));
        assert_eq!(store.open("sitemap/other.json").unwrap(), None);
    }

    #[test]
    fn test_directory_store_reads_below_root() {
        let root = std::env::temp_dir().join(format!("sitemap-store-{}", std::process::id()));
        std::fs::create_dir_all(root.join("sitemap")).unwrap();
        std::fs::write(root.join("sitemap/demo.json"), b"{\"type\":\"sitemap\"}").unwrap();

        let store = DirectoryStore::new(&root);
        assert!(store.open("sitemap/demo.json").unwrap().is_some());
        assert_eq!(store.open("sitemap/missing.json").unwrap(), None);
        assert_eq!(store.open("../etc/passwd").unwrap(), None);
        assert_eq!(store.open("/etc/passwd").unwrap(), None);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_layered_store_prefers_first_layer() {
        let store = LayeredStore::new()
            .push(MemoryStore::new().with("a", b"override".to_vec()))
            .push(
                MemoryStore::new()
                    .with("a", b"base".to_vec())
                    .with("b", b"only-base".to_vec()),
            );
        assert_eq!(store.open("a").unwrap(), Some(b"override".to_vec()));
        assert_eq!(store.open("b").unwrap(), Some(b"only-base".to_vec()));
        assert_eq!(store.open("c").unwrap(), None);
    }

    #[test]
    fn test_bundled_store_has_demo_sitemap() {
        let store = bundled_store();
        assert_eq!(store.len(), BUNDLED.len());
        assert!(store.open("sitemap/demo.json").unwrap().is_some());
        assert!(store.open("icon/classic/light-on.png").unwrap().is_some());
    }
}
