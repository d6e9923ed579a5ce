// Type-safe asset handle system

use std::fmt;
use std::marker::PhantomData;

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create a new asset ID from a string path
    pub fn from_path(path: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Create an asset ID from a raw u64
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Opaque, typed reference to an engine asset
///
/// The core never looks inside the asset; it only hands the handle back to the
/// scene host. The `T` parameter keeps a skill icon from being passed where an
/// effect template is expected.
pub struct AssetHandle<T> {
    id: AssetId,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> AssetHandle<T> {
    /// Create a handle from an asset ID
    pub fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Create a handle for the asset stored at `path`
    pub fn from_path(path: &str) -> Self {
        Self::new(AssetId::from_path(path))
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

// Manual impls: derives would put bounds on the marker type.
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetHandle<T> {}

impl<T> std::hash::Hash for AssetHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssetHandle").field(&self.id).finish()
    }
}

// Marker types for different asset types
pub struct TemplateAsset;
pub struct IconAsset;
pub struct EffectAsset;

/// Visual template a character instance is spawned from
pub type TemplateHandle = AssetHandle<TemplateAsset>;
/// Skill icon shown by an authoring surface
pub type IconHandle = AssetHandle<IconAsset>;
/// Transient visual effect spawned when a skill fires
pub type EffectHandle = AssetHandle<EffectAsset>;
