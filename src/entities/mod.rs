// Entity Models
//
// Two independent collections share the same lifecycle:
// - Stable identity (UUID string) assigned by the caller on creation
// - Partial patch merge on update
// - A binary status that can be toggled
//
// The `Entity` trait carries the per-type pieces so a single generic store
// serves both collections.

pub mod clothing;
pub mod wishlist;

pub use clothing::{ClothingCategory, ClothingItem, ClothingPatch, ClothingStatus, YearsOfUse};
pub use wishlist::{WishlistItem, WishlistPatch, WishlistPriority, WishlistStatus};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// An item kind that can live in a `CollectionStore`.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Partial update merged by `apply_patch`
    type Patch: Clone + fmt::Debug;

    /// Fixed key of the serialized collection in the key-value store
    const STORAGE_KEY: &'static str;

    /// Short name used in log lines ("clothing", "wishlist")
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn tags(&self) -> &[String];

    /// New value with every `Some` field of the patch applied
    fn apply_patch(&self, patch: &Self::Patch) -> Self;

    /// New value with the binary status flipped
    fn toggled(&self) -> Self;

    /// Fixed starter list used when storage holds nothing usable
    fn seed() -> Vec<Self>;
}

/// Fresh random identifier for a new item
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Raised when user text does not name a value of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        ParseEnumError {
            kind,
            value: value.to_string(),
        }
    }
}
