// Virtual Wardrobe - Core Library
// Item stores, derived views and form validation for the CLI and TUI front ends

pub mod storage;    // Persistent key-value store (SQLite / memory)
pub mod entities;   // Clothing + wishlist item models
pub mod store;      // Typed collection store (reducer + write-through)
pub mod view;       // Derived filter/sort pipeline
pub mod schema;     // Form field rules
pub mod forms;      // Form values, validation, submission
pub mod stats;      // Overview numbers
pub mod config;     // Configuration file

// Re-export commonly used types
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError, StorageResult};
pub use entities::{
    new_id, Entity, ParseEnumError,
    ClothingCategory, ClothingItem, ClothingPatch, ClothingStatus, YearsOfUse,
    WishlistItem, WishlistPatch, WishlistPriority, WishlistStatus,
};
pub use store::{
    reduce, Action, CollectionStore, ClothingStore, WishlistStore, LoadFallback,
};
pub use view::{
    clothing_view, wishlist_view, derive_view, ViewQuery, Filter, SortDirection,
    ClothingQuery, ClothingSortKey, WishlistQuery, WishlistSortKey,
};
pub use schema::{ValidationError, ValidationResult, FieldValidator, parse_tags};
pub use forms::{ClothingForm, ClothingDraft, WishlistForm, WishlistDraft, FormMode};
pub use stats::{overview, OverviewStats};
pub use config::Config;
