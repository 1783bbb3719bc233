// 📝 Forms - raw user input → validated values → store calls
//
// A form holds exactly what the user typed. `validate` turns it into a draft
// or a list of field errors; `submit` only touches the store when the whole
// form is valid.

use crate::entities::{
    new_id, ClothingCategory, ClothingItem, ClothingPatch, ClothingStatus, WishlistItem,
    WishlistPatch, WishlistPriority, WishlistStatus, YearsOfUse,
};
use crate::schema::{join_tags, optional_text, parse_tags, FieldValidator, ValidationResult};
use crate::store::{ClothingStore, WishlistStore};
use log::info;

pub const DEFAULT_COLOR: &str = "#000000";

/// Create a new item, or edit the item with this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<'a> {
    Create,
    Edit(&'a str),
}

// ============================================================================
// CLOTHING FORM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClothingForm {
    pub name: String,
    pub category: String,
    pub status: String,
    pub years_of_use: String,
    /// Comma-separated tags
    pub tags_text: String,
    /// Primary color only
    pub color: String,
    pub notes: String,
}

impl Default for ClothingForm {
    fn default() -> Self {
        ClothingForm {
            name: String::new(),
            category: String::new(),
            status: ClothingStatus::Clean.as_str().to_string(),
            years_of_use: YearsOfUse::LessThanAYear.as_str().to_string(),
            tags_text: String::new(),
            color: DEFAULT_COLOR.to_string(),
            notes: String::new(),
        }
    }
}

/// Validated clothing form values
#[derive(Debug, Clone, PartialEq)]
pub struct ClothingDraft {
    pub name: String,
    pub category: ClothingCategory,
    pub status: ClothingStatus,
    pub years_of_use: YearsOfUse,
    pub tags: Vec<String>,
    pub color: String,
    pub notes: Option<String>,
}

impl ClothingForm {
    /// Edit-mode values for an existing item
    pub fn from_item(item: &ClothingItem) -> Self {
        ClothingForm {
            name: item.name.clone(),
            category: item.category.as_str().to_string(),
            status: item.status.as_str().to_string(),
            years_of_use: item.years_of_use.as_str().to_string(),
            tags_text: join_tags(&item.tags),
            color: item.primary_color().unwrap_or(DEFAULT_COLOR).to_string(),
            notes: item.notes.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> ValidationResult<ClothingDraft> {
        let mut v = FieldValidator::new("Clothing");

        let name = v.name(&self.name);
        let category = v.choice(
            "category",
            "Category",
            &self.category,
            &ClothingCategory::ALL.map(|c| c.as_str()),
        );
        let status = v.choice(
            "status",
            "Status",
            &self.status,
            &ClothingStatus::ALL.map(|s| s.as_str()),
        );
        let years_of_use = v.choice(
            "yearsOfUse",
            "Years of use",
            &self.years_of_use,
            &YearsOfUse::ALL.map(|y| y.as_str()),
        );
        let color = v.color(&self.color);

        match (name, category, status, years_of_use, color) {
            (Some(name), Some(category), Some(status), Some(years_of_use), Some(color)) => {
                Ok(ClothingDraft {
                    name,
                    category,
                    status,
                    years_of_use,
                    tags: parse_tags(&self.tags_text),
                    color,
                    notes: optional_text(&self.notes),
                })
            }
            _ => Err(v.into_errors()),
        }
    }

    /// Validate, then add or update. Returns the id of the affected item.
    pub fn submit(
        &self,
        store: &mut ClothingStore,
        mode: FormMode<'_>,
    ) -> ValidationResult<String> {
        let draft = self.validate()?;

        match mode {
            FormMode::Create => {
                let item = draft.into_item(new_id());
                let id = item.id.clone();
                info!("clothing: created \"{}\" ({})", item.name, id);
                store.add(item);
                Ok(id)
            }
            FormMode::Edit(id) => {
                store.update(id, draft.into_patch());
                Ok(id.to_string())
            }
        }
    }
}

impl ClothingDraft {
    pub fn into_item(self, id: impl Into<String>) -> ClothingItem {
        let item = ClothingItem::new(id, self.name, self.category, self.status, self.years_of_use)
            .with_tags(self.tags)
            .with_colors([self.color]);
        match self.notes {
            Some(notes) => item.with_notes(notes),
            None => item,
        }
    }

    /// Patch replacing every form-editable field
    pub fn into_patch(self) -> ClothingPatch {
        ClothingPatch {
            name: Some(self.name),
            category: Some(self.category),
            tags: Some(self.tags),
            colors: Some(vec![self.color]),
            status: Some(self.status),
            years_of_use: Some(self.years_of_use),
            notes: Some(self.notes),
        }
    }
}

// ============================================================================
// WISHLIST FORM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistForm {
    pub name: String,
    pub link: String,
    pub estimated_price: String,
    pub tags_text: String,
    pub priority: String,
    pub status: String,
}

impl Default for WishlistForm {
    fn default() -> Self {
        WishlistForm {
            name: String::new(),
            link: String::new(),
            estimated_price: String::new(),
            tags_text: String::new(),
            priority: WishlistPriority::Medium.as_str().to_string(),
            status: WishlistStatus::Pending.as_str().to_string(),
        }
    }
}

/// Validated wishlist form values
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistDraft {
    pub name: String,
    pub link: Option<String>,
    pub estimated_price: Option<f64>,
    pub tags: Vec<String>,
    pub priority: WishlistPriority,
    pub status: WishlistStatus,
}

impl WishlistForm {
    /// Edit-mode values for an existing item
    pub fn from_item(item: &WishlistItem) -> Self {
        WishlistForm {
            name: item.name.clone(),
            link: item.link.clone().unwrap_or_default(),
            estimated_price: item
                .estimated_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            tags_text: join_tags(&item.tags),
            priority: item.priority.as_str().to_string(),
            status: item.status.as_str().to_string(),
        }
    }

    pub fn validate(&self) -> ValidationResult<WishlistDraft> {
        let mut v = FieldValidator::new("Wishlist");

        let name = v.name(&self.name);
        let link = v.link(&self.link);
        let estimated_price = v.price(&self.estimated_price);
        let priority = v.choice(
            "priority",
            "Priority",
            &self.priority,
            &WishlistPriority::ALL.map(|p| p.as_str()),
        );
        let status = v.choice(
            "status",
            "Status",
            &self.status,
            &WishlistStatus::ALL.map(|s| s.as_str()),
        );

        match (name, link, estimated_price, priority, status) {
            (Some(name), Some(link), Some(estimated_price), Some(priority), Some(status)) => {
                Ok(WishlistDraft {
                    name,
                    link,
                    estimated_price,
                    tags: parse_tags(&self.tags_text),
                    priority,
                    status,
                })
            }
            _ => Err(v.into_errors()),
        }
    }

    /// Validate, then add or update. Returns the id of the affected item.
    pub fn submit(
        &self,
        store: &mut WishlistStore,
        mode: FormMode<'_>,
    ) -> ValidationResult<String> {
        let draft = self.validate()?;

        match mode {
            FormMode::Create => {
                let item = draft.into_item(new_id());
                let id = item.id.clone();
                info!("wishlist: created \"{}\" ({})", item.name, id);
                store.add(item);
                Ok(id)
            }
            FormMode::Edit(id) => {
                store.update(id, draft.into_patch());
                Ok(id.to_string())
            }
        }
    }
}

impl WishlistDraft {
    pub fn into_item(self, id: impl Into<String>) -> WishlistItem {
        let mut item = WishlistItem::new(id, self.name, self.priority, self.status)
            .with_tags(self.tags);
        if let Some(link) = self.link {
            item = item.with_link(link);
        }
        if let Some(price) = self.estimated_price {
            item = item.with_price(price);
        }
        item
    }

    /// Patch replacing every form-editable field
    pub fn into_patch(self) -> WishlistPatch {
        WishlistPatch {
            name: Some(self.name),
            link: Some(self.link),
            estimated_price: Some(self.estimated_price),
            tags: Some(self.tags),
            priority: Some(self.priority),
            status: Some(self.status),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
