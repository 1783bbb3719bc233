// 👕 Clothing Entity - items owned in the wardrobe
//
// Stored under "wardrobe-items" as a JSON array:
// {id, name, category, tags, colors, status, yearsOfUse, notes?}

use super::{Entity, ParseEnumError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CLOTHING CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingCategory {
    Tshirt,
    Shirt,
    Pants,
    Shorts,
    Jacket,
    Shoes,
    Accessory,
    Other,
}

impl ClothingCategory {
    pub const ALL: [ClothingCategory; 8] = [
        ClothingCategory::Tshirt,
        ClothingCategory::Shirt,
        ClothingCategory::Pants,
        ClothingCategory::Shorts,
        ClothingCategory::Jacket,
        ClothingCategory::Shoes,
        ClothingCategory::Accessory,
        ClothingCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClothingCategory::Tshirt => "tshirt",
            ClothingCategory::Shirt => "shirt",
            ClothingCategory::Pants => "pants",
            ClothingCategory::Shorts => "shorts",
            ClothingCategory::Jacket => "jacket",
            ClothingCategory::Shoes => "shoes",
            ClothingCategory::Accessory => "accessory",
            ClothingCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClothingCategory::Tshirt => "T-Shirt",
            ClothingCategory::Shirt => "Shirt",
            ClothingCategory::Pants => "Pants",
            ClothingCategory::Shorts => "Shorts",
            ClothingCategory::Jacket => "Jacket",
            ClothingCategory::Shoes => "Shoes",
            ClothingCategory::Accessory => "Accessory",
            ClothingCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ClothingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClothingCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClothingCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("category", s))
    }
}

// ============================================================================
// CLOTHING STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingStatus {
    Clean,
    Dirty,
}

impl ClothingStatus {
    pub const ALL: [ClothingStatus; 2] = [ClothingStatus::Clean, ClothingStatus::Dirty];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClothingStatus::Clean => "clean",
            ClothingStatus::Dirty => "dirty",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClothingStatus::Clean => "Clean",
            ClothingStatus::Dirty => "Dirty",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ClothingStatus::Clean => ClothingStatus::Dirty,
            ClothingStatus::Dirty => ClothingStatus::Clean,
        }
    }
}

impl fmt::Display for ClothingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClothingStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClothingStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("status", s))
    }
}

// ============================================================================
// YEARS OF USE
// ============================================================================

/// How long an item has been worn. Ordered by `rank`, not by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearsOfUse {
    #[serde(rename = "less-than-a-year")]
    LessThanAYear,
    #[serde(rename = "one-to-three-years")]
    OneToThreeYears,
    #[serde(rename = "more-than-three-years")]
    MoreThanThreeYears,
}

impl YearsOfUse {
    pub const ALL: [YearsOfUse; 3] = [
        YearsOfUse::LessThanAYear,
        YearsOfUse::OneToThreeYears,
        YearsOfUse::MoreThanThreeYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            YearsOfUse::LessThanAYear => "less-than-a-year",
            YearsOfUse::OneToThreeYears => "one-to-three-years",
            YearsOfUse::MoreThanThreeYears => "more-than-three-years",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            YearsOfUse::LessThanAYear => "Less than a year",
            YearsOfUse::OneToThreeYears => "1 to 3 years",
            YearsOfUse::MoreThanThreeYears => "More than 3 years",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            YearsOfUse::LessThanAYear => 0,
            YearsOfUse::OneToThreeYears => 1,
            YearsOfUse::MoreThanThreeYears => 2,
        }
    }
}

impl fmt::Display for YearsOfUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YearsOfUse {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        YearsOfUse::ALL
            .into_iter()
            .find(|y| y.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("yearsOfUse", s))
    }
}

// ============================================================================
// CLOTHING ITEM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: String,

    /// 1-40 characters
    pub name: String,

    pub category: ClothingCategory,

    /// Free text, order as entered
    #[serde(default)]
    pub tags: Vec<String>,

    /// Hex colors; the first one is the primary color
    #[serde(default)]
    pub colors: Vec<String>,

    pub status: ClothingStatus,

    pub years_of_use: YearsOfUse,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ClothingItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ClothingCategory,
        status: ClothingStatus,
        years_of_use: YearsOfUse,
    ) -> Self {
        ClothingItem {
            id: id.into(),
            name: name.into(),
            category,
            tags: Vec::new(),
            colors: Vec::new(),
            status,
            years_of_use,
            notes: None,
        }
    }

    /// Builder: set tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set colors
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn primary_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }
}

/// Fields to merge into a `ClothingItem`; `None` leaves a field unchanged.
///
/// `notes: Some(None)` clears the notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClothingPatch {
    pub name: Option<String>,
    pub category: Option<ClothingCategory>,
    pub tags: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub status: Option<ClothingStatus>,
    pub years_of_use: Option<YearsOfUse>,
    pub notes: Option<Option<String>>,
}

impl Entity for ClothingItem {
    type Patch = ClothingPatch;

    const STORAGE_KEY: &'static str = "wardrobe-items";
    const KIND: &'static str = "clothing";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn apply_patch(&self, patch: &ClothingPatch) -> Self {
        let mut next = self.clone();

        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(tags) = &patch.tags {
            next.tags = tags.clone();
        }
        if let Some(colors) = &patch.colors {
            next.colors = colors.clone();
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(years_of_use) = patch.years_of_use {
            next.years_of_use = years_of_use;
        }
        if let Some(notes) = &patch.notes {
            next.notes = notes.clone();
        }

        next
    }

    fn toggled(&self) -> Self {
        let mut next = self.clone();
        next.status = self.status.toggled();
        next
    }

    fn seed() -> Vec<Self> {
        vec![
            ClothingItem::new(
                "1",
                "Black T-Shirt",
                ClothingCategory::Tshirt,
                ClothingStatus::Clean,
                YearsOfUse::OneToThreeYears,
            )
            .with_tags(["basic", "cotton"])
            .with_colors(["#000000"]),
            ClothingItem::new(
                "2",
                "Running Shorts",
                ClothingCategory::Shorts,
                ClothingStatus::Dirty,
                YearsOfUse::LessThanAYear,
            )
            .with_tags(["sporty"])
            .with_colors(["#1d4ed8"]),
        ]
    }
}
