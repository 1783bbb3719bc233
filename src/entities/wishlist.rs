// 🛍️ Wishlist Entity - things to buy later
//
// Stored under "whishlist-items" (the historical spelling is part of the
// persisted layout) as a JSON array:
// {id, name, link?, estimatedPrice?, tags, priority, status}

use super::{Entity, ParseEnumError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// PRIORITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistPriority {
    Low,
    Medium,
    High,
}

impl WishlistPriority {
    pub const ALL: [WishlistPriority; 3] = [
        WishlistPriority::Low,
        WishlistPriority::Medium,
        WishlistPriority::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WishlistPriority::Low => "low",
            WishlistPriority::Medium => "medium",
            WishlistPriority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WishlistPriority::Low => "Low",
            WishlistPriority::Medium => "Medium",
            WishlistPriority::High => "High",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            WishlistPriority::Low => 0,
            WishlistPriority::Medium => 1,
            WishlistPriority::High => 2,
        }
    }
}

impl fmt::Display for WishlistPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WishlistPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WishlistPriority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("priority", s))
    }
}

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistStatus {
    Pending,
    Bought,
}

impl WishlistStatus {
    pub const ALL: [WishlistStatus; 2] = [WishlistStatus::Pending, WishlistStatus::Bought];

    pub fn as_str(&self) -> &'static str {
        match self {
            WishlistStatus::Pending => "pending",
            WishlistStatus::Bought => "bought",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WishlistStatus::Pending => "Pending",
            WishlistStatus::Bought => "Bought",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            WishlistStatus::Pending => WishlistStatus::Bought,
            WishlistStatus::Bought => WishlistStatus::Pending,
        }
    }
}

impl fmt::Display for WishlistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WishlistStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WishlistStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("status", s))
    }
}

// ============================================================================
// WISHLIST ITEM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,

    /// 1-40 characters
    pub name: String,

    /// Absolute URL when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Non-negative when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub priority: WishlistPriority,

    pub status: WishlistStatus,
}

impl WishlistItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        priority: WishlistPriority,
        status: WishlistStatus,
    ) -> Self {
        WishlistItem {
            id: id.into(),
            name: name.into(),
            link: None,
            estimated_price: None,
            tags: Vec::new(),
            priority,
            status,
        }
    }

    /// Builder: set link
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Builder: set estimated price
    pub fn with_price(mut self, price: f64) -> Self {
        self.estimated_price = Some(price);
        self
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

    pub fn is_bought(&self) -> bool {
        self.status == WishlistStatus::Bought
    }
}

/// Fields to merge into a `WishlistItem`; `None` leaves a field unchanged.
///
/// `link` and `estimated_price` take `Some(None)` to clear the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistPatch {
    pub name: Option<String>,
    pub link: Option<Option<String>>,
    pub estimated_price: Option<Option<f64>>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<WishlistPriority>,
    pub status: Option<WishlistStatus>,
}

impl Entity for WishlistItem {
    type Patch = WishlistPatch;

    const STORAGE_KEY: &'static str = "whishlist-items";
    const KIND: &'static str = "wishlist";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn apply_patch(&self, patch: &WishlistPatch) -> Self {
        let mut next = self.clone();

        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(link) = &patch.link {
            next.link = link.clone();
        }
        if let Some(price) = patch.estimated_price {
            next.estimated_price = price;
        }
        if let Some(tags) = &patch.tags {
            next.tags = tags.clone();
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(status) = patch.status {
            next.status = status;
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
            WishlistItem::new(
                "1",
                "White Sneakers",
                WishlistPriority::High,
                WishlistStatus::Pending,
            )
            .with_link("https://example.com/white-sneakers")
            .with_price(120.0)
            .with_tags(["shoes", "casual"]),
            WishlistItem::new(
                "2",
                "Denim Jacket",
                WishlistPriority::Medium,
                WishlistStatus::Pending,
            )
            .with_price(80.0)
            .with_tags(["jacket"]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wishlist_json_layout() {
        let item = WishlistItem::seed().remove(0);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["estimatedPrice"], 120.0);
        assert_eq!(json["link"], "https://example.com/white-sneakers");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["status"], "pending");

        let bare = WishlistItem::new("x", "Scarf", WishlistPriority::Low, WishlistStatus::Bought);
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("link").is_none());
        assert!(json.get("estimatedPrice").is_none());
    }

    #[test]
    fn test_wishlist_reads_missing_optionals() {
        let json =
            r#"{"id":"9","name":"Belt","tags":["leather"],"priority":"low","status":"bought"}"#;
        let item: WishlistItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.link, None);
        assert_eq!(item.estimated_price, None);
        assert!(item.is_bought());
    }

    #[test]
    fn test_priority_rank_and_parse() {
        assert!(WishlistPriority::Low.rank() < WishlistPriority::Medium.rank());
        assert!(WishlistPriority::Medium.rank() < WishlistPriority::High.rank());
        assert_eq!("high".parse::<WishlistPriority>(), Ok(WishlistPriority::High));
        assert!("urgent".parse::<WishlistPriority>().is_err());
    }

    #[test]
    fn test_patch_clears_link_and_price() {
        let item = WishlistItem::seed().remove(0);
        let patch = WishlistPatch {
            link: Some(None),
            estimated_price: Some(None),
            ..Default::default()
        };

        let next = item.apply_patch(&patch);
        assert_eq!(next.link, None);
        assert_eq!(next.estimated_price, None);
        assert_eq!(next.name, item.name);
        assert_eq!(next.tags, item.tags);
    }

    #[test]
    fn test_toggle_pending_bought() {
        let item = WishlistItem::seed().remove(1);
        assert_eq!(item.toggled().status, WishlistStatus::Bought);
        assert_eq!(item.toggled().toggled(), item);
    }
}
