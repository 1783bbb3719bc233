// 🔎 Derived View Pipeline
// (collection, filter criteria, sort criteria) → filtered, ordered list.
//
// Pure: never mutates the source, same inputs always give the same output.
// Sorting is stable, so items with equal keys keep their filtered order.

use crate::entities::{
    ClothingCategory, ClothingItem, ClothingStatus, Entity, ParseEnumError, WishlistItem,
    WishlistPriority, WishlistStatus,
};
use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

// ============================================================================
// SORT DIRECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ParseEnumError::new("sort direction", s)),
        }
    }
}

// ============================================================================
// ENUM FILTER
// ============================================================================

/// `all` or one exact enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

impl<T: Copy + PartialEq> Filter<T> {
    /// all → values[0] → ... → values[n-1] → all
    pub fn cycle(self, values: &[T]) -> Self {
        match self {
            Filter::All => values.first().copied().map_or(Filter::All, Filter::Only),
            Filter::Only(current) => {
                let pos = values.iter().position(|v| *v == current);
                match pos.and_then(|i| values.get(i + 1)) {
                    Some(next) => Filter::Only(*next),
                    None => Filter::All,
                }
            }
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(value) => value.fmt(f),
        }
    }
}

// ============================================================================
// GENERIC PIPELINE
// ============================================================================

/// Filter + sort criteria for one entity type.
pub trait ViewQuery<T> {
    /// Every active criterion passes
    fn retains(&self, item: &T) -> bool;

    /// Ascending comparison under the selected sort key
    fn compare(&self, a: &T, b: &T) -> Ordering;

    fn direction(&self) -> SortDirection;
}

pub fn derive_view<T, Q>(items: &[Rc<T>], query: &Q) -> Vec<Rc<T>>
where
    Q: ViewQuery<T>,
{
    let mut view: Vec<Rc<T>> = items
        .iter()
        .filter(|item| query.retains(item))
        .cloned()
        .collect();

    let direction = query.direction();
    // slice::sort_by is stable
    view.sort_by(|a, b| direction.apply(query.compare(a, b)));
    view
}

/// Lowercased, trimmed filter text; `None` when the filter is inactive
fn needle(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn matches_text<T: Entity>(item: &T, search: &str, tag_search: &str) -> bool {
    if let Some(needle) = needle(search) {
        if !item.name().to_lowercase().contains(&needle) {
            return false;
        }
    }

    if let Some(needle) = needle(tag_search) {
        if !item
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
        {
            return false;
        }
    }

    true
}

thread_local! {
    // Root (CLDR) collation, secondary strength: accents matter, case does not
    static COLLATOR: Option<Collator> = {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        Collator::try_new(&Default::default(), options).ok()
    };
}

/// Locale-aware, case-insensitive text ordering
pub fn compare_text(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    })
}

/// Numeric ordering with a missing price treated as +infinity
pub fn compare_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.unwrap_or(f64::INFINITY)
        .total_cmp(&b.unwrap_or(f64::INFINITY))
}

// ============================================================================
// CLOTHING VIEW
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClothingSortKey {
    #[default]
    Name,
    Category,
    Status,
    YearsOfUse,
}

impl ClothingSortKey {
    pub const ALL: [ClothingSortKey; 4] = [
        ClothingSortKey::Name,
        ClothingSortKey::Category,
        ClothingSortKey::Status,
        ClothingSortKey::YearsOfUse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClothingSortKey::Name => "name",
            ClothingSortKey::Category => "category",
            ClothingSortKey::Status => "status",
            ClothingSortKey::YearsOfUse => "yearsOfUse",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ClothingSortKey::Name => ClothingSortKey::Category,
            ClothingSortKey::Category => ClothingSortKey::Status,
            ClothingSortKey::Status => ClothingSortKey::YearsOfUse,
            ClothingSortKey::YearsOfUse => ClothingSortKey::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClothingSortKey::Name => "Name",
            ClothingSortKey::Category => "Category",
            ClothingSortKey::Status => "Status",
            ClothingSortKey::YearsOfUse => "Years of use",
        }
    }
}

impl FromStr for ClothingSortKey {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClothingSortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("sort key", s))
    }
}

/// Wardrobe page criteria. `Default` is the "reset filters" state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClothingQuery {
    pub search: String,
    pub tag_search: String,
    pub status: Filter<ClothingStatus>,
    pub category: Filter<ClothingCategory>,
    pub sort_key: ClothingSortKey,
    pub direction: SortDirection,
}

impl ViewQuery<ClothingItem> for ClothingQuery {
    fn retains(&self, item: &ClothingItem) -> bool {
        self.status.matches(&item.status)
            && self.category.matches(&item.category)
            && matches_text(item, &self.search, &self.tag_search)
    }

    fn compare(&self, a: &ClothingItem, b: &ClothingItem) -> Ordering {
        match self.sort_key {
            ClothingSortKey::Name => compare_text(&a.name, &b.name),
            ClothingSortKey::Category => compare_text(a.category.as_str(), b.category.as_str()),
            ClothingSortKey::Status => compare_text(a.status.as_str(), b.status.as_str()),
            ClothingSortKey::YearsOfUse => a.years_of_use.rank().cmp(&b.years_of_use.rank()),
        }
    }

    fn direction(&self) -> SortDirection {
        self.direction
    }
}

pub fn clothing_view(items: &[Rc<ClothingItem>], query: &ClothingQuery) -> Vec<Rc<ClothingItem>> {
    derive_view(items, query)
}

// ============================================================================
// WISHLIST VIEW
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WishlistSortKey {
    #[default]
    Name,
    Priority,
    Status,
    EstimatedPrice,
}

impl WishlistSortKey {
    pub const ALL: [WishlistSortKey; 4] = [
        WishlistSortKey::Name,
        WishlistSortKey::Priority,
        WishlistSortKey::Status,
        WishlistSortKey::EstimatedPrice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WishlistSortKey::Name => "name",
            WishlistSortKey::Priority => "priority",
            WishlistSortKey::Status => "status",
            WishlistSortKey::EstimatedPrice => "estimatedPrice",
        }
    }

    pub fn next(self) -> Self {
        match self {
            WishlistSortKey::Name => WishlistSortKey::Priority,
            WishlistSortKey::Priority => WishlistSortKey::Status,
            WishlistSortKey::Status => WishlistSortKey::EstimatedPrice,
            WishlistSortKey::EstimatedPrice => WishlistSortKey::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WishlistSortKey::Name => "Name",
            WishlistSortKey::Priority => "Priority",
            WishlistSortKey::Status => "Status",
            WishlistSortKey::EstimatedPrice => "Estimated price",
        }
    }
}

impl FromStr for WishlistSortKey {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WishlistSortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("sort key", s))
    }
}

/// Wishlist page criteria. `Default` is the "reset filters" state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WishlistQuery {
    pub search: String,
    pub tag_search: String,
    pub status: Filter<WishlistStatus>,
    pub priority: Filter<WishlistPriority>,
    pub sort_key: WishlistSortKey,
    pub direction: SortDirection,
}

impl ViewQuery<WishlistItem> for WishlistQuery {
    fn retains(&self, item: &WishlistItem) -> bool {
        self.status.matches(&item.status)
            && self.priority.matches(&item.priority)
            && matches_text(item, &self.search, &self.tag_search)
    }

    fn compare(&self, a: &WishlistItem, b: &WishlistItem) -> Ordering {
        match self.sort_key {
            WishlistSortKey::Name => compare_text(&a.name, &b.name),
            WishlistSortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
            WishlistSortKey::Status => compare_text(a.status.as_str(), b.status.as_str()),
            WishlistSortKey::EstimatedPrice => compare_price(a.estimated_price, b.estimated_price),
        }
    }

    fn direction(&self) -> SortDirection {
        self.direction
    }
}

pub fn wishlist_view(items: &[Rc<WishlistItem>], query: &WishlistQuery) -> Vec<Rc<WishlistItem>> {
    derive_view(items, query)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::YearsOfUse;

    fn rc<T>(items: Vec<T>) -> Vec<Rc<T>> {
        items.into_iter().map(Rc::new).collect()
    }

    fn clothing(
        id: &str,
        name: &str,
        category: ClothingCategory,
        status: ClothingStatus,
    ) -> ClothingItem {
        ClothingItem::new(id, name, category, status, YearsOfUse::LessThanAYear)
    }

    fn wish(id: &str, price: Option<f64>) -> WishlistItem {
        let item = WishlistItem::new(
            id,
            format!("Item {}", id),
            WishlistPriority::Medium,
            WishlistStatus::Pending,
        );
        match price {
            Some(p) => item.with_price(p),
            None => item,
        }
    }

    fn ids<T: Entity>(view: &[Rc<T>]) -> Vec<String> {
        view.iter().map(|item| item.id().to_string()).collect()
    }

    #[test]
    fn test_status_filter_keeps_dirty_only() {
        let items = rc(vec![
            clothing("1", "Black T-Shirt", ClothingCategory::Tshirt, ClothingStatus::Clean),
            clothing("2", "Running Shorts", ClothingCategory::Shorts, ClothingStatus::Dirty),
        ]);
        let query = ClothingQuery {
            status: Filter::Only(ClothingStatus::Dirty),
            ..Default::default()
        };

        let view = clothing_view(&items, &query);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Running Shorts");
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let items = rc(vec![
            clothing("b", "b-shirt", ClothingCategory::Shirt, ClothingStatus::Clean),
            clothing("a", "A-shirt", ClothingCategory::Shirt, ClothingStatus::Clean),
        ]);

        let view = clothing_view(&items, &ClothingQuery::default());
        let names: Vec<&str> = view.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, vec!["A-shirt", "b-shirt"]);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let items = rc(vec![
            clothing("z", "Zapatillas", ClothingCategory::Shoes, ClothingStatus::Clean),
            clothing("a1", "Ábrigo", ClothingCategory::Jacket, ClothingStatus::Clean),
            clothing("a2", "abrigo corto", ClothingCategory::Jacket, ClothingStatus::Clean),
        ]);

        let view = clothing_view(&items, &ClothingQuery::default());
        let names: Vec<&str> = view.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, vec!["Ábrigo", "abrigo corto", "Zapatillas"]);
        assert_eq!(compare_text("ÉTÉ", "été"), Ordering::Equal);
        assert_eq!(compare_text("été", "etf"), Ordering::Less);
    }

    #[test]
    fn test_missing_price_sorts_as_infinity_both_directions() {
        let items = rc(vec![
            wish("none", None),
            wish("fifty", Some(50.0)),
            wish("ten", Some(10.0)),
        ]);

        let mut query = WishlistQuery {
            sort_key: WishlistSortKey::EstimatedPrice,
            ..Default::default()
        };
        assert_eq!(ids(&wishlist_view(&items, &query)), vec!["ten", "fifty", "none"]);

        query.direction = SortDirection::Desc;
        assert_eq!(ids(&wishlist_view(&items, &query)), vec!["none", "fifty", "ten"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let items = rc(vec![
            clothing("1", "Tee", ClothingCategory::Tshirt, ClothingStatus::Dirty),
            clothing("2", "Chinos", ClothingCategory::Pants, ClothingStatus::Clean),
            clothing("3", "Polo", ClothingCategory::Tshirt, ClothingStatus::Dirty),
            clothing("4", "Jeans", ClothingCategory::Pants, ClothingStatus::Dirty),
        ]);

        let mut query = ClothingQuery {
            sort_key: ClothingSortKey::Category,
            ..Default::default()
        };
        assert_eq!(ids(&clothing_view(&items, &query)), vec!["2", "4", "1", "3"]);

        // reversing the comparator keeps ties in their filtered order
        query.direction = SortDirection::Desc;
        assert_eq!(ids(&clothing_view(&items, &query)), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_years_of_use_sorts_by_rank_not_name() {
        let jacket = |id: &str, name: &str, years: YearsOfUse| {
            ClothingItem::new(id, name, ClothingCategory::Jacket, ClothingStatus::Clean, years)
        };
        let items = rc(vec![
            jacket("old", "A", YearsOfUse::MoreThanThreeYears),
            jacket("new", "B", YearsOfUse::LessThanAYear),
            jacket("mid", "C", YearsOfUse::OneToThreeYears),
        ]);
        let query = ClothingQuery {
            sort_key: ClothingSortKey::YearsOfUse,
            ..Default::default()
        };

        assert_eq!(ids(&clothing_view(&items, &query)), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_priority_sorts_by_rank() {
        let items = rc(vec![
            WishlistItem::new("h", "Hat", WishlistPriority::High, WishlistStatus::Pending),
            WishlistItem::new("l", "Lamp", WishlistPriority::Low, WishlistStatus::Pending),
            WishlistItem::new("m", "Mug", WishlistPriority::Medium, WishlistStatus::Bought),
        ]);
        let query = WishlistQuery {
            sort_key: WishlistSortKey::Priority,
            direction: SortDirection::Desc,
            ..Default::default()
        };

        assert_eq!(ids(&wishlist_view(&items, &query)), vec!["h", "m", "l"]);
    }

    #[test]
    fn test_name_and_tag_substring_filters() {
        let items = rc(vec![
            clothing("1", "Black T-Shirt", ClothingCategory::Tshirt, ClothingStatus::Clean)
                .with_tags(["basic", "Cotton"]),
            clothing("2", "Running Shorts", ClothingCategory::Shorts, ClothingStatus::Dirty)
                .with_tags(["sporty"]),
            clothing("3", "Cotton Chinos", ClothingCategory::Pants, ClothingStatus::Clean),
        ]);

        let by_tag = ClothingQuery {
            tag_search: "cott".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&clothing_view(&items, &by_tag)), vec!["1"]);

        let by_name = ClothingQuery {
            search: "  SHIRT ".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&clothing_view(&items, &by_name)), vec!["1"]);

        let combined = ClothingQuery {
            search: "s".to_string(),
            category: Filter::Only(ClothingCategory::Shorts),
            ..Default::default()
        };
        assert_eq!(ids(&clothing_view(&items, &combined)), vec!["2"]);
    }

    #[test]
    fn test_view_is_pure_and_repeatable() {
        let items = rc(WishlistItem::seed());
        let query = WishlistQuery {
            sort_key: WishlistSortKey::EstimatedPrice,
            direction: SortDirection::Desc,
            ..Default::default()
        };

        let first = wishlist_view(&items, &query);
        let second = wishlist_view(&items, &query);

        assert_eq!(ids(&first), ids(&second));
        assert_eq!(ids(&items), vec!["1", "2"], "source order untouched");
        assert!(Rc::ptr_eq(&first[0], &items[0]), "view shares items with the source");
    }

    #[test]
    fn test_filter_cycle_wraps_through_all() {
        let mut filter = Filter::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter = filter.cycle(&WishlistPriority::ALL);
            seen.push(filter);
        }

        assert_eq!(
            seen,
            vec![
                Filter::Only(WishlistPriority::Low),
                Filter::Only(WishlistPriority::Medium),
                Filter::Only(WishlistPriority::High),
                Filter::All,
            ]
        );
        assert_eq!(ClothingSortKey::YearsOfUse.next(), ClothingSortKey::Name);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<Filter<WishlistStatus>>(), Ok(Filter::All));
        assert_eq!(
            "bought".parse::<Filter<WishlistStatus>>(),
            Ok(Filter::Only(WishlistStatus::Bought))
        );
        assert!("gone".parse::<Filter<WishlistStatus>>().is_err());
        assert_eq!("yearsOfUse".parse::<ClothingSortKey>(), Ok(ClothingSortKey::YearsOfUse));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
    }
}
