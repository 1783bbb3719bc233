// 📊 Overview Stats - quick numbers for the overview page

use crate::entities::{
    ClothingCategory, ClothingItem, ClothingStatus, WishlistItem, WishlistPriority, WishlistStatus,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverviewStats {
    pub clothing_total: usize,
    pub clean: usize,
    pub dirty: usize,
    pub by_category: BTreeMap<ClothingCategory, usize>,

    pub wishlist_total: usize,
    pub pending: usize,
    pub bought: usize,
    /// Sum of estimated prices of pending items (missing prices add nothing)
    pub pending_estimated_total: f64,
    pub high_priority_pending: usize,
}

pub fn overview(clothing: &[Rc<ClothingItem>], wishlist: &[Rc<WishlistItem>]) -> OverviewStats {
    let mut stats = OverviewStats {
        clothing_total: clothing.len(),
        wishlist_total: wishlist.len(),
        ..Default::default()
    };

    for item in clothing {
        match item.status {
            ClothingStatus::Clean => stats.clean += 1,
            ClothingStatus::Dirty => stats.dirty += 1,
        }
        *stats.by_category.entry(item.category).or_insert(0) += 1;
    }

    for item in wishlist {
        match item.status {
            WishlistStatus::Pending => {
                stats.pending += 1;
                stats.pending_estimated_total += item.estimated_price.unwrap_or(0.0);
                if item.priority == WishlistPriority::High {
                    stats.high_priority_pending += 1;
                }
            }
            WishlistStatus::Bought => stats.bought += 1,
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Entity;

    fn rc<T>(items: Vec<T>) -> Vec<Rc<T>> {
        items.into_iter().map(Rc::new).collect()
    }

    #[test]
    fn test_overview_of_seed_data() {
        let stats = overview(&rc(ClothingItem::seed()), &rc(WishlistItem::seed()));

        assert_eq!(stats.clothing_total, 2);
        assert_eq!(stats.clean, 1);
        assert_eq!(stats.dirty, 1);
        assert_eq!(stats.by_category.get(&ClothingCategory::Tshirt), Some(&1));
        assert_eq!(stats.by_category.get(&ClothingCategory::Shorts), Some(&1));
        assert_eq!(stats.by_category.get(&ClothingCategory::Shoes), None);

        assert_eq!(stats.wishlist_total, 2);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.bought, 0);
        assert_eq!(stats.pending_estimated_total, 200.0);
        assert_eq!(stats.high_priority_pending, 1);
    }

    #[test]
    fn test_bought_and_unpriced_items_do_not_count_toward_total() {
        let wishlist = rc(vec![
            WishlistItem::new("a", "Boots", WishlistPriority::High, WishlistStatus::Bought)
                .with_price(200.0),
            WishlistItem::new("b", "Socks", WishlistPriority::Low, WishlistStatus::Pending),
            WishlistItem::new("c", "Gloves", WishlistPriority::Medium, WishlistStatus::Pending)
                .with_price(15.5),
        ]);

        let stats = overview(&[], &wishlist);

        assert_eq!(stats.clothing_total, 0);
        assert_eq!(stats.bought, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.pending_estimated_total, 15.5);
        assert_eq!(stats.high_priority_pending, 0);
    }
}
