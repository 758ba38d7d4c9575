//! Menu sections: categories in display order, each with its items.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogSnapshot;
use crate::types::{Category, MenuItem};

/// Category tab selection; `all` shows every section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `None`, empty and `all` (any case) mean every category.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some(value) if value.eq_ignore_ascii_case("all") => CategoryFilter::All,
            Some(value) => CategoryFilter::Only(value.to_string()),
        }
    }

    fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => &category.id == id,
        }
    }
}

/// One category heading and the items listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub category: Category,
    pub items: Vec<MenuItem>,
}

/// Sections for the selected categories, skipping categories with no items.
///
/// Items whose category is not in the snapshot are not listed.
pub fn menu_sections(snapshot: &CatalogSnapshot, filter: &CategoryFilter) -> Vec<MenuSection> {
    snapshot
        .categories
        .iter()
        .filter(|category| filter.matches(category))
        .filter_map(|category| {
            let items: Vec<MenuItem> = snapshot
                .menu_items
                .iter()
                .filter(|item| item.category == category.id)
                .cloned()
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(MenuSection {
                    category: category.clone(),
                    items,
                })
            }
        })
        .collect()
}

/// The tab highlighted when the menu opens: the first category.
pub fn default_category(snapshot: &CatalogSnapshot) -> Option<&Category> {
    snapshot.categories.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn snapshot() -> CatalogSnapshot {
        let mut drinks = Category::new("drinks", "Drinks", "🥤");
        drinks.sort_order = 3;
        let mut mains = Category::new("mains", "Mains", "🍲");
        mains.sort_order = 1;
        let mut sides = Category::new("sides", "Sides", "🍚");
        sides.sort_order = 2;

        CatalogSnapshot::new(
            vec![
                MenuItem::new("pares", "Beef Pares", Money::from_pesos(120), "mains"),
                MenuItem::new("mami", "Pares Mami", Money::from_pesos(130), "mains"),
                MenuItem::new("gulaman", "Sago't Gulaman", Money::from_pesos(35), "drinks"),
                MenuItem::new("orphan", "Orphan", Money::from_pesos(1), "gone"),
            ],
            vec![drinks, mains, sides],
            Vec::new(),
            None,
        )
    }

    #[test]
    fn test_all_sections_skip_empty_categories() {
        let sections = menu_sections(&snapshot(), &CategoryFilter::All);
        let ids: Vec<_> = sections.iter().map(|s| s.category.id.as_str()).collect();
        assert_eq!(ids, vec!["mains", "drinks"]);
        assert_eq!(sections[0].items.len(), 2);
    }

    #[test]
    fn test_single_category_filter() {
        let sections = menu_sections(&snapshot(), &CategoryFilter::parse(Some("drinks")));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].items[0].id, "gulaman");

        assert!(menu_sections(&snapshot(), &CategoryFilter::parse(Some("sides"))).is_empty());
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!(CategoryFilter::parse(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some(" ALL ")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(Some("mains")),
            CategoryFilter::Only("mains".to_string())
        );
    }

    #[test]
    fn test_default_category_is_first() {
        let snap = snapshot();
        assert_eq!(default_category(&snap).map(|c| c.id.as_str()), Some("mains"));
        assert!(default_category(&CatalogSnapshot::default()).is_none());
    }
}
