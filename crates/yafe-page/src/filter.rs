//! Menu explorer filtering.
//!
//! Three filters combine by conjunction: the active category tab, the
//! set of toggled dietary chips, and the debounced search query. An
//! item is visible only when it passes all three.

use std::collections::BTreeSet;

use yafe_types::menu::{CategoryFilter, Dietary, MenuItem};

#[derive(Debug, Default)]
pub struct FilterState {
    category: CategoryFilter,
    dietary: BTreeSet<Dietary>,
    query: String,
}

/// Per-item visibility for one pass over the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    /// Parallel to the menu: `visible[i]` says whether item `i` shows.
    pub visible: Vec<bool>,
    /// Number of visible items.
    pub matched: usize,
}

impl FilterResult {
    /// True when the "no dishes match" message should show.
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn dietary(&self) -> &BTreeSet<Dietary> {
        &self.dietary
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Activate a category tab. The previous tab deactivates implicitly.
    pub fn select_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Toggle a dietary chip. Returns true when the chip is now on.
    pub fn toggle_dietary(&mut self, tag: Dietary) -> bool {
        if self.dietary.remove(&tag) {
            false
        } else {
            self.dietary.insert(tag);
            true
        }
    }

    /// Replace the search query (already debounced by the caller).
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Whether one item passes every active filter.
    pub fn matches(&self, item: &MenuItem) -> bool {
        if !self.category.admits(item.category) {
            return false;
        }
        if !self.dietary.iter().all(|tag| item.dietary.contains(tag)) {
            return false;
        }
        let query = self.query.trim();
        if query.is_empty() {
            return true;
        }
        item.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Run the filter over the whole menu.
    pub fn apply(&self, menu: &[MenuItem]) -> FilterResult {
        let visible: Vec<bool> = menu.iter().map(|item| self.matches(item)).collect();
        let matched = visible.iter().filter(|v| **v).count();
        FilterResult { visible, matched }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yafe_types::menu::Category;

    fn sample_menu() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Sambusa", Category::Starter, "90 ETB").with_tag(Dietary::Vegetarian),
            MenuItem::new("Doro Wat", Category::Main, "260 ETB").with_tag(Dietary::Spicy),
            MenuItem::new("Beyaynetu", Category::Main, "220 ETB")
                .with_tag(Dietary::Vegan)
                .with_tag(Dietary::GlutenFree),
            MenuItem::new("Injera", Category::Bread, "40 ETB")
                .with_tag(Dietary::Vegan)
                .with_tag(Dietary::GlutenFree),
        ]
    }

    #[test]
    fn default_filter_shows_everything() {
        let filter = FilterState::new();
        let result = filter.apply(&sample_menu());
        assert_eq!(result.matched, 4);
        assert!(result.visible.iter().all(|v| *v));
        assert!(!result.is_empty());
    }

    #[test]
    fn category_tab_narrows() {
        let mut filter = FilterState::new();
        filter.select_category(CategoryFilter::Only(Category::Main));
        let result = filter.apply(&sample_menu());
        assert_eq!(result.visible, vec![false, true, true, false]);
    }

    #[test]
    fn selecting_all_restores_everything() {
        let mut filter = FilterState::new();
        filter.select_category(CategoryFilter::Only(Category::Bread));
        filter.select_category(CategoryFilter::All);
        assert_eq!(filter.apply(&sample_menu()).matched, 4);
    }

    #[test]
    fn dietary_chips_require_every_tag() {
        let mut filter = FilterState::new();
        filter.toggle_dietary(Dietary::Vegan);
        filter.toggle_dietary(Dietary::GlutenFree);
        let result = filter.apply(&sample_menu());
        // Only items tagged both vegan and gluten-free.
        assert_eq!(result.visible, vec![false, false, true, true]);
    }

    #[test]
    fn toggle_dietary_reports_new_state() {
        let mut filter = FilterState::new();
        assert!(filter.toggle_dietary(Dietary::Spicy));
        assert!(!filter.toggle_dietary(Dietary::Spicy));
        assert!(filter.dietary().is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut filter = FilterState::new();
        filter.set_query("DORO");
        let result = filter.apply(&sample_menu());
        assert_eq!(result.visible, vec![false, true, false, false]);
    }

    #[test]
    fn blank_query_matches_everything() {
        let mut filter = FilterState::new();
        filter.set_query("   ");
        assert_eq!(filter.apply(&sample_menu()).matched, 4);
    }

    #[test]
    fn filters_combine_by_conjunction() {
        let mut filter = FilterState::new();
        filter.select_category(CategoryFilter::Only(Category::Main));
        filter.toggle_dietary(Dietary::Vegan);
        filter.set_query("bey");
        let result = filter.apply(&sample_menu());
        assert_eq!(result.visible, vec![false, false, true, false]);

        // Same query, wrong category: nothing survives.
        filter.select_category(CategoryFilter::Only(Category::Dessert));
        assert!(filter.apply(&sample_menu()).is_empty());
    }

    #[test]
    fn empty_menu_yields_empty_result() {
        let filter = FilterState::new();
        let result = filter.apply(&[]);
        assert!(result.visible.is_empty());
        assert!(result.is_empty());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_category() -> impl Strategy<Value = Category> {
            prop_oneof![
                Just(Category::Starter),
                Just(Category::Main),
                Just(Category::Rice),
                Just(Category::Bread),
                Just(Category::Dessert),
            ]
        }

        fn arb_dietary_set() -> impl Strategy<Value = BTreeSet<Dietary>> {
            proptest::collection::btree_set(
                prop_oneof![
                    Just(Dietary::Vegetarian),
                    Just(Dietary::Vegan),
                    Just(Dietary::GlutenFree),
                    Just(Dietary::Spicy),
                ],
                0..=4,
            )
        }

        fn arb_item() -> impl Strategy<Value = MenuItem> {
            ("[A-Za-z ]{1,16}", arb_category(), arb_dietary_set()).prop_map(
                |(name, category, dietary)| {
                    let mut item = MenuItem::new(&name, category, "100 ETB");
                    item.dietary = dietary;
                    item
                },
            )
        }

        fn arb_filter() -> impl Strategy<Value = FilterState> {
            (
                proptest::option::of(arb_category()),
                arb_dietary_set(),
                "[a-z]{0,6}",
            )
                .prop_map(|(category, dietary, query)| {
                    let mut filter = FilterState::new();
                    filter.select_category(match category {
                        Some(c) => CategoryFilter::Only(c),
                        None => CategoryFilter::All,
                    });
                    for tag in dietary {
                        filter.toggle_dietary(tag);
                    }
                    filter.set_query(&query);
                    filter
                })
        }

        proptest! {
            #[test]
            fn visibility_is_the_conjunction_of_the_three_filters(
                menu in proptest::collection::vec(arb_item(), 0..12),
                filter in arb_filter(),
            ) {
                let result = filter.apply(&menu);
                prop_assert_eq!(result.visible.len(), menu.len());
                for (item, visible) in menu.iter().zip(&result.visible) {
                    let by_category = filter.category().admits(item.category);
                    let by_dietary =
                        filter.dietary().iter().all(|t| item.dietary.contains(t));
                    let query = filter.query().trim().to_lowercase();
                    let by_query =
                        query.is_empty() || item.name.to_lowercase().contains(&query);
                    prop_assert_eq!(*visible, by_category && by_dietary && by_query);
                }
            }

            #[test]
            fn matched_counts_visible_items(
                menu in proptest::collection::vec(arb_item(), 0..12),
                filter in arb_filter(),
            ) {
                let result = filter.apply(&menu);
                let count = result.visible.iter().filter(|v| **v).count();
                prop_assert_eq!(result.matched, count);
                prop_assert_eq!(result.is_empty(), count == 0);
            }

            #[test]
            fn widening_a_filter_never_hides_items(
                menu in proptest::collection::vec(arb_item(), 0..12),
                filter in arb_filter(),
            ) {
                let narrowed = filter.apply(&menu);
                let mut widened_filter = FilterState::new();
                widened_filter.set_query(filter.query());
                for tag in filter.dietary() {
                    widened_filter.toggle_dietary(*tag);
                }
                // Category widened to All; everything visible stays visible.
                let widened = widened_filter.apply(&menu);
                for (narrow, wide) in narrowed.visible.iter().zip(&widened.visible) {
                    prop_assert!(!narrow || *wide);
                }
            }
        }
    }
}
