//! Menu data model.
//!
//! Menu items are declared in the site config and filtered client-side
//! by category, dietary tags, and free-text search. The filtering logic
//! itself lives in the page crate; this module is just the data.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Menu section a dish belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Starter,
    Main,
    Rice,
    Bread,
    Dessert,
}

impl Category {
    /// Every category, in display order.
    pub fn all() -> [Category; 5] {
        [
            Category::Starter,
            Category::Main,
            Category::Rice,
            Category::Bread,
            Category::Dessert,
        ]
    }

    /// Label shown on the category tab.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Starter => "Starters",
            Category::Main => "Main Dishes",
            Category::Rice => "Rice",
            Category::Bread => "Bread",
            Category::Dessert => "Desserts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category tab selection. Exactly one tab is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// The "All" tab: no category restriction.
    #[default]
    All,
    /// A single category tab.
    Only(Category),
}

impl CategoryFilter {
    /// Whether an item in `category` passes this filter.
    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

/// Dietary tag attached to a menu item.
///
/// `Ord` so tags sit in a `BTreeSet` and render in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dietary {
    Vegetarian,
    Vegan,
    GlutenFree,
    Spicy,
}

impl Dietary {
    /// Every tag, in display order.
    pub fn all() -> [Dietary; 4] {
        [
            Dietary::Vegetarian,
            Dietary::Vegan,
            Dietary::GlutenFree,
            Dietary::Spicy,
        ]
    }

    /// Label shown on the tag chip.
    pub fn label(&self) -> &'static str {
        match self {
            Dietary::Vegetarian => "Vegetarian",
            Dietary::Vegan => "Vegan",
            Dietary::GlutenFree => "Gluten-free",
            Dietary::Spicy => "Spicy",
        }
    }
}

/// One dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub category: Category,
    /// Dietary tags the dish carries. Absent in config means none.
    #[serde(default)]
    pub dietary: BTreeSet<Dietary>,
    /// Display price, already formatted (e.g. `"240 ETB"`).
    pub price: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl MenuItem {
    /// Convenience constructor used by the default menu and tests.
    pub fn new(name: &str, category: Category, price: &str) -> Self {
        MenuItem {
            name: name.to_string(),
            category,
            dietary: BTreeSet::new(),
            price: price.to_string(),
            description: None,
        }
    }

    /// Add a dietary tag, builder-style.
    pub fn with_tag(mut self, tag: Dietary) -> Self {
        self.dietary.insert(tag);
        self
    }
}
