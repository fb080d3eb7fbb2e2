//! Domain model for budget categories.

use serde::{Deserialize, Serialize};

use crate::common::{Identifiable, RecordId};

/// A spending category with an optional monthly budget.
///
/// The name doubles as the join key from transactions. A budget of zero
/// means "not budgeted"; such categories still classify spending but are
/// excluded from budget views and alerts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    /// Monthly budget amount; 0 disables budgeting for this category.
    pub budget: f64,
    /// Display color as a `#rrggbb` hex string.
    pub color: String,
}

impl Category {
    pub fn is_budgeted(&self) -> bool {
        self.budget > 0.0
    }
}

impl Identifiable for Category {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field set for a new category before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub budget: f64,
    pub color: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, budget: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            budget,
            color: color.into(),
        }
    }

    pub fn into_category(self, id: RecordId) -> Category {
        Category {
            id,
            name: self.name,
            budget: self.budget,
            color: self.color,
        }
    }
}

/// Shallow changeset for [`Category`].
///
/// Renaming does not cascade into transactions that reference the old name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CategoryPatch {
    pub fn apply(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(budget) = self.budget {
            category.budget = budget;
        }
        if let Some(color) = self.color {
            category.color = color;
        }
    }
}

/// The fixed category set a fresh (or reset) data set starts with.
pub fn default_categories() -> Vec<Category> {
    [
        ("Housing", 1500.0, "#3b82f6"),
        ("Food", 600.0, "#10b981"),
        ("Transportation", 300.0, "#f59e0b"),
        ("Utilities", 200.0, "#8b5cf6"),
        ("Entertainment", 150.0, "#ef4444"),
        ("Healthcare", 300.0, "#06b6d4"),
        ("Shopping", 250.0, "#84cc16"),
        ("Salary", 0.0, "#059669"),
        ("Freelance", 0.0, "#0ea5e9"),
        ("Other", 100.0, "#6b7280"),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (name, budget, color))| Category {
        id: index as RecordId + 1,
        name: name.into(),
        budget,
        color: color.into(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_ten_entries_with_sequential_ids() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 10);
        assert_eq!(defaults[0].name, "Housing");
        assert_eq!(defaults[0].id, 1);
        assert_eq!(defaults[9].id, 10);
    }

    #[test]
    fn salary_and_freelance_are_unbudgeted() {
        let defaults = default_categories();
        let salary = defaults.iter().find(|c| c.name == "Salary").unwrap();
        assert!(!salary.is_budgeted());
    }
}
