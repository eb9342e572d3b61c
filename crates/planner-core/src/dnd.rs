//! Drag Payloads
//!
//! What a drag carries and where it can land. The drop handler matches
//! exhaustively on both, so a new payload kind has to be handled explicitly.

use chrono::NaiveDate;

use crate::domain::Recipe;
use crate::state::RecipeTable;

#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    /// Card from the recipe library
    LibraryRecipe { recipe_id: String },
    /// Meal already placed on a day
    Meal { recipe: Recipe, source_date: NaiveDate, index: usize },
}

impl DragPayload {
    /// Label for the drag overlay
    pub fn title<'a>(&'a self, recipes: &'a RecipeTable) -> Option<&'a str> {
        match self {
            DragPayload::LibraryRecipe { recipe_id } => {
                recipes.get(recipe_id).map(|r| r.title.as_str())
            }
            DragPayload::Meal { recipe, .. } => Some(recipe.title.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    Day(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropAction {
    Assign { date: NaiveDate, recipe: Recipe },
}

/// Decide what a drop does. `None` means it does nothing: an unknown library
/// id, or a meal dropped back onto its own day.
pub fn resolve_drop(
    payload: &DragPayload,
    target: &DropTarget,
    recipes: &RecipeTable,
) -> Option<DropAction> {
    match (payload, *target) {
        (DragPayload::LibraryRecipe { recipe_id }, DropTarget::Day(date)) => recipes
            .get(recipe_id)
            .cloned()
            .map(|recipe| DropAction::Assign { date, recipe }),
        (DragPayload::Meal { source_date, .. }, DropTarget::Day(date)) if *source_date == date => {
            None
        }
        // moving between days copies; the source day keeps its meal
        (DragPayload::Meal { recipe, .. }, DropTarget::Day(date)) => {
            Some(DropAction::Assign { date, recipe: recipe.clone() })
        }
    }
}
