//! View State
//!
//! The data components render: the loaded week, the recipe lookup table and
//! the loading/error flags. The coordinator reaches it through a
//! [`StateHandle`], so the UI can back it with a reactive signal while tests
//! use a plain `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::domain::{MenuWeek, Recipe};

/// Recipes known to the client, in backend order, indexed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeTable {
    recipes: Vec<Recipe>,
    index: HashMap<String, usize>,
}

impl RecipeTable {
    /// Wholesale replacement; a repeated id keeps its first position and last value
    pub fn replace_all(&mut self, recipes: Vec<Recipe>) {
        self.recipes.clear();
        self.index.clear();
        for recipe in recipes {
            match self.index.get(&recipe.id) {
                Some(&pos) => self.recipes[pos] = recipe,
                None => {
                    self.index.insert(recipe.id.clone(), self.recipes.len());
                    self.recipes.push(recipe);
                }
            }
        }
    }

    pub fn get(&self, recipe_id: &str) -> Option<&Recipe> {
        self.index.get(recipe_id).map(|&pos| &self.recipes[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Library filtering, see [`Recipe::matches_query`]
    pub fn matching(&self, query: &str) -> Vec<Recipe> {
        self.recipes.iter().filter(|r| r.matches_query(query)).cloned().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerState {
    /// At most one week is loaded at a time
    pub current_week: Option<MenuWeek>,
    /// Week being viewed; set as soon as navigation starts
    pub current_week_start: Option<NaiveDate>,
    pub recipes: RecipeTable,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Bumped each time `current_week` is replaced
    pub week_generation: u64,
}

impl PlannerState {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Install a freshly fetched week; edits recorded against the previous
    /// copy no longer apply to it
    pub fn replace_week(&mut self, week: MenuWeek) {
        self.current_week = Some(week);
        self.week_generation = self.week_generation.wrapping_add(1);
    }

    /// Whether `week_start` is the week currently loaded
    pub fn shows_week(&self, week_start: NaiveDate) -> bool {
        self.current_week.as_ref().is_some_and(|week| week.week_start == week_start)
    }
}

/// Access to the view state. Both methods return `None` once the backing
/// storage is gone (a disposed reactive owner), which callers treat as
/// "nothing left to update".
pub trait StateHandle: Clone + 'static {
    fn update<R>(&self, f: impl FnOnce(&mut PlannerState) -> R) -> Option<R>;

    fn read<R>(&self, f: impl FnOnce(&PlannerState) -> R) -> Option<R>;
}

/// Plain shared state for native use and tests
#[derive(Clone, Default)]
pub struct SharedState(Rc<RefCell<PlannerState>>);

impl SharedState {
    pub fn new(state: PlannerState) -> Self {
        Self(Rc::new(RefCell::new(state)))
    }

    pub fn snapshot(&self) -> PlannerState {
        self.0.borrow().clone()
    }
}

impl StateHandle for SharedState {
    fn update<R>(&self, f: impl FnOnce(&mut PlannerState) -> R) -> Option<R> {
        Some(f(&mut self.0.borrow_mut()))
    }

    fn read<R>(&self, f: impl FnOnce(&PlannerState) -> R) -> Option<R> {
        Some(f(&self.0.borrow()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_all_keeps_backend_order_and_indexes() {
        let mut table = RecipeTable::default();
        table.replace_all(vec![Recipe::new("b", "Bread"), Recipe::new("a", "Apple Pie")]);

        let ids: Vec<&str> = table.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(table.get("a").map(|r| r.title.as_str()), Some("Apple Pie"));
        assert!(table.get("zzz").is_none());

        table.replace_all(vec![Recipe::new("c", "Curry")]);
        assert_eq!(table.len(), 1);
        assert!(table.get("a").is_none());
    }

    #[test]
    fn repeated_id_keeps_single_entry() {
        let mut table = RecipeTable::default();
        table.replace_all(vec![
            Recipe::new("x", "First"),
            Recipe::new("y", "Other"),
            Recipe::new("x", "Second"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("x").unwrap().title, "Second");
        assert_eq!(table.iter().next().unwrap().id, "x");
    }

    #[test]
    fn matching_filters_by_title_and_tag() {
        let mut pie = Recipe::new("p", "Apple Pie");
        pie.tags = vec!["dessert".into()];
        let mut table = RecipeTable::default();
        table.replace_all(vec![pie, Recipe::new("s", "Soup")]);

        assert_eq!(table.matching("").len(), 2);
        assert_eq!(table.matching("DESS")[0].id, "p");
        assert!(table.matching("steak").is_empty());
    }

    #[test]
    fn shared_state_handles_share_storage() {
        let state = SharedState::default();
        let other = state.clone();
        state.update(|s| s.set_error("boom"));
        assert_eq!(other.read(|s| s.error.clone()).flatten().as_deref(), Some("boom"));
    }
}
