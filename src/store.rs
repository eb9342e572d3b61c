//! UI Stores
//!
//! `UiState` holds what only the presentation cares about and uses
//! reactive_stores for field-level reactivity. The planner view state lives
//! in a plain signal that the coordinator writes through [`PlannerSignal`].

use leptos::prelude::*;
use planner_core::{PlannerState, StateHandle};
use reactive_stores::Store;

/// Presentation-only state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Library filter text
    pub search_query: String,
    /// Recipe shown in the detail modal
    pub selected_recipe_id: Option<String>,
    /// "Add recipe" modal
    pub ingest_modal_open: bool,
    pub shopping_drawer_open: bool,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

/// Planner view state behind a reactive signal. Updates notify every
/// component reading the signal; reads from the coordinator are untracked.
#[derive(Clone, Copy)]
pub struct PlannerSignal(pub RwSignal<PlannerState>);

impl StateHandle for PlannerSignal {
    fn update<R>(&self, f: impl FnOnce(&mut PlannerState) -> R) -> Option<R> {
        self.0.try_update(f)
    }

    fn read<R>(&self, f: impl FnOnce(&PlannerState) -> R) -> Option<R> {
        self.0.try_with_untracked(f)
    }
}
