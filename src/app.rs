//! Meal Planner Frontend App
//!
//! Builds the client, view state and coordinator, provides them through
//! context and lays out library, planner, modals and drawer.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};
use log::info;
use planner_core::{ClientConfig, DragPayload, DropTarget, MenuCoordinator, PlannerState, RestClient};
use reactive_stores::Store;

use crate::components::{DragOverlay, RecipeDetailModal, RecipeLibrary, ShoppingListDrawer, WeeklyPlanner};
use crate::context::AppContext;
use crate::store::{PlannerSignal, UiState, UiStateStoreFields, UiStore};

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_build_env();
    info!("Meal planner using {} ({})", config.base_url, config.timezone);

    // State
    let planner = RwSignal::new(PlannerState::default());
    let coordinator = MenuCoordinator::new(
        Rc::new(RestClient::new(&config)),
        PlannerSignal(planner),
        config.timezone,
    );
    let dnd = create_dnd_signals::<DragPayload, DropTarget>();
    let ctx = AppContext::new(coordinator, dnd);
    let store: UiStore = Store::new(UiState::default());

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    // Initial load: recipe table, then this week
    ctx.spawn(|c| async move {
        let _ = c.load_recipes().await;
        let _ = c.go_to_current_week().await;
    });

    // Drops become coordinator edits
    bind_global_mouseup(dnd, move |payload, target| {
        ctx.spawn(move |c| async move {
            c.handle_drop(payload, target).await;
        });
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Meal Planner"</h1>
                <div class="app-actions">
                    <button on:click=move |_| store.ingest_modal_open().set(true)>"Add Recipe"</button>
                    <button on:click=move |_| store.shopping_drawer_open().set(true)>"Shopping List"</button>
                </div>
            </header>

            <div class="app-body">
                <RecipeLibrary />
                <main class="main-content">
                    <WeeklyPlanner />
                </main>
            </div>

            <RecipeDetailModal />
            <ShoppingListDrawer />
            <DragOverlay />
        </div>
    }
}
