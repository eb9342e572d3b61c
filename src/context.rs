//! Application Context
//!
//! The coordinator, planner state and drag signals, provided via Leptos
//! Context API.

use std::future::Future;

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::DndSignals;
use planner_core::{week, DragPayload, DropTarget, MenuCoordinator, PlannerState, RestClient};

use crate::store::PlannerSignal;

pub type Coordinator = MenuCoordinator<RestClient, PlannerSignal>;

pub type PlannerDnd = DndSignals<DragPayload, DropTarget>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Coordinator is `!Send`; kept in local storage
    coordinator: StoredValue<Coordinator, LocalStorage>,
    /// View state the coordinator writes
    pub planner: RwSignal<PlannerState>,
    pub dnd: PlannerDnd,
    /// Calendar date at startup in the configured timezone
    pub today: NaiveDate,
}

impl AppContext {
    pub fn new(coordinator: Coordinator, dnd: PlannerDnd) -> Self {
        let planner = coordinator.state().0;
        let today = week::today_in(coordinator.timezone());
        Self {
            coordinator: StoredValue::new_local(coordinator),
            planner,
            dnd,
            today,
        }
    }

    /// Run a coordinator operation in the background; the caller does not wait
    pub fn spawn<F, Fut>(&self, op: F)
    where
        F: FnOnce(Coordinator) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        if let Some(coordinator) = self.coordinator.try_get_value() {
            spawn_local(op(coordinator));
        }
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
