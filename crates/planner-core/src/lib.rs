//! Meal Planner Core
//!
//! Everything below the presentation layer:
//! - domain: recipes, menu weeks and shopping lists plus their wire shapes
//! - week: week-boundary calculator and timezone handling
//! - api: the backend contract and its reqwest implementation
//! - state: the view-state container and the handle components observe
//! - txn: optimistic day transactions with per-day serialization
//! - coordinator: the menu operations gestures are routed to
//! - dnd: tagged drag payloads and drop resolution

pub mod api;
pub mod config;
pub mod coordinator;
pub mod dnd;
pub mod domain;
pub mod error;
pub mod state;
pub mod txn;
pub mod week;

pub use api::{MenuApi, RecipeQuery, RestClient};
pub use config::ClientConfig;
pub use coordinator::MenuCoordinator;
pub use dnd::{DragPayload, DropAction, DropTarget};
pub use domain::{IngredientLine, MenuDay, MenuWeek, Recipe, ShoppingItem, ShoppingList};
pub use error::{ApiError, ApiResult, PlannerError, PlannerResult};
pub use state::{PlannerState, RecipeTable, SharedState, StateHandle};
pub use txn::{DayQueue, DayTransaction, Outcome};
