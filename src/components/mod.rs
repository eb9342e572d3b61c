//! UI Components
//!
//! Presentation only: render planner state, forward gestures to the
//! coordinator.

mod drag_overlay;
mod modal;
mod recipe_detail_modal;
mod recipe_library;
mod shopping_list_drawer;
mod weekly_planner;

pub use drag_overlay::DragOverlay;
pub use modal::Modal;
pub use recipe_detail_modal::RecipeDetailModal;
pub use recipe_library::RecipeLibrary;
pub use shopping_list_drawer::ShoppingListDrawer;
pub use weekly_planner::WeeklyPlanner;
