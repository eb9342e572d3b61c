//! Domain Layer
//!
//! Backend-owned entities as the client sees them, plus the request bodies
//! the client sends. Serialization only, no I/O.

mod menu;
mod recipe;
mod shopping;

pub use menu::{
    CreateMenuRequest, MenuDay, MenuDayDto, MenuWeek, MenuWeekDto, UpdateMenuDayRequest,
};
pub use recipe::{parse_tags, IngestRecipeRequest, IngredientLine, Recipe};
pub use shopping::{GenerateShoppingListRequest, ShoppingItem, ShoppingList};
