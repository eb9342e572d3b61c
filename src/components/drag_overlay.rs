//! Drag Overlay
//!
//! Floating label that follows the pointer while something is dragged.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn DragOverlay() -> impl IntoView {
    let ctx = use_app_context();
    let dnd = ctx.dnd;

    let label = move || {
        dnd.dragging_read.with(|payload| {
            payload.as_ref().and_then(|p| ctx.planner.with(|s| p.title(&s.recipes).map(str::to_string)))
        })
    };

    view! {
        {move || label().map(|title| {
            let style = move || {
                let (x, y) = dnd.pointer_read.get();
                format!("left: {}px; top: {}px;", x + 12, y + 12)
            };
            view! { <div class="drag-overlay" style=style>{title}</div> }
        })}
    }
}
