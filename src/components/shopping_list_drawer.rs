//! Shopping List Drawer
//!
//! Generates the shopping list for a week id (the loaded week by default),
//! lets the user check items off and copies the list as plain text.

use std::collections::BTreeSet;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use planner_core::{MenuWeek, ShoppingList};

use crate::clipboard;
use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

const COPIED_FLASH_MS: u32 = 1500;

#[component]
pub fn ShoppingListDrawer() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let (week_id, set_week_id) = signal(String::new());
    let list = RwSignal::new(None::<ShoppingList>);
    let checked = RwSignal::new(BTreeSet::<usize>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (copied, set_copied) = signal(false);

    let open = move || store.shopping_drawer_open().get();

    // Prefill with the loaded week each time the drawer opens
    Effect::new(move |_| {
        if open() {
            let current = ctx
                .planner
                .with_untracked(|s| s.current_week.as_ref().map(MenuWeek::week_id));
            if let Some(id) = current {
                set_week_id.set(id);
            }
        }
    });

    let generate = move || {
        let id = week_id.get_untracked().trim().to_string();
        if id.is_empty() { return; }
        checked.set(BTreeSet::new());
        set_error.set(None);
        set_loading.set(true);
        ctx.spawn(move |c| async move {
            match c.generate_shopping_list(&id).await {
                Ok(generated) => list.set(Some(generated)),
                Err(err) => {
                    list.set(None);
                    set_error.set(Some(err.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    let copy = move |_: web_sys::MouseEvent| {
        let Some(text) = list.with(|l| l.as_ref().map(|l| checked.with(|c| l.to_clipboard_text(c)))) else {
            return;
        };
        spawn_local(async move {
            match clipboard::write_text(&text).await {
                Ok(()) => {
                    set_copied.set(true);
                    TimeoutFuture::new(COPIED_FLASH_MS).await;
                    set_copied.set(false);
                }
                Err(err) => set_error.set(Some(err)),
            }
        });
    };

    let toggle = move |index: usize| {
        checked.update(|set| {
            if !set.remove(&index) {
                set.insert(index);
            }
        });
    };

    view! {
        <Show when=open>
            <div class="drawer-root">
                <div class="drawer-backdrop" on:click=move |_| store.shopping_drawer_open().set(false)></div>
                <aside class="drawer">
                    <div class="drawer-header">
                        <div>
                            <h3>"Shopping List"</h3>
                            <p class="drawer-hint">"Generated from your meal plan"</p>
                        </div>
                        <button class="modal-close" on:click=move |_| store.shopping_drawer_open().set(false)>"×"</button>
                    </div>

                    <form class="drawer-week" on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        generate();
                    }>
                        <label>"Week ID"</label>
                        <input
                            type="text"
                            placeholder="week_2025-08-11"
                            prop:value=move || week_id.get()
                            on:input=move |ev| set_week_id.set(event_target_value(&ev))
                        />
                        <button type="submit" disabled=move || week_id.with(|w| w.trim().is_empty()) || loading.get()>
                            "Generate"
                        </button>
                    </form>

                    {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}

                    <Show when=move || loading.get()>
                        <div class="drawer-loading">"Generating shopping list…"</div>
                    </Show>

                    {move || list.get().map(|l| {
                        let empty = l.items.is_empty();
                        let items = l.items.into_iter().enumerate().map(|(index, item)| {
                            let is_checked = move || checked.with(|c| c.contains(&index));
                            view! {
                                <li
                                    class=move || if is_checked() { "shopping-item checked" } else { "shopping-item" }
                                    on:click=move |_| toggle(index)
                                >
                                    <span class="shopping-check">{move || if is_checked() { "✅" } else { "⬜" }}</span>
                                    <span class="shopping-line">{item.display_line()}</span>
                                </li>
                            }
                        }).collect_view();
                        view! {
                            <div class="drawer-actions">
                                <button on:click=copy>{move || if copied.get() { "Copied!" } else { "Copy" }}</button>
                                <button on:click=move |_| checked.set(BTreeSet::new())>"Clear checks"</button>
                            </div>
                            <ul class="shopping-items">{items}</ul>
                            {empty.then(|| view! { <div class="drawer-empty">"No items in this list"</div> })}
                        }
                    })}
                </aside>
            </div>
        </Show>
    }
}
