//! Recipe Library Component
//!
//! Sidebar of known recipes filtered by title or tag, each a drag source,
//! plus the "add recipe" modal that submits raw text for ingestion.

use leptos::prelude::*;
use leptos_dragdrop::make_on_mousedown;
use planner_core::domain::parse_tags;
use planner_core::{DragPayload, Recipe};

use crate::components::Modal;
use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn RecipeLibrary() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let planner = ctx.planner;

    let recipes = move || {
        let query = store.search_query().get();
        planner.with(|s| s.recipes.matching(&query))
    };
    let total = move || planner.with(|s| s.recipes.len());

    view! {
        <aside class="recipe-library">
            <div class="library-header">
                <h3>"Recipe Library"</h3>
                <p class="library-hint">"Drag recipes to your meal plan"</p>
            </div>

            <input
                class="library-search"
                type="search"
                placeholder="Search by title or tag..."
                prop:value=move || store.search_query().get()
                on:input=move |ev| store.search_query().set(event_target_value(&ev))
            />

            <button class="library-add-btn" on:click=move |_| store.ingest_modal_open().set(true)>
                "+ Add recipe"
            </button>

            <div class="library-list">
                <For
                    each=recipes
                    key=|recipe| recipe.id.clone()
                    children=move |recipe| view! { <RecipeCard recipe=recipe /> }
                />
            </div>

            {move || {
                let shown = recipes().len();
                match (total(), shown) {
                    (0, _) => Some("No recipes yet".to_string()),
                    (all, 0) => Some(format!("No matches among {} recipes", all)),
                    _ => None,
                }
                .map(|msg| view! { <div class="library-empty">{msg}</div> })
            }}
        </aside>

        <IngestRecipeModal />
    }
}

/// Library entry; dragging it onto a day assigns the recipe
#[component]
fn RecipeCard(recipe: Recipe) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let dnd = ctx.dnd;
    let id = recipe.id.clone();
    let summary = recipe.summary_line();

    let on_mousedown = make_on_mousedown(dnd, DragPayload::LibraryRecipe { recipe_id: id.clone() });

    let dragged_id = id.clone();
    let is_dragging = move || {
        dnd.dragging_read.with(|payload| {
            matches!(payload, Some(DragPayload::LibraryRecipe { recipe_id }) if *recipe_id == dragged_id)
        })
    };

    view! {
        <div
            class=move || if is_dragging() { "recipe-card dragging" } else { "recipe-card" }
            on:mousedown=on_mousedown
        >
            <div class="recipe-card-title">{recipe.title}</div>
            {(!summary.is_empty()).then(|| view! { <div class="recipe-card-summary">{summary}</div> })}
            <div class="recipe-card-tags">
                {recipe.tags.into_iter().map(|tag| view! { <span class="tag-chip">{tag}</span> }).collect_view()}
            </div>
            <button
                class="recipe-info-btn"
                title="Details"
                on:click=move |_| store.selected_recipe_id().set(Some(id.clone()))
            >
                "i"
            </button>
        </div>
    }
}

/// Raw-text ingestion form
#[component]
fn IngestRecipeModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let (raw_text, set_raw_text) = signal(String::new());
    let (tags, set_tags) = signal(String::new());
    let (ingesting, set_ingesting) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let close = move || {
        store.ingest_modal_open().set(false);
        set_error.set(None);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = raw_text.get();
        if text.trim().is_empty() || ingesting.get() { return; }
        let tags = parse_tags(&tags.get());

        set_ingesting.set(true);
        ctx.spawn(move |c| async move {
            match c.ingest_recipe(&text, tags).await {
                Ok(_) => {
                    set_raw_text.set(String::new());
                    set_tags.set(String::new());
                    close();
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
            set_ingesting.set(false);
        });
    };

    view! {
        <Modal
            open=Signal::derive(move || store.ingest_modal_open().get())
            title="Add Recipe"
            on_close=Callback::new(move |_| close())
        >
            <form class="ingest-form" on:submit=submit>
                <label>"Recipe text"</label>
                <textarea
                    rows="12"
                    placeholder="Paste a recipe: title, ingredients, steps..."
                    prop:value=move || raw_text.get()
                    on:input=move |ev| set_raw_text.set(event_target_value(&ev))
                ></textarea>
                <label>"Tags (comma separated)"</label>
                <input
                    type="text"
                    placeholder="dinner, vegetarian"
                    prop:value=move || tags.get()
                    on:input=move |ev| set_tags.set(event_target_value(&ev))
                />
                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
                <div class="form-actions">
                    <button type="button" on:click=move |_| close()>"Cancel"</button>
                    <button
                        type="submit"
                        disabled=move || raw_text.with(|t| t.trim().is_empty()) || ingesting.get()
                    >
                        {move || if ingesting.get() { "Adding..." } else { "Add recipe" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
