//! Recipe Detail Modal
//!
//! Full view of the selected recipe. Shows the cached copy straight away and
//! replaces it with a fresh fetch from the backend.

use leptos::prelude::*;
use planner_core::Recipe;

use crate::components::Modal;
use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn RecipeDetailModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let recipe = RwSignal::new(None::<Recipe>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        let Some(id) = store.selected_recipe_id().get() else {
            recipe.set(None);
            return;
        };
        recipe.set(ctx.planner.with_untracked(|s| s.recipes.get(&id).cloned()));
        set_error.set(None);
        set_loading.set(true);

        ctx.spawn(move |c| async move {
            let result = c.get_recipe(&id).await;
            let current = store.selected_recipe_id().get_untracked();
            if current.as_deref() != Some(id.as_str()) {
                // closed: nothing else will clear the flag; a newer selection
                // clears it when its own fetch lands
                if current.is_none() {
                    set_loading.set(false);
                }
                return;
            }
            match result {
                Ok(fetched) => recipe.set(Some(fetched)),
                Err(err) => {
                    log::warn!("Failed to fetch recipe {id}: {err}");
                    set_error.set(Some(err.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    let title = move || recipe.with(|r| r.as_ref().map(|r| r.title.clone())).unwrap_or_default();

    view! {
        <Modal
            open=Signal::derive(move || store.selected_recipe_id().with(Option::is_some))
            title="Recipe"
            class="recipe-detail"
            on_close=Callback::new(move |_| store.selected_recipe_id().set(None))
        >
            <h2 class="recipe-detail-title">{title}</h2>
            <Show when=move || loading.get()>
                <div class="recipe-detail-loading">"Loading…"</div>
            </Show>
            {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
            {move || recipe.get().map(|r| view! { <RecipeBody recipe=r /> })}
        </Modal>
    }
}

#[component]
fn RecipeBody(recipe: Recipe) -> impl IntoView {
    let summary = recipe.summary_line();
    let meta: Vec<String> = [recipe.cuisine.clone(), recipe.diet.clone()].into_iter().flatten().collect();

    view! {
        <div class="recipe-detail-body">
            {(!summary.is_empty()).then(|| view! { <p class="recipe-summary">{summary}</p> })}
            {(!meta.is_empty()).then(|| view! { <p class="recipe-meta">{meta.join(" · ")}</p> })}

            {(!recipe.tags.is_empty()).then(|| view! {
                <div class="recipe-tags">
                    {recipe.tags.iter().map(|tag| view! { <span class="tag-chip">{tag.clone()}</span> }).collect_view()}
                </div>
            })}

            {(!recipe.ingredients.is_empty()).then(|| view! {
                <section>
                    <h3>"Ingredients"</h3>
                    <ul class="ingredient-list">
                        {recipe.ingredients.iter().map(|line| view! { <li>{line.display_line()}</li> }).collect_view()}
                    </ul>
                </section>
            })}

            {(!recipe.steps.is_empty()).then(|| view! {
                <section>
                    <h3>"Instructions"</h3>
                    <ol class="step-list">
                        {recipe.steps.iter().map(|step| view! { <li>{step.clone()}</li> }).collect_view()}
                    </ol>
                </section>
            })}

            {(!recipe.raw_text.is_empty()).then(|| view! {
                <section>
                    <h3>"Original Recipe"</h3>
                    <pre class="recipe-raw">{recipe.raw_text.clone()}</pre>
                </section>
            })}
        </div>
    }
}
