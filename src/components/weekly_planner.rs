//! Weekly Planner Component
//!
//! Week header with navigation, seven day columns as drop targets and meal
//! cards as drag sources. Every gesture is forwarded to the coordinator.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos_dragdrop::*;
use planner_core::{week, DragPayload, DropTarget, MenuDay, Recipe};

use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

/// Planner grid for the loaded week
#[component]
pub fn WeeklyPlanner() -> impl IntoView {
    let ctx = use_app_context();
    let planner = ctx.planner;

    let days = move || {
        planner.with(|s| s.current_week.as_ref().map(|w| w.days.clone()).unwrap_or_default())
    };

    view! {
        <section class="weekly-planner">
            <WeekHeader />
            <ErrorBanner />
            <div class="week-grid">
                <For
                    each=days
                    // meals in the key so a changed day re-renders
                    key=|day| (day.date, day.recipe_ids())
                    children=move |day| view! { <DayColumn day=day /> }
                />
            </div>
            {move || planner.with(|s| s.current_week.is_none() && !s.is_loading).then(|| view! {
                <div class="week-empty">"No week loaded"</div>
            })}
        </section>
    }
}

/// Title, previous / today / next buttons and a jump-to-date input
#[component]
fn WeekHeader() -> impl IntoView {
    let ctx = use_app_context();
    let planner = ctx.planner;
    let (jump_date, set_jump_date) = signal(String::new());
    let (jump_error, set_jump_error) = signal(None::<String>);

    let title = move || match planner.with(|s| s.current_week_start) {
        Some(start) => {
            let end = week::week_days(start)[week::DAYS_PER_WEEK - 1];
            format!("{} – {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
        }
        None => "Meal Plan".to_string(),
    };

    let on_jump = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match week::parse_iso_date(jump_date.get().trim()) {
            Ok(date) => {
                set_jump_error.set(None);
                ctx.spawn(move |c| async move {
                    let _ = c.go_to_week(date).await;
                });
            }
            Err(err) => set_jump_error.set(Some(err.to_string())),
        }
    };

    view! {
        <div class="week-header">
            <div class="week-title">
                <h2>{title}</h2>
                <Show when=move || planner.with(|s| s.is_loading)>
                    <span class="week-loading">"Loading…"</span>
                </Show>
            </div>
            <div class="week-nav">
                <button on:click=move |_| ctx.spawn(|c| async move {
                    let _ = c.go_to_previous_week().await;
                })>"‹"</button>
                <button on:click=move |_| ctx.spawn(|c| async move {
                    let _ = c.go_to_current_week().await;
                })>"Today"</button>
                <button on:click=move |_| ctx.spawn(|c| async move {
                    let _ = c.go_to_next_week().await;
                })>"›"</button>
                <form class="week-jump" on:submit=on_jump>
                    <input
                        type="text"
                        placeholder="YYYY-MM-DD"
                        prop:value=move || jump_date.get()
                        on:input=move |ev| set_jump_date.set(event_target_value(&ev))
                    />
                    <button type="submit">"Go"</button>
                </form>
            </div>
            {move || jump_error.get().map(|msg| view! { <div class="week-jump-error">{msg}</div> })}
        </div>
    }
}

/// Last coordinator error, dismissible
#[component]
fn ErrorBanner() -> impl IntoView {
    let planner = use_app_context().planner;

    view! {
        {move || planner.with(|s| s.error.clone()).map(|msg| view! {
            <div class="error-banner" role="alert">
                <span>{msg}</span>
                <button on:click=move |_| planner.update(|s| s.clear_error())>"×"</button>
            </div>
        })}
    }
}

/// One day as a drop target
#[component]
fn DayColumn(day: MenuDay) -> impl IntoView {
    let ctx = use_app_context();
    let dnd = ctx.dnd;
    let date = day.date;
    let target = DropTarget::Day(date);
    let is_empty = day.meals.is_empty();

    let on_mouseenter = make_on_target_mouseenter(dnd, target);
    let on_mouseleave = make_on_mouseleave(dnd);

    let column_class = move || {
        let mut c = String::from("day-column");
        if date == ctx.today { c.push_str(" today"); }
        if dnd.dragging_read.with(Option::is_some) { c.push_str(" accepting"); }
        if dnd.drop_target_read.get() == Some(target) { c.push_str(" drop-target"); }
        c
    };

    let clear = move |_: web_sys::MouseEvent| {
        ctx.spawn(move |c| async move {
            c.clear_day_meals(date).await;
        });
    };

    view! {
        <div class=column_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
            <div class="day-header">
                <span class="day-name">{date.format("%A").to_string()}</span>
                <span class="day-date">{date.format("%b %-d").to_string()}</span>
                <button class="day-clear-btn" disabled=is_empty on:click=clear>"Clear"</button>
            </div>
            <div class="day-meals">
                {day.meals.into_iter().enumerate().map(|(index, recipe)| view! {
                    <MealCard recipe=recipe date=date index=index />
                }).collect_view()}
                {is_empty.then(|| view! { <div class="day-placeholder">"Drop a recipe here"</div> })}
            </div>
        </div>
    }
}

/// A placed meal: drag source, opens details on click, removable
#[component]
fn MealCard(recipe: Recipe, date: NaiveDate, index: usize) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let dnd = ctx.dnd;
    let recipe_id = recipe.id.clone();
    let title = recipe.title.clone();
    let summary = recipe.summary_line();

    let on_mousedown = make_on_mousedown(
        dnd,
        DragPayload::Meal { recipe, source_date: date, index },
    );

    let is_dragging = move || {
        dnd.dragging_read.with(|payload| {
            matches!(payload, Some(DragPayload::Meal { source_date, index: i, .. }) if *source_date == date && *i == index)
        })
    };

    let open_id = recipe_id.clone();
    let open_details = move |_: web_sys::MouseEvent| {
        if dnd.drag_just_ended_read.get_untracked() { return; }
        store.selected_recipe_id().set(Some(open_id.clone()));
    };

    let remove = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let recipe_id = recipe_id.clone();
        ctx.spawn(move |c| async move {
            c.remove_recipe_from_day(date, &recipe_id).await;
        });
    };

    view! {
        <div
            class=move || if is_dragging() { "meal-card dragging" } else { "meal-card" }
            on:mousedown=on_mousedown
            on:click=open_details
        >
            <div class="meal-title">{title}</div>
            {(!summary.is_empty()).then(|| view! { <div class="meal-summary">{summary}</div> })}
            <button class="meal-remove-btn" title="Remove" on:click=remove>"×"</button>
        </div>
    }
}
