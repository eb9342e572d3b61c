//! Menu Coordinator
//!
//! The operations user gestures are routed to. Day edits are optimistic: the
//! view state changes first, the backend is told second, and a rejection
//! reverses the local change and surfaces the error message. Reads and loads
//! fill the view state and its loading/error flags.


use std::rc::Rc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use log::{debug, error, info};

use crate::api::{MenuApi, RecipeQuery};
use crate::dnd::{resolve_drop, DragPayload, DropAction, DropTarget};
use crate::domain::{IngestRecipeRequest, MenuDay, MenuWeek, Recipe, ShoppingList, UpdateMenuDayRequest};
use crate::error::{ApiResult, PlannerError, PlannerResult};
use crate::state::{PlannerState, StateHandle};
use crate::txn::{DayQueue, DayTransaction, Outcome};
use crate::week;

pub struct MenuCoordinator<A, S> {
    api: Rc<A>,
    state: S,
    queue: Rc<DayQueue>,
    timezone: Tz,
}

impl<A, S: Clone> Clone for MenuCoordinator<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            state: self.state.clone(),
            queue: Rc::clone(&self.queue),
            timezone: self.timezone,
        }
    }
}

impl<A, S> MenuCoordinator<A, S>
where
    A: MenuApi + 'static,
    S: StateHandle,
{
    pub fn new(api: Rc<A>, state: S, timezone: Tz) -> Self {
        Self { api, state, queue: Rc::new(DayQueue::default()), timezone }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    // ========================
    // Loading
    // ========================

    /// Replace the recipe lookup table with the backend's full list
    pub async fn load_recipes(&self) -> ApiResult<()> {
        self.state.update(|s| s.is_loading = true);
        let result = self.api.list_recipes(&RecipeQuery::default()).await;
        self.state
            .update(|s| {
                s.is_loading = false;
                match result {
                    Ok(recipes) => {
                        info!("Loaded {} recipes", recipes.len());
                        s.recipes.replace_all(recipes);
                        s.clear_error();
                        Ok(())
                    }
                    Err(err) => {
                        s.set_error(err.to_string());
                        Err(err)
                    }
                }
            })
            .unwrap_or(Ok(()))
    }

    /// Show the week containing `date`, creating it on the backend if needed.
    /// A response is only applied while its week is still the one being
    /// viewed; on failure the previously loaded week stays.
    pub async fn load_week(&self, date: NaiveDate) -> ApiResult<()> {
        let week_start = week::week_start(date);
        self.state.update(|s| {
            s.current_week_start = Some(week_start);
            s.is_loading = true;
        });

        let result = self
            .api
            .get_or_create_week(week_start)
            .await
            .map(|dto| MenuWeek::normalized(week_start, dto));

        self.state
            .update(|s| {
                if s.current_week_start != Some(week_start) {
                    debug!("Discarding stale response for week {week_start}");
                    return result.map(|_| ());
                }
                s.is_loading = false;
                match result {
                    Ok(week) => {
                        s.replace_week(week);
                        s.clear_error();
                        Ok(())
                    }
                    Err(err) => {
                        s.set_error(err.to_string());
                        Err(err)
                    }
                }
            })
            .unwrap_or(Ok(()))
    }

    // ========================
    // Day edits
    // ========================

    /// Append `recipe` to the meals of `date`. Duplicates are allowed; a
    /// rollback removes the last occurrence only.
    pub async fn assign_recipe_to_day(&self, date: NaiveDate, recipe: Recipe) -> Outcome<()> {
        let outcome = DayTransaction::new(
            date,
            move |day: &mut MenuDay| {
                let recipe_id = recipe.id.clone();
                day.meals.push(recipe);
                Some(recipe_id)
            },
            |day: &mut MenuDay, recipe_id: String| {
                day.remove_last(&recipe_id);
            },
        )
        .run(&self.state, &self.queue, |week_start, day| self.put_day(week_start, day))
        .await;
        self.settle(&outcome);
        outcome
    }

    /// Remove every occurrence of `recipe_id` from `date`, then refresh the
    /// week from the backend. A no-op when the day does not hold the recipe.
    pub async fn remove_recipe_from_day(&self, date: NaiveDate, recipe_id: &str) -> Outcome<()> {
        let mut confirmed_week = None;
        let outcome = DayTransaction::new(
            date,
            |day: &mut MenuDay| {
                let removed = day.take_all(recipe_id);
                (!removed.is_empty()).then_some(removed)
            },
            |day: &mut MenuDay, removed| day.restore(removed),
        )
        .run(&self.state, &self.queue, |week_start, _| {
            confirmed_week = Some(week_start);
            self.api.remove_recipe_from_day(week_start, date, recipe_id)
        })
        .await;
        self.settle(&outcome);

        if let (Outcome::Confirmed(()), Some(week_start)) = (&outcome, confirmed_week) {
            self.refresh_week(week_start).await;
        }
        outcome
    }

    /// Empty the meals of `date`; a rollback appends the previous meals back
    /// in their original order.
    pub async fn clear_day_meals(&self, date: NaiveDate) -> Outcome<()> {
        let outcome = DayTransaction::new(
            date,
            |day: &mut MenuDay| Some(std::mem::take(&mut day.meals)),
            |day: &mut MenuDay, previous: Vec<Recipe>| day.meals.extend(previous),
        )
        .run(&self.state, &self.queue, |week_start, day| self.put_day(week_start, day))
        .await;
        self.settle(&outcome);
        outcome
    }

    /// Route a finished drag to the edit it stands for
    pub async fn handle_drop(&self, payload: DragPayload, target: DropTarget) -> Outcome<()> {
        let action = self.state.read(|s| resolve_drop(&payload, &target, &s.recipes)).flatten();
        match action {
            Some(DropAction::Assign { date, recipe }) => {
                debug!("Dropped '{}' on {date}", recipe.title);
                self.assign_recipe_to_day(date, recipe).await
            }
            None => Outcome::Skipped,
        }
    }

    // ========================
    // Navigation
    // ========================

    pub async fn go_to_week(&self, date: NaiveDate) -> ApiResult<()> {
        self.load_week(date).await
    }

    /// Week containing today in the configured timezone
    pub async fn go_to_current_week(&self) -> ApiResult<()> {
        self.load_week(week::today_in(self.timezone)).await
    }

    pub async fn go_to_previous_week(&self) -> ApiResult<()> {
        self.shift_week(-1).await
    }

    pub async fn go_to_next_week(&self) -> ApiResult<()> {
        self.shift_week(1).await
    }

    async fn shift_week(&self, weeks: i64) -> ApiResult<()> {
        match self.state.read(|s| s.current_week_start).flatten() {
            Some(week_start) => self.load_week(week::shift_weeks(week_start, weeks)).await,
            None => Ok(()),
        }
    }

    // ========================
    // Recipes
    // ========================

    /// Send raw recipe text for parsing, then reload the lookup table. A
    /// failed reload is left in the error flag; the recipe still counts as
    /// ingested.
    pub async fn ingest_recipe(&self, raw_text: &str, tags: Vec<String>) -> PlannerResult<Recipe> {
        let raw_text = raw_text.trim();
        if raw_text.is_empty() {
            return Err(PlannerError::EmptyRecipeText);
        }

        let request = IngestRecipeRequest { raw_text: raw_text.to_string(), tags };
        let recipe = self
            .api
            .ingest_recipe(&request)
            .await
            .inspect_err(|err| error!("Recipe ingestion failed: {err}"))?;
        info!("Ingested recipe {} '{}'", recipe.id, recipe.title);

        if self.load_recipes().await.is_err() {
            debug!("Recipe table not refreshed after ingesting {}", recipe.id);
        }
        Ok(recipe)
    }

    pub async fn search_recipes(&self, query: &RecipeQuery) -> ApiResult<Vec<Recipe>> {
        self.api.list_recipes(query).await
    }

    pub async fn get_recipe(&self, recipe_id: &str) -> ApiResult<Recipe> {
        self.api.get_recipe(recipe_id).await
    }

    // ========================
    // Shopping list
    // ========================

    /// Id of the loaded week, as shopping-list generation expects it
    pub fn current_week_id(&self) -> Option<String> {
        self.state.read(|s| s.current_week.as_ref().map(MenuWeek::week_id)).flatten()
    }

    /// Generate a list for `week_id` and fetch its full contents
    pub async fn generate_shopping_list(&self, week_id: &str) -> PlannerResult<ShoppingList> {
        let week_id = week_id.trim();
        if week_id.is_empty() {
            return Err(PlannerError::EmptyWeekId);
        }
        let generated = self.api.generate_shopping_list(week_id).await?;
        debug!("Generated shopping list {} for {week_id}", generated.id);
        Ok(self.api.get_shopping_list(&generated.id).await?)
    }

    /// Shopping list for the loaded week
    pub async fn generate_current_shopping_list(&self) -> PlannerResult<ShoppingList> {
        let week_id = self.current_week_id().ok_or(PlannerError::NoWeekLoaded)?;
        self.generate_shopping_list(&week_id).await
    }

    // ========================
    // Helpers
    // ========================

    async fn put_day(&self, week_start: NaiveDate, day: MenuDay) -> ApiResult<()> {
        let request = UpdateMenuDayRequest::from_day(&day);
        self.api.update_day(week_start, &request).await.map(|_| ())
    }

    fn settle<T>(&self, outcome: &Outcome<T>) {
        match outcome {
            Outcome::Confirmed(_) => {
                self.state.update(PlannerState::clear_error);
            }
            Outcome::RolledBack(err) => {
                self.state.update(|s| s.set_error(err.to_string()));
            }
            Outcome::Skipped => {}
        }
    }

    /// Re-fetch a week after the backend accepted an edit. Failure keeps the
    /// optimistic state and only reports the error.
    async fn refresh_week(&self, week_start: NaiveDate) {
        let result = self.api.get_or_create_week(week_start).await;
        self.state.update(|s| match result {
            Ok(dto) if s.shows_week(week_start) => {
                s.replace_week(MenuWeek::normalized(week_start, dto));
            }
            Ok(_) => debug!("Week {week_start} no longer shown, refresh dropped"),
            Err(err) => s.set_error(err.to_string()),
        });
    }
}
