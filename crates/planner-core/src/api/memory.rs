//! In-memory backend for coordinator tests.
//!
//! Stores weeks and recipes in `RefCell`s, records every call, and can be
//! told to fail the next N calls of a given kind. A call can also be gated so
//! a test observes the optimistic state while a request is in flight.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use super::{MenuApi, RecipeQuery};
use crate::domain::{
    IngestRecipeRequest, MenuDayDto, MenuWeekDto, Recipe, ShoppingList, UpdateMenuDayRequest,
};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    GetWeek,
    CreateWeek,
    UpdateDay,
    RemoveRecipe,
    ListRecipes,
    Ingest,
    Generate,
}

#[derive(Default)]
pub struct MemoryApi {
    pub weeks: RefCell<BTreeMap<NaiveDate, MenuWeekDto>>,
    pub recipes: RefCell<Vec<Recipe>>,
    pub log: RefCell<Vec<(Call, String)>>,
    failures: RefCell<HashMap<Call, u32>>,
    gates: RefCell<HashMap<Call, Rc<Notify>>>,
    next_id: Cell<u32>,
}

impl MemoryApi {
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        let api = Self::default();
        *api.recipes.borrow_mut() = recipes;
        api
    }

    pub fn put_week(&self, week: MenuWeekDto) {
        self.weeks.borrow_mut().insert(week.week_start, week);
    }

    /// Make the next `times` calls of `call` fail with a 500
    pub fn fail(&self, call: Call, times: u32) {
        self.failures.borrow_mut().insert(call, times);
    }

    /// Hold the next call of `call` until the returned handle is notified
    pub fn gate(&self, call: Call) -> Rc<Notify> {
        let notify = Rc::new(Notify::new());
        self.gates.borrow_mut().insert(call, Rc::clone(&notify));
        notify
    }

    pub fn calls(&self, call: Call) -> Vec<String> {
        self.log.borrow().iter().filter(|(c, _)| *c == call).map(|(_, d)| d.clone()).collect()
    }

    async fn enter(&self, call: Call, detail: String) -> ApiResult<()> {
        let gate = self.gates.borrow_mut().remove(&call);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.log.borrow_mut().push((call, detail));
        let mut failures = self.failures.borrow_mut();
        match failures.get_mut(&call) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(ApiError::Status { status: 500, status_text: "Internal Server Error".into() })
            }
            _ => Ok(()),
        }
    }

    fn recipe(&self, id: &str) -> Option<Recipe> {
        self.recipes.borrow().iter().find(|r| r.id == id).cloned()
    }

    fn not_found() -> ApiError {
        ApiError::Status { status: 404, status_text: "Not Found".into() }
    }
}

#[async_trait(?Send)]
impl MenuApi for MemoryApi {
    async fn list_weeks(&self) -> ApiResult<Vec<MenuWeekDto>> {
        Ok(self.weeks.borrow().values().cloned().collect())
    }

    async fn get_week(&self, week_start: NaiveDate) -> ApiResult<MenuWeekDto> {
        self.enter(Call::GetWeek, week_start.to_string()).await?;
        self.weeks.borrow().get(&week_start).cloned().ok_or_else(Self::not_found)
    }

    async fn create_week(&self, menu: &MenuWeekDto) -> ApiResult<MenuWeekDto> {
        self.enter(Call::CreateWeek, menu.week_start.to_string()).await?;
        let mut created = menu.clone();
        created.id.get_or_insert_with(|| format!("week_{}", menu.week_start));
        self.put_week(created.clone());
        Ok(created)
    }

    async fn update_day(
        &self,
        week_start: NaiveDate,
        request: &UpdateMenuDayRequest,
    ) -> ApiResult<MenuWeekDto> {
        let detail = format!("{} {}", request.date, request.recipe_ids.join(","));
        self.enter(Call::UpdateDay, detail).await?;
        let meals: Vec<Recipe> = request.recipe_ids.iter().filter_map(|id| self.recipe(id)).collect();
        let mut weeks = self.weeks.borrow_mut();
        let week = weeks.get_mut(&week_start).ok_or_else(Self::not_found)?;
        match week.days.iter_mut().find(|d| d.date == request.date) {
            Some(day) => day.meals = meals,
            None => week.days.push(MenuDayDto { date: request.date, meals }),
        }
        Ok(week.clone())
    }

    async fn remove_recipe_from_day(
        &self,
        week_start: NaiveDate,
        date: NaiveDate,
        recipe_id: &str,
    ) -> ApiResult<()> {
        self.enter(Call::RemoveRecipe, format!("{date} {recipe_id}")).await?;
        let mut weeks = self.weeks.borrow_mut();
        let week = weeks.get_mut(&week_start).ok_or_else(Self::not_found)?;
        if let Some(day) = week.days.iter_mut().find(|d| d.date == date) {
            day.meals.retain(|meal| meal.id != recipe_id);
        }
        Ok(())
    }

    async fn list_recipes(&self, query: &RecipeQuery) -> ApiResult<Vec<Recipe>> {
        self.enter(Call::ListRecipes, format!("{:?}", query.params())).await?;
        let text = query.text.clone().unwrap_or_default();
        Ok(self.recipes.borrow().iter().filter(|r| r.matches_query(&text)).cloned().collect())
    }

    async fn get_recipe(&self, recipe_id: &str) -> ApiResult<Recipe> {
        self.recipe(recipe_id).ok_or_else(Self::not_found)
    }

    async fn ingest_recipe(&self, request: &IngestRecipeRequest) -> ApiResult<Recipe> {
        self.enter(Call::Ingest, request.raw_text.clone()).await?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let title = request.raw_text.lines().next().unwrap_or_default().to_string();
        let mut recipe = Recipe::new(format!("ingested-{id}"), title);
        recipe.raw_text = request.raw_text.clone();
        recipe.tags = request.tags.clone();
        self.recipes.borrow_mut().push(recipe.clone());
        Ok(recipe)
    }

    async fn generate_shopping_list(&self, week_id: &str) -> ApiResult<ShoppingList> {
        self.enter(Call::Generate, week_id.to_string()).await?;
        Ok(ShoppingList {
            id: format!("list-{week_id}"),
            week_id: week_id.to_string(),
            items: Vec::new(),
            status: "pending".into(),
        })
    }

    async fn get_shopping_list(&self, list_id: &str) -> ApiResult<ShoppingList> {
        let week_id = list_id.trim_start_matches("list-").to_string();
        let start = week_id.trim_start_matches("week_").parse::<NaiveDate>().ok();
        let weeks = self.weeks.borrow();
        let items = start
            .and_then(|start| weeks.get(&start))
            .map(|week| {
                week.days
                    .iter()
                    .flat_map(|day| day.meals.iter())
                    .map(|meal| crate::domain::ShoppingItem {
                        name: meal.title.clone(),
                        qty: None,
                        unit: None,
                        aisle: None,
                        notes: None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(ShoppingList { id: list_id.to_string(), week_id, items, status: "ready".into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn list_weeks_returns_stored_weeks_oldest_first() {
        let api = MemoryApi::default();
        api.put_week(MenuWeekDto::empty(date("2025-01-13")));
        api.create_week(&MenuWeekDto::empty(date("2025-01-06"))).await.unwrap();

        let starts: Vec<NaiveDate> = api.list_weeks().await.unwrap().iter().map(|w| w.week_start).collect();

        assert_eq!(starts, [date("2025-01-06"), date("2025-01-13")]);
    }
}
