//! Backend Contract
//!
//! The REST endpoints the planner consumes, as an async trait so the
//! coordinator can run against the real client or an in-memory fake.
//! Futures are `?Send`: everything runs on the browser event loop.

mod rest;
#[cfg(test)]
pub(crate) mod memory;

pub use rest::RestClient;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::domain::{
    IngestRecipeRequest, MenuWeekDto, Recipe, ShoppingList, UpdateMenuDayRequest,
};
use crate::error::ApiResult;

pub const API_PREFIX: &str = "/api/v1/meal-planner";

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Endpoint paths relative to [`API_PREFIX`]
pub mod paths {
    use super::*;

    pub fn weeks() -> String {
        "/menus/weeks".to_string()
    }

    pub fn week(week_start: NaiveDate) -> String {
        format!("/menus/weeks/{week_start}")
    }

    pub fn week_days(week_start: NaiveDate) -> String {
        format!("/menus/weeks/{week_start}/days")
    }

    pub fn day_recipe(week_start: NaiveDate, date: NaiveDate, recipe_id: &str) -> String {
        format!("/menus/weeks/{week_start}/days/{date}/recipes/{}", segment(recipe_id))
    }

    pub fn recipes() -> String {
        "/recipes".to_string()
    }

    pub fn recipe(recipe_id: &str) -> String {
        format!("/recipes/{}", segment(recipe_id))
    }

    pub fn ingest() -> String {
        "/recipes/ingest".to_string()
    }

    pub fn generate_shopping_list() -> String {
        "/shopping-lists/generate".to_string()
    }

    pub fn shopping_list(list_id: &str) -> String {
        format!("/shopping-lists/{}", segment(list_id))
    }

    fn segment(raw: &str) -> String {
        utf8_percent_encode(raw, SEGMENT).to_string()
    }
}

/// Filter for `GET /recipes`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeQuery {
    pub text: Option<String>,
    pub tags: Vec<String>,
}

impl RecipeQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), tags: Vec::new() }
    }

    /// Query-string pairs; empty filters are omitted, tags comma-joined
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            params.push(("q", text.to_string()));
        }
        if !self.tags.is_empty() {
            params.push(("tags", self.tags.join(",")));
        }
        params
    }
}

/// Meal-planner backend operations
#[async_trait(?Send)]
pub trait MenuApi {
    /// Every stored week, oldest first. Part of the backend surface; the
    /// planner itself loads one week at a time.
    async fn list_weeks(&self) -> ApiResult<Vec<MenuWeekDto>>;

    async fn get_week(&self, week_start: NaiveDate) -> ApiResult<MenuWeekDto>;

    /// Create or replace a week
    async fn create_week(&self, menu: &MenuWeekDto) -> ApiResult<MenuWeekDto>;

    /// Replace one day's assignments
    async fn update_day(
        &self,
        week_start: NaiveDate,
        request: &UpdateMenuDayRequest,
    ) -> ApiResult<MenuWeekDto>;

    async fn remove_recipe_from_day(
        &self,
        week_start: NaiveDate,
        date: NaiveDate,
        recipe_id: &str,
    ) -> ApiResult<()>;

    async fn list_recipes(&self, query: &RecipeQuery) -> ApiResult<Vec<Recipe>>;

    async fn get_recipe(&self, recipe_id: &str) -> ApiResult<Recipe>;

    async fn ingest_recipe(&self, request: &IngestRecipeRequest) -> ApiResult<Recipe>;

    /// Returns the generated list's identity; contents may be partial
    async fn generate_shopping_list(&self, week_id: &str) -> ApiResult<ShoppingList>;

    async fn get_shopping_list(&self, list_id: &str) -> ApiResult<ShoppingList>;

    /// Fetch a week, creating an empty one when the backend has none
    async fn get_or_create_week(&self, week_start: NaiveDate) -> ApiResult<MenuWeekDto> {
        match self.get_week(week_start).await {
            Err(err) if err.is_not_found() => {
                debug!("Week {week_start} not found, creating it");
                self.create_week(&MenuWeekDto::empty(week_start)).await
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn week_paths() {
        let monday = date("2025-01-06");
        assert_eq!(paths::weeks(), "/menus/weeks");
        assert_eq!(paths::week(monday), "/menus/weeks/2025-01-06");
        assert_eq!(paths::week_days(monday), "/menus/weeks/2025-01-06/days");
        assert_eq!(
            paths::day_recipe(monday, date("2025-01-07"), "r1"),
            "/menus/weeks/2025-01-06/days/2025-01-07/recipes/r1"
        );
    }

    #[test]
    fn ids_are_escaped_as_single_segments() {
        assert_eq!(paths::recipe("a/b c"), "/recipes/a%2Fb%20c");
        assert_eq!(paths::shopping_list("list?x"), "/shopping-lists/list%3Fx");
    }

    #[test]
    fn recipe_query_omits_empty_filters() {
        assert!(RecipeQuery::default().params().is_empty());
        assert!(RecipeQuery::text("  ").params().is_empty());

        let query = RecipeQuery {
            text: Some("soup".into()),
            tags: vec!["quick".into(), "vegan".into()],
        };
        assert_eq!(
            query.params(),
            vec![("q", "soup".to_string()), ("tags", "quick,vegan".to_string())]
        );
    }
}
