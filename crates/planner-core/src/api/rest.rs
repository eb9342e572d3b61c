//! REST Client
//!
//! `MenuApi` over reqwest: bearer auth on every request, JSON both ways.
//! No retries and no timeouts.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{paths, MenuApi, RecipeQuery, API_PREFIX};
use crate::config::ClientConfig;
use crate::domain::{
    CreateMenuRequest, GenerateShoppingListRequest, IngestRecipeRequest, MenuWeekDto, Recipe,
    ShoppingList, UpdateMenuDayRequest,
};
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct RestClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path)).bearer_auth(&self.api_key)
    }

    async fn send(builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = Self::send(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = Self::send(self.request(method, path).json(body)).await?;
        Self::decode(response).await
    }
}

#[async_trait(?Send)]
impl MenuApi for RestClient {
    async fn list_weeks(&self) -> ApiResult<Vec<MenuWeekDto>> {
        self.get_json(&paths::weeks()).await
    }

    async fn get_week(&self, week_start: NaiveDate) -> ApiResult<MenuWeekDto> {
        self.get_json(&paths::week(week_start)).await
    }

    async fn create_week(&self, menu: &MenuWeekDto) -> ApiResult<MenuWeekDto> {
        self.send_json(Method::POST, &paths::weeks(), &CreateMenuRequest { menu }).await
    }

    async fn update_day(
        &self,
        week_start: NaiveDate,
        request: &UpdateMenuDayRequest,
    ) -> ApiResult<MenuWeekDto> {
        self.send_json(Method::PUT, &paths::week_days(week_start), request).await
    }

    async fn remove_recipe_from_day(
        &self,
        week_start: NaiveDate,
        date: NaiveDate,
        recipe_id: &str,
    ) -> ApiResult<()> {
        // response body is not part of the contract
        let path = paths::day_recipe(week_start, date, recipe_id);
        Self::send(self.request(Method::DELETE, &path)).await.map(|_| ())
    }

    async fn list_recipes(&self, query: &RecipeQuery) -> ApiResult<Vec<Recipe>> {
        let builder = self.request(Method::GET, &paths::recipes()).query(&query.params());
        let response = Self::send(builder).await?;
        Self::decode(response).await
    }

    async fn get_recipe(&self, recipe_id: &str) -> ApiResult<Recipe> {
        self.get_json(&paths::recipe(recipe_id)).await
    }

    async fn ingest_recipe(&self, request: &IngestRecipeRequest) -> ApiResult<Recipe> {
        self.send_json(Method::POST, &paths::ingest(), request).await
    }

    async fn generate_shopping_list(&self, week_id: &str) -> ApiResult<ShoppingList> {
        let body = GenerateShoppingListRequest { week_id };
        self.send_json(Method::POST, &paths::generate_shopping_list(), &body).await
    }

    async fn get_shopping_list(&self, list_id: &str) -> ApiResult<ShoppingList> {
        self.get_json(&paths::shopping_list(list_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_prefix_and_path() {
        let config = ClientConfig {
            base_url: "https://planner.example.com/".into(),
            ..ClientConfig::default()
        };
        let client = RestClient::new(&config);
        assert_eq!(
            client.url(&paths::ingest()),
            "https://planner.example.com/api/v1/meal-planner/recipes/ingest"
        );
    }

    #[test]
    fn request_carries_bearer_token() {
        let client = RestClient::new(&ClientConfig::default());
        let request = client.request(Method::GET, &paths::weeks()).build().unwrap();
        let auth = request.headers().get(reqwest::header::AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer api-key");
        assert_eq!(request.url().as_str(), "http://localhost:8080/api/v1/meal-planner/menus/weeks");
    }

    #[test]
    fn recipe_search_encodes_query_string() {
        let client = RestClient::new(&ClientConfig::default());
        let query = RecipeQuery { text: Some("mac & cheese".into()), tags: vec!["kids".into()] };
        let request = client
            .request(Method::GET, &paths::recipes())
            .query(&query.params())
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("q=mac+%26+cheese&tags=kids"));
    }
}
