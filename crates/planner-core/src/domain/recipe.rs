//! Recipe Entity
//!
//! Structured recipes produced by backend ingestion. Read-only on the client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One ingredient line of a parsed recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl IngredientLine {
    /// "2 cup flour (sifted)"
    pub fn display_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(qty) = self.qty {
            parts.push(qty.to_string());
        }
        if let Some(unit) = self.unit.as_deref().filter(|u| !u.is_empty()) {
            parts.push(unit.to_string());
        }
        parts.push(self.name.clone());
        let mut line = parts.join(" ");
        if let Some(notes) = self.notes.as_deref().filter(|n| !n.is_empty()) {
            line.push_str(&format!(" ({notes})"));
        }
        line
    }
}

/// Recipe data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Recipe {
    /// Minimal recipe with only identity and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            raw_text: String::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            tags: Vec::new(),
            cuisine: None,
            diet: None,
            time_minutes: None,
            servings: None,
            extra: BTreeMap::new(),
        }
    }

    /// Library search: case-insensitive substring of the title or any tag.
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    }

    /// Compact metadata for cards, e.g. "30 min · 4 servings · Thai"
    pub fn summary_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(minutes) = self.time_minutes {
            parts.push(format!("{minutes} min"));
        }
        if let Some(servings) = self.servings {
            parts.push(format!("{servings} servings"));
        }
        if let Some(cuisine) = &self.cuisine {
            parts.push(cuisine.clone());
        }
        if let Some(diet) = &self.diet {
            parts.push(diet.clone());
        }
        parts.join(" · ")
    }
}

/// Body of `POST /recipes/ingest`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestRecipeRequest {
    pub raw_text: String,
    pub tags: Vec<String>,
}

/// Split a comma-separated tag input into trimmed, non-empty tags
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
