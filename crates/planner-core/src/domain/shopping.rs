//! Shopping List
//!
//! Generated by the backend per week; never cached client-side.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    #[serde(default)]
    pub qty: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub aisle: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ShoppingItem {
    /// "2 kg rice (Grains) - jasmine"; a zero quantity is omitted
    pub fn display_line(&self) -> String {
        let mut line = String::new();
        if let Some(qty) = self.qty.filter(|q| *q != 0.0) {
            line.push_str(&format!("{qty} "));
        }
        if let Some(unit) = non_empty(&self.unit) {
            line.push_str(&format!("{unit} "));
        }
        line.push_str(&self.name);
        if let Some(aisle) = non_empty(&self.aisle) {
            line.push_str(&format!(" ({aisle})"));
        }
        if let Some(notes) = non_empty(&self.notes) {
            line.push_str(&format!(" - {notes}"));
        }
        line
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: String,
    #[serde(default)]
    pub week_id: String,
    #[serde(default)]
    pub items: Vec<ShoppingItem>,
    #[serde(default)]
    pub status: String,
}

impl ShoppingList {
    /// Plain-text export with check marks for the items ticked off in the UI
    pub fn to_clipboard_text(&self, checked: &BTreeSet<usize>) -> String {
        let lines: Vec<String> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let mark = if checked.contains(&index) { "✅" } else { "⬜" };
                format!("{mark} {}", item.display_line())
            })
            .collect();
        format!("Shopping List\n\n{}", lines.join("\n"))
    }
}

/// Body of `POST /shopping-lists/generate`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateShoppingListRequest<'a> {
    pub week_id: &'a str,
}
