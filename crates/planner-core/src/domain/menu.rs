//! Menu Week Entity
//!
//! A week is identified by its Monday and always carries all seven days on
//! the client, even when the backend omits empty ones.

use std::collections::HashMap;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use super::recipe::Recipe;
use crate::week;

/// One calendar day and the recipes assigned to it, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDay {
    pub date: NaiveDate,
    pub meals: Vec<Recipe>,
}

impl MenuDay {
    pub fn empty(date: NaiveDate) -> Self {
        Self { date, meals: Vec::new() }
    }

    pub fn recipe_ids(&self) -> Vec<String> {
        self.meals.iter().map(|meal| meal.id.clone()).collect()
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.meals.iter().any(|meal| meal.id == recipe_id)
    }

    /// Remove the most recent occurrence of `recipe_id`
    pub fn remove_last(&mut self, recipe_id: &str) -> Option<Recipe> {
        let pos = self.meals.iter().rposition(|meal| meal.id == recipe_id)?;
        Some(self.meals.remove(pos))
    }

    /// Remove every occurrence of `recipe_id`, returning each with the index
    /// it occupied before removal (ascending)
    pub fn take_all(&mut self, recipe_id: &str) -> Vec<(usize, Recipe)> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.meals.len());
        for (index, meal) in self.meals.drain(..).enumerate() {
            if meal.id == recipe_id {
                removed.push((index, meal));
            } else {
                kept.push(meal);
            }
        }
        self.meals = kept;
        removed
    }

    /// Inverse of [`MenuDay::take_all`]
    pub fn restore(&mut self, removed: Vec<(usize, Recipe)>) {
        for (index, meal) in removed {
            let index = index.min(self.meals.len());
            self.meals.insert(index, meal);
        }
    }
}

/// A planning week: Monday start and exactly seven consecutive days
#[derive(Debug, Clone, PartialEq)]
pub struct MenuWeek {
    pub id: Option<String>,
    pub week_start: NaiveDate,
    pub notes: Option<String>,
    pub days: Vec<MenuDay>,
}

impl MenuWeek {
    /// Seven empty days starting at `week_start`
    pub fn empty(week_start: NaiveDate) -> Self {
        Self {
            id: None,
            week_start,
            notes: None,
            days: week::week_days(week_start).into_iter().map(MenuDay::empty).collect(),
        }
    }

    pub fn from_dto(dto: MenuWeekDto) -> Self {
        let week_start = dto.week_start;
        Self::normalized(week_start, dto)
    }

    /// Materialize exactly the seven days of `week_start` from a backend
    /// payload. Missing dates become empty days, dates outside the week are
    /// dropped and a repeated date keeps its last entry.
    pub fn normalized(week_start: NaiveDate, dto: MenuWeekDto) -> Self {
        let span = week::week_days(week_start);
        let mut by_date: HashMap<NaiveDate, Vec<Recipe>> = HashMap::new();
        for day in dto.days {
            if span.contains(&day.date) {
                by_date.insert(day.date, day.meals);
            } else {
                warn!("Dropping day {} outside week {}", day.date, week_start);
            }
        }

        let days = span
            .into_iter()
            .map(|date| MenuDay { date, meals: by_date.remove(&date).unwrap_or_default() })
            .collect();

        Self { id: dto.id, week_start, notes: dto.notes, days }
    }

    pub fn to_dto(&self) -> MenuWeekDto {
        MenuWeekDto {
            id: self.id.clone(),
            week_start: self.week_start,
            notes: self.notes.clone(),
            days: self
                .days
                .iter()
                .map(|day| MenuDayDto { date: day.date, meals: day.meals.clone() })
                .collect(),
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&MenuDay> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut MenuDay> {
        self.days.iter_mut().find(|day| day.date == date)
    }

    /// Identity used by shopping-list generation
    pub fn week_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| format!("week_{}", self.week_start))
    }
}

// ========================
// Wire Shapes
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDayDto {
    pub date: NaiveDate,
    #[serde(default)]
    pub meals: Vec<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuWeekDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub week_start: NaiveDate,
    #[serde(default)]
    pub days: Vec<MenuDayDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MenuWeekDto {
    /// Payload for auto-creating a week the backend does not know yet
    pub fn empty(week_start: NaiveDate) -> Self {
        Self { id: None, week_start, days: Vec::new(), notes: Some(String::new()) }
    }
}

/// Body of `POST /menus/weeks`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateMenuRequest<'a> {
    pub menu: &'a MenuWeekDto,
}

/// Body of `PUT /menus/weeks/{week_start}/days`: authoritative replacement
/// of one day's assignments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateMenuDayRequest {
    pub date: NaiveDate,
    pub recipe_ids: Vec<String>,
}

impl UpdateMenuDayRequest {
    pub fn from_day(day: &MenuDay) -> Self {
        Self { date: day.date, recipe_ids: day.recipe_ids() }
    }
}
