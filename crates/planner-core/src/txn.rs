//! Optimistic Day Transactions
//!
//! A day edit is applied to the view state before the backend confirms it and
//! reversed if the backend rejects it. Every edit is a [`DayTransaction`]: a
//! forward mutation that records what it needs to undo itself, and the
//! inverse that consumes that record.
//!
//! Transactions on the same date are serialized through a [`DayQueue`] lane
//! in submission order; different dates run independently. An inverse is only
//! applied while the exact copy of the week it was recorded against is still
//! loaded; a reload of the same week counts as a different copy.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::MenuDay;
use crate::error::{ApiError, ApiResult};
use crate::state::StateHandle;

/// Result of running a transaction
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// No week loaded, date outside the week, or the forward mutation
    /// declined; nothing was sent
    Skipped,
    Confirmed(T),
    /// Backend rejected the change; the local edit has been reversed
    RolledBack(ApiError),
}

impl<T> Outcome<T> {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Outcome::Confirmed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Skipped => Outcome::Skipped,
            Outcome::Confirmed(value) => Outcome::Confirmed(f(value)),
            Outcome::RolledBack(err) => Outcome::RolledBack(err),
        }
    }
}

/// Per-date FIFO lanes
#[derive(Default)]
pub struct DayQueue {
    lanes: RefCell<HashMap<NaiveDate, Arc<Mutex<()>>>>,
}

impl DayQueue {
    /// Wait for every earlier transaction on `date` to finish
    pub async fn enter(&self, date: NaiveDate) -> OwnedMutexGuard<()> {
        let lane = Arc::clone(self.lanes.borrow_mut().entry(date).or_default());
        lane.lock_owned().await
    }
}

pub struct DayTransaction<F, I> {
    date: NaiveDate,
    forward: F,
    inverse: I,
}

impl<F, I, U> DayTransaction<F, I>
where
    F: FnOnce(&mut MenuDay) -> Option<U>,
    I: FnOnce(&mut MenuDay, U),
{
    /// `forward` returns `None` to decline (precondition not met), otherwise
    /// the undo record handed to `inverse` on rollback
    pub fn new(date: NaiveDate, forward: F, inverse: I) -> Self {
        Self { date, forward, inverse }
    }

    /// Apply, confirm, undo on reject. `confirm` receives the loaded week's
    /// start and a snapshot of the day after the forward mutation.
    pub async fn run<S, C, Fut, T>(self, state: &S, queue: &DayQueue, confirm: C) -> Outcome<T>
    where
        S: StateHandle,
        C: FnOnce(NaiveDate, MenuDay) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let Self { date, forward, inverse } = self;
        let _lane = queue.enter(date).await;

        let applied = state
            .update(|s| {
                let week = s.current_week.as_mut()?;
                let week_start = week.week_start;
                let day = week.day_mut(date)?;
                let undo = forward(day)?;
                Some((week_start, s.week_generation, day.clone(), undo))
            })
            .flatten();
        let Some((week_start, generation, snapshot, undo)) = applied else {
            debug!("Skipped edit on {date}: not applicable to the loaded week");
            return Outcome::Skipped;
        };
        debug!("Applied optimistic edit on {date}");

        match confirm(week_start, snapshot).await {
            Ok(value) => Outcome::Confirmed(value),
            Err(err) => {
                let restored = state
                    .update(|s| match s.current_week.as_mut() {
                        Some(week) if week.week_start == week_start && s.week_generation == generation => {
                            week.day_mut(date).map(|day| inverse(day, undo)).is_some()
                        }
                        _ => false,
                    })
                    .unwrap_or(false);
                if restored {
                    warn!("Rolled back edit on {date}: {err}");
                } else {
                    warn!("Edit on {date} failed after week {week_start} was reloaded or unloaded: {err}");
                }
                Outcome::RolledBack(err)
            }
        }
    }
}
