//! Daily rollover of recurring tasks.
//!
//! Rollover is pull-based: it runs once when a project is opened, against a
//! single `now` snapshot, and never on a timer.

use chrono::{DateTime, Days, NaiveTime, TimeZone};
use tracing::debug;

use crate::error::{Field, ValidationError};
use crate::model::RecurringTask;

/// Advance `due` by one calendar day in its own time zone. Falls back to a
/// fixed 24 hours when the same wall-clock time does not exist (or is
/// ambiguous) on the next day.
fn next_day<Tz: TimeZone>(due: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    due.clone()
        .checked_add_days(Days::new(1))
        .or_else(|| due.clone().checked_add_signed(chrono::Duration::days(1)))
}

/// Roll one task forward if it has lapsed. Returns `None` when the task is
/// still due in the future (or exactly now).
pub fn roll_forward_task<Tz: TimeZone>(
    task: &RecurringTask,
    now: &DateTime<Tz>,
) -> Option<RecurringTask> {
    if !task.is_lapsed(now) {
        return None;
    }

    let mut due = match task.due_at(&now.timezone()) {
        Some(due) => due,
        None => now.clone(),
    };
    let mut steps = 0u32;
    while due < *now {
        match next_day(&due) {
            Some(next) => due = next,
            None => break,
        }
        steps += 1;
    }
    debug!(task = %task.task, steps, "rolled recurring task forward");

    Some(RecurringTask {
        time: due.timestamp_millis(),
        done: false,
        ..task.clone()
    })
}

/// Roll every lapsed task forward, keeping the original order. Returns
/// `None` when nothing changed, so callers can skip the write.
pub fn roll_forward<Tz: TimeZone>(
    tasks: &[RecurringTask],
    now: &DateTime<Tz>,
) -> Option<Vec<RecurringTask>> {
    let mut changed = false;
    let rolled = tasks
        .iter()
        .map(|task| match roll_forward_task(task, now) {
            Some(updated) => {
                changed = true;
                updated
            }
            None => task.clone(),
        })
        .collect();
    changed.then_some(rolled)
}

/// Parse a 24-hour `HH:MM` time of day.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: Field::Time });
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|_| ValidationError::InvalidTime(input.to_string()))
}

/// First due time of a new task: today's date at `at`, plus one day.
pub fn first_occurrence<Tz: TimeZone>(
    now: &DateTime<Tz>,
    at: NaiveTime,
) -> Result<DateTime<Tz>, ValidationError> {
    let local = now
        .date_naive()
        .and_time(at)
        .checked_add_days(Days::new(1))
        .ok_or_else(|| ValidationError::InvalidTime(at.format("%H:%M").to_string()))?;
    now.timezone()
        .from_local_datetime(&local)
        .earliest()
        .ok_or_else(|| ValidationError::NonexistentLocalTime(local.to_string()))
}
