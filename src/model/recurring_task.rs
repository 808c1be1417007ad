use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project sub-item that comes due every day at the same time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTask {
    /// Stable identity. Older records without one get a fresh id on read.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub task: String,
    /// Next due time, milliseconds since the Unix epoch.
    pub time: i64,
    /// True once the current occurrence has been acknowledged.
    pub done: bool,
}

impl RecurringTask {
    pub fn new(task: impl Into<String>, time: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            task: task.into(),
            time,
            done: true,
        }
    }

    /// The due time expressed in `tz`.
    pub fn due_at<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.timestamp_millis_opt(self.time).single()
    }

    pub fn is_lapsed<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.time < now.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn new_tasks_start_acknowledged() {
        assert!(RecurringTask::new("Backup", 0).done);
    }

    #[test]
    fn records_without_id_get_distinct_ids() {
        let json = r#"[{"task":"a","time":0,"done":false},{"task":"b","time":0,"done":false}]"#;
        let tasks: Vec<RecurringTask> = serde_json::from_str(json).unwrap();
        assert_ne!(tasks[0].id, tasks[1].id);
    }

    #[test]
    fn lapsed_is_strictly_before_now() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        assert!(RecurringTask::new("a", 999).is_lapsed(&now));
        assert!(!RecurringTask::new("a", 1_000).is_lapsed(&now));
    }
}
