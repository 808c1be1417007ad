//! The recurring task list of one open project.
//!
//! Every mutation builds a new list, writes it to the store, and only then
//! replaces the local copy. A failed write leaves the list as it was.

use chrono::{DateTime, NaiveTime, TimeZone};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{DeskError, Field, ValidationError};
use crate::model::{Project, ProjectCode, ProjectPatch, RecurringTask};
use crate::scheduler;
use crate::store::ProjectStore;

/// Check the "new recurring task" form. Returns every problem found, in
/// field order, so each offending input can be marked.
pub fn check_new_task(task: &str, time: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if task.trim().is_empty() {
        errors.push(ValidationError::Empty { field: Field::Task });
    }
    if let Err(err) = scheduler::parse_time_of_day(time) {
        errors.push(err);
    }
    errors
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecurringTaskList {
    code: Option<ProjectCode>,
    tasks: Vec<RecurringTask>,
}

impl RecurringTaskList {
    /// A list owned by `code`. With no code, changes stay local.
    pub fn new(code: Option<ProjectCode>, tasks: Vec<RecurringTask>) -> Self {
        Self { code, tasks }
    }

    pub fn for_project(project: &Project) -> Self {
        Self::new(Some(project.code), project.recurring_tasks.clone())
    }

    pub fn code(&self) -> Option<ProjectCode> {
        self.code
    }

    pub fn tasks(&self) -> &[RecurringTask] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn commit(
        &mut self,
        store: &dyn ProjectStore,
        tasks: Vec<RecurringTask>,
    ) -> Result<(), DeskError> {
        if let Some(code) = self.code {
            let patch = ProjectPatch::recurring_tasks(tasks.clone());
            if let Err(err) = store.update_project(code, &patch) {
                warn!(%code, error = %err, "failed to save recurring tasks");
                return Err(err.into());
            }
            info!(%code, count = tasks.len(), "saved recurring tasks");
        }
        self.tasks = tasks;
        Ok(())
    }

    fn check_position(&self, index: usize, expected: Option<Uuid>) -> Result<(), ValidationError> {
        let task = self.tasks.get(index).ok_or(ValidationError::PositionOutOfRange {
            index,
            len: self.tasks.len(),
        })?;
        match expected {
            Some(id) if id != task.id => Err(ValidationError::StalePosition { index }),
            _ => Ok(()),
        }
    }

    /// Roll lapsed tasks forward against `now` and save them in one update.
    /// Returns whether anything changed; nothing is written otherwise.
    pub fn roll_over<Tz: TimeZone>(
        &mut self,
        store: &dyn ProjectStore,
        now: &DateTime<Tz>,
    ) -> Result<bool, DeskError> {
        match scheduler::roll_forward(&self.tasks, now) {
            Some(rolled) => {
                self.commit(store, rolled)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append a task due daily at `time` (`HH:MM`), first due tomorrow.
    pub fn append<Tz: TimeZone>(
        &mut self,
        store: &dyn ProjectStore,
        task: &str,
        time: &str,
        now: &DateTime<Tz>,
    ) -> Result<(), DeskError> {
        if let Some(err) = check_new_task(task, time).into_iter().next() {
            return Err(err.into());
        }
        let at: NaiveTime = scheduler::parse_time_of_day(time)?;
        let due = scheduler::first_occurrence(now, at)?;

        let mut tasks = self.tasks.clone();
        tasks.push(RecurringTask::new(task.trim(), due.timestamp_millis()));
        self.commit(store, tasks)
    }

    /// Flip `done` on the task at `index`. When `expected` is given, the task
    /// at that position must still have that id.
    pub fn toggle_done(
        &mut self,
        store: &dyn ProjectStore,
        index: usize,
        expected: Option<Uuid>,
    ) -> Result<(), DeskError> {
        self.check_position(index, expected)?;
        let mut tasks = self.tasks.clone();
        tasks[index].done = !tasks[index].done;
        self.commit(store, tasks)
    }

    /// Remove the task at `index`, keeping the order of the rest.
    pub fn delete(
        &mut self,
        store: &dyn ProjectStore,
        index: usize,
        expected: Option<Uuid>,
    ) -> Result<RecurringTask, DeskError> {
        self.check_position(index, expected)?;
        let mut tasks = self.tasks.clone();
        let removed = tasks.remove(index);
        self.commit(store, tasks)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::indexer::generate_keywords;
    use crate::store::MemoryStore;
    use chrono::{Duration, Utc};

    fn frozen_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap()
    }

    fn code() -> ProjectCode {
        ProjectCode::new(123456).unwrap()
    }

    fn store_with(tasks: Vec<RecurringTask>) -> MemoryStore {
        MemoryStore::with_projects([Project {
            code: code(),
            client: "Acme".into(),
            name: "Audit".into(),
            owner: "u-1".into(),
            note: String::new(),
            recurring_tasks: tasks,
            date_created: 0,
            keywords: generate_keywords(code(), "Acme", "Audit"),
        }])
    }

    fn stored_tasks(store: &MemoryStore) -> Vec<RecurringTask> {
        store.get_project(code()).unwrap().unwrap().recurring_tasks
    }

    fn three_tasks() -> Vec<RecurringTask> {
        let later = (frozen_now() + Duration::hours(1)).timestamp_millis();
        vec![
            RecurringTask::new("first", later),
            RecurringTask::new("second", later),
            RecurringTask::new("third", later),
        ]
    }

    // -- roll_over -----------------------------------------------------------

    #[test]
    fn roll_over_saves_once_and_is_idempotent() {
        let now = frozen_now();
        let tasks = vec![
            RecurringTask::new("lapsed", (now - Duration::hours(50)).timestamp_millis()),
            RecurringTask::new("upcoming", (now + Duration::hours(1)).timestamp_millis()),
        ];
        let store = store_with(tasks.clone());
        let mut list = RecurringTaskList::new(Some(code()), tasks);

        assert!(list.roll_over(&store, &now).unwrap());
        assert_eq!(store.writes(), 1);
        assert_eq!(stored_tasks(&store), list.tasks());
        assert!(!list.tasks()[0].done);
        assert!(list.tasks()[1].done);

        assert!(!list.roll_over(&store, &now).unwrap());
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn roll_over_without_code_stays_local() {
        let now = frozen_now();
        let store = MemoryStore::new();
        let lapsed = RecurringTask::new("lapsed", (now - Duration::days(2)).timestamp_millis());
        let mut list = RecurringTaskList::new(None, vec![lapsed]);

        assert!(list.roll_over(&store, &now).unwrap());
        assert_eq!(store.writes(), 0);
        assert!(list.tasks()[0].time >= now.timestamp_millis());
    }

    #[test]
    fn failed_roll_over_keeps_local_state() {
        let now = frozen_now();
        let tasks = vec![RecurringTask::new("lapsed", (now - Duration::hours(3)).timestamp_millis())];
        let store = store_with(tasks.clone());
        store.set_fail_writes(true);
        let mut list = RecurringTaskList::new(Some(code()), tasks.clone());

        let err = list.roll_over(&store, &now).unwrap_err();
        assert!(matches!(err, DeskError::Persistence(StoreError::Unavailable(_))));
        assert_eq!(list.tasks(), tasks.as_slice());
    }

    // -- append --------------------------------------------------------------

    #[test]
    fn append_schedules_tomorrow_and_starts_done() {
        let now = frozen_now();
        let store = store_with(Vec::new());
        let mut list = RecurringTaskList::new(Some(code()), Vec::new());

        list.append(&store, "  Check backups ", "07:30", &now).unwrap();

        let task = &list.tasks()[0];
        assert_eq!(task.task, "Check backups");
        assert!(task.done);
        assert_eq!(
            task.time,
            Utc.with_ymd_and_hms(2024, 6, 4, 7, 30, 0).unwrap().timestamp_millis()
        );
        assert_eq!(stored_tasks(&store), list.tasks());
    }

    #[test]
    fn append_validates_before_writing() {
        let now = frozen_now();
        let store = store_with(Vec::new());
        let mut list = RecurringTaskList::new(Some(code()), Vec::new());

        let err = list.append(&store, "", "07:30", &now).unwrap_err();
        assert_eq!(err.field(), Some(Field::Task));
        let err = list.append(&store, "Backup", "7h30", &now).unwrap_err();
        assert_eq!(err.field(), Some(Field::Time));

        assert_eq!(store.writes(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn check_new_task_reports_both_fields() {
        let errors = check_new_task(" ", "");
        assert_eq!(
            errors,
            vec![
                ValidationError::Empty { field: Field::Task },
                ValidationError::Empty { field: Field::Time },
            ]
        );
        assert!(check_new_task("Backup", "07:30").is_empty());
    }

    // -- toggle_done / delete ------------------------------------------------

    #[test]
    fn toggle_flips_only_the_chosen_task() {
        let tasks = three_tasks();
        let store = store_with(tasks.clone());
        let mut list = RecurringTaskList::new(Some(code()), tasks.clone());

        list.toggle_done(&store, 2, Some(tasks[2].id)).unwrap();

        assert!(!list.tasks()[2].done);
        assert!(list.tasks()[0].done && list.tasks()[1].done);
        assert_eq!(stored_tasks(&store), list.tasks());
    }

    #[test]
    fn delete_middle_task_preserves_order() {
        let tasks = three_tasks();
        let store = store_with(tasks.clone());
        let mut list = RecurringTaskList::new(Some(code()), tasks.clone());

        let removed = list.delete(&store, 1, None).unwrap();

        assert_eq!(removed.task, "second");
        let names: Vec<&str> = list.tasks().iter().map(|t| t.task.as_str()).collect();
        assert_eq!(names, vec!["first", "third"]);
        assert_eq!(stored_tasks(&store), list.tasks());
    }

    #[test]
    fn stale_or_missing_positions_are_rejected_without_writing() {
        let tasks = three_tasks();
        let store = store_with(tasks.clone());
        let mut list = RecurringTaskList::new(Some(code()), tasks.clone());

        assert!(matches!(
            list.delete(&store, 3, None),
            Err(DeskError::Validation(ValidationError::PositionOutOfRange { index: 3, len: 3 }))
        ));
        assert!(matches!(
            list.toggle_done(&store, 0, Some(tasks[1].id)),
            Err(DeskError::Validation(ValidationError::StalePosition { index: 0 }))
        ));
        assert_eq!(store.writes(), 0);
        assert_eq!(list.tasks(), tasks.as_slice());
    }

    #[test]
    fn failed_delete_keeps_the_task() {
        let tasks = three_tasks();
        let store = store_with(tasks.clone());
        store.set_fail_writes(true);
        let mut list = RecurringTaskList::new(Some(code()), tasks.clone());

        assert!(list.delete(&store, 0, None).is_err());
        assert_eq!(list.tasks().len(), 3);
    }

    #[test]
    fn update_on_a_vanished_project_is_not_found() {
        let tasks = three_tasks();
        let store = MemoryStore::new();
        let mut list = RecurringTaskList::new(Some(code()), tasks);

        assert!(matches!(
            list.toggle_done(&store, 0, None),
            Err(DeskError::NotFound { .. })
        ));
    }
}
