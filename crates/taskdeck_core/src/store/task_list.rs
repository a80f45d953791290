//! Ordered task collection with immutable-update operations.
//!
//! # Responsibility
//! - Provide add/toggle/edit/delete/clear-completed as pure transformations.
//! - Derive counts and filtered views on demand.
//!
//! # Invariants
//! - Operations never mutate `self`; each returns a new list.
//! - IDs are unique within one list.
//! - Order is insertion order; removal does not reorder survivors.
//! - Unknown IDs and blank text produce an unchanged copy, never an error.

use crate::model::filter::Filter;
use crate::model::task::{is_blank, Task, TaskId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived counts over one task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

/// Ordered sequence of tasks. Serializes as a plain JSON array.
///
/// Deserializing goes through `From<Vec<Task>>`, so duplicate IDs are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Task>", into = "Vec<Task>")]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a new incomplete task with a fresh unique ID.
    ///
    /// Blank text yields an unchanged copy.
    pub fn with_added(&self, text: impl Into<String>) -> Self {
        let mut id = Uuid::new_v4();
        while self.contains(id) {
            id = Uuid::new_v4();
        }
        self.with_added_id(id, text)
    }

    /// Appends a new incomplete task using a caller-provided ID.
    ///
    /// Blank text or an ID already present yields an unchanged copy.
    pub fn with_added_id(&self, id: TaskId, text: impl Into<String>) -> Self {
        if self.contains(id) {
            return self.clone();
        }
        match Task::with_id(id, text) {
            Ok(task) => {
                let mut tasks = self.tasks.clone();
                tasks.push(task);
                Self { tasks }
            }
            Err(_) => self.clone(),
        }
    }

    /// Flips `completed` on the matching task.
    pub fn with_toggled(&self, id: TaskId) -> Self {
        self.map_matching(id, |task| Task {
            completed: !task.completed,
            ..task.clone()
        })
    }

    /// Replaces the matching task's text, keeping its ID and completion.
    ///
    /// Blank text yields an unchanged copy.
    pub fn with_edited(&self, id: TaskId, text: impl Into<String>) -> Self {
        let text = text.into();
        if is_blank(&text) {
            return self.clone();
        }
        self.map_matching(id, |task| Task {
            text: text.clone(),
            ..task.clone()
        })
    }

    /// Removes the matching task.
    pub fn without(&self, id: TaskId) -> Self {
        self.retain_where(|task| task.id != id)
    }

    /// Removes every completed task.
    pub fn without_completed(&self) -> Self {
        self.retain_where(|task| !task.completed)
    }

    /// Counts tasks by completion.
    pub fn counts(&self) -> TaskCounts {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskCounts {
            total,
            completed,
            remaining: total - completed,
        }
    }

    /// Returns tasks admitted by `filter`, in list order.
    pub fn visible(&self, filter: Filter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| filter.admits(task.completed))
            .collect()
    }

    fn map_matching(&self, id: TaskId, f: impl Fn(&Task) -> Task) -> Self {
        let tasks = self
            .tasks
            .iter()
            .map(|task| if task.id == id { f(task) } else { task.clone() })
            .collect();
        Self { tasks }
    }

    fn retain_where(&self, keep: impl Fn(&Task) -> bool) -> Self {
        let tasks = self.tasks.iter().filter(|task| keep(task)).cloned().collect();
        Self { tasks }
    }
}

impl From<Vec<Task>> for TaskList {
    /// Builds a list, dropping later entries whose ID already appeared.
    fn from(tasks: Vec<Task>) -> Self {
        let mut unique: Vec<Task> = Vec::with_capacity(tasks.len());
        for task in tasks {
            if !unique.iter().any(|seen| seen.id == task.id) {
                unique.push(task);
            }
        }
        Self { tasks: unique }
    }
}

impl From<TaskList> for Vec<Task> {
    fn from(list: TaskList) -> Self {
        list.tasks
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::TaskList;
    use crate::model::filter::Filter;
    use uuid::Uuid;

    #[test]
    fn operations_leave_the_source_untouched() {
        let list = TaskList::new().with_added("a");
        let id = list.as_slice()[0].id;
        let snapshot = list.clone();

        let _ = list.with_toggled(id);
        let _ = list.with_edited(id, "b");
        let _ = list.without(id);
        let _ = list.with_added("c");

        assert_eq!(list, snapshot);
    }

    #[test]
    fn delete_keeps_relative_order() {
        let list = TaskList::new()
            .with_added("one")
            .with_added("two")
            .with_added("three");
        let middle = list.as_slice()[1].id;

        let texts: Vec<_> = list
            .without(middle)
            .iter()
            .map(|task| task.text.clone())
            .collect();
        assert_eq!(texts, vec!["one", "three"]);
    }

    #[test]
    fn edit_preserves_identity_and_completion() {
        let list = TaskList::new().with_added("draft");
        let id = list.as_slice()[0].id;
        let edited = list.with_toggled(id).with_edited(id, "final");

        let task = edited.get(id).unwrap();
        assert_eq!(task.text, "final");
        assert!(task.completed);
    }

    #[test]
    fn blank_edit_is_a_no_op() {
        let list = TaskList::new().with_added("keep");
        let id = list.as_slice()[0].id;
        assert_eq!(list.with_edited(id, "   "), list);
    }

    #[test]
    fn added_id_that_already_exists_is_ignored() {
        let id = Uuid::new_v4();
        let list = TaskList::new().with_added_id(id, "first");
        assert_eq!(list.with_added_id(id, "second"), list);
    }

    #[test]
    fn from_vec_drops_duplicate_ids() {
        let first = TaskList::new().with_added("a");
        let mut tasks = first.as_slice().to_vec();
        let mut dup = tasks[0].clone();
        dup.text = "duplicate".to_string();
        tasks.push(dup);

        let list = TaskList::from(tasks);
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].text, "a");
    }

    #[test]
    fn deserialize_drops_duplicate_ids() {
        let id = Uuid::new_v4();
        let raw = serde_json::json!([
            { "id": id, "text": "first", "completed": false },
            { "id": id, "text": "second", "completed": true },
        ]);

        let list: TaskList = serde_json::from_value(raw).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].text, "first");
        assert!(!list.as_slice()[0].completed);
    }

    #[test]
    fn visible_filters_by_completion() {
        let list = TaskList::new().with_added("done").with_added("open");
        let done = list.as_slice()[0].id;
        let list = list.with_toggled(done);

        assert_eq!(list.visible(Filter::All).len(), 2);
        let completed = list.visible(Filter::Completed);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].text, "done");
        let remaining = list.visible(Filter::Remaining);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text, "open");
    }
}
