//! Task board use-case service.
//!
//! # Responsibility
//! - Own the current task list and filter for one session.
//! - Write the list through the injected repository after every change.
//! - Notify subscribed observers after every state change.
//!
//! # Invariants
//! - A write happens before in-memory state changes; a failed write leaves
//!   the board as it was.
//! - No-op operations neither write nor notify.
//! - The lifetime-completed counter is written only by `clear_completed`.

use crate::model::filter::Filter;
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use crate::store::task_list::{TaskCounts, TaskList};
use log::{debug, error, info};

/// Handle returned by `TaskBoard::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// State pushed to observers after each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub filter: Filter,
    /// Tasks admitted by `filter`, in list order.
    pub visible: Vec<Task>,
    pub counts: TaskCounts,
}

/// Summary counts shown above the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardSummary {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    /// Stored lifetime counter plus tasks currently completed.
    pub all_time_completed: u64,
}

/// Receives board state after every change.
pub trait BoardObserver: Send {
    fn board_changed(&self, snapshot: &BoardSnapshot);
}

impl<F> BoardObserver for F
where
    F: Fn(&BoardSnapshot) + Send,
{
    fn board_changed(&self, snapshot: &BoardSnapshot) {
        self(snapshot)
    }
}

/// Session state over an injected task repository.
pub struct TaskBoard<R: TaskRepository> {
    repo: R,
    tasks: TaskList,
    filter: Filter,
    observers: Vec<(SubscriptionId, Box<dyn BoardObserver>)>,
    next_subscription: u64,
}

impl<R: TaskRepository> TaskBoard<R> {
    /// Loads the persisted task list and starts with `Filter::All`.
    pub fn open(repo: R) -> RepoResult<Self> {
        let tasks = repo.load_tasks()?;
        info!(
            "event=board_open module=service status=ok count={}",
            tasks.len()
        );
        Ok(Self {
            repo,
            tasks,
            filter: Filter::All,
            observers: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn counts(&self) -> TaskCounts {
        self.tasks.counts()
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks.visible(self.filter)
    }

    /// Computes summary counts, reading the lifetime counter from storage.
    pub fn summary(&self) -> RepoResult<BoardSummary> {
        let counts = self.tasks.counts();
        let stored = self.repo.load_total_completed()?;
        Ok(BoardSummary {
            total: counts.total,
            completed: counts.completed,
            remaining: counts.remaining,
            all_time_completed: stored.saturating_add(counts.completed as u64),
        })
    }

    /// Appends a task. Returns `Ok(false)` for blank text.
    pub fn add_task(&mut self, text: impl Into<String>) -> RepoResult<bool> {
        let next = self.tasks.with_added(text);
        self.commit("task_add", next)
    }

    /// Flips completion on one task. Returns `Ok(false)` for unknown IDs.
    pub fn toggle_task(&mut self, id: TaskId) -> RepoResult<bool> {
        let next = self.tasks.with_toggled(id);
        self.commit("task_toggle", next)
    }

    /// Replaces one task's text. Returns `Ok(false)` for blank text,
    /// unknown IDs, or identical text.
    pub fn edit_task(&mut self, id: TaskId, text: impl Into<String>) -> RepoResult<bool> {
        let next = self.tasks.with_edited(id, text);
        self.commit("task_edit", next)
    }

    /// Removes one task. Returns `Ok(false)` for unknown IDs.
    pub fn delete_task(&mut self, id: TaskId) -> RepoResult<bool> {
        let next = self.tasks.without(id);
        self.commit("task_delete", next)
    }

    /// Folds completed tasks into the lifetime counter and removes them.
    ///
    /// The counter is written before the list. A failed list write restores
    /// the previous counter so a retry counts the same tasks only once.
    pub fn clear_completed(&mut self) -> RepoResult<bool> {
        let completed = self.tasks.counts().completed;
        if completed == 0 {
            debug!("event=tasks_clear_completed module=service status=noop");
            return Ok(false);
        }

        let stored = self.repo.load_total_completed()?;
        let total = stored.saturating_add(completed as u64);
        if let Err(err) = self.repo.save_total_completed(total) {
            error!(
                "event=tasks_clear_completed module=service status=error stage=counter error={}",
                err
            );
            return Err(err);
        }

        let next = self.tasks.without_completed();
        let result = self.commit("tasks_clear_completed", next);
        if result.is_err() {
            match self.repo.save_total_completed(stored) {
                Ok(()) => info!(
                    "event=tasks_clear_completed module=service status=rolled_back total={stored}"
                ),
                Err(err) => error!(
                    "event=tasks_clear_completed module=service status=error stage=rollback error={err}"
                ),
            }
        }
        result
    }

    /// Changes the visible subset. Never touches storage.
    pub fn set_filter(&mut self, filter: Filter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        debug!("event=filter_set module=service status=ok filter={filter}");
        self.notify();
        true
    }

    /// Registers an observer called after every state change.
    pub fn subscribe(&mut self, observer: impl BoardObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            filter: self.filter,
            visible: self.visible_tasks().into_iter().cloned().collect(),
            counts: self.tasks.counts(),
        }
    }

    fn commit(&mut self, action: &'static str, next: TaskList) -> RepoResult<bool> {
        if next == self.tasks {
            debug!("event={action} module=service status=noop");
            return Ok(false);
        }

        if let Err(err) = self.repo.save_tasks(&next) {
            error!("event={action} module=service status=error error={err}");
            return Err(err);
        }

        self.tasks = next;
        info!(
            "event={action} module=service status=ok count={}",
            self.tasks.len()
        );
        self.notify();
        Ok(true)
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, observer) in &self.observers {
            observer.board_changed(&snapshot);
        }
    }
}
