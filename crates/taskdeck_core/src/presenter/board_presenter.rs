//! Toolkit-agnostic presentation state for the task board.
//!
//! # Responsibility
//! - Hold UI-local state: the add input, the open modal and its draft.
//! - Translate user intents into board operations.
//! - Render a plain view model the host toolkit draws as-is.
//!
//! # Invariants
//! - At most one modal is open; while it is, list and input intents are
//!   ignored.
//! - Filter selection commits immediately; closing the dialog never reverts.
//! - Blank add/edit submissions change nothing.

use crate::model::filter::Filter;
use crate::model::task::{is_blank, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use crate::service::task_board::{BoardSummary, TaskBoard};
use log::debug;

/// Heading rendered above the summary.
pub const BOARD_TITLE: &str = "Student Productivity App";

/// One user action forwarded by the host toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    InputChanged(String),
    AddTask,
    ToggleTask(TaskId),
    OpenEdit(TaskId),
    EditDraftChanged(String),
    SaveEdit,
    CancelEdit,
    DeleteTask(TaskId),
    OpenFilter,
    SelectFilter(Filter),
    CloseFilter,
    ClearCompleted,
}

/// Modal overlay currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    EditTask { task_id: TaskId, draft: String },
    SelectFilter,
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

/// Rendered modal content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    EditTask {
        task_id: TaskId,
        draft: String,
        /// False while the draft is blank.
        can_save: bool,
    },
    SelectFilter {
        selected: Filter,
        options: [Filter; 3],
    },
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardViewModel {
    pub title: &'static str,
    pub summary: BoardSummary,
    pub input_text: String,
    pub filter_label: String,
    pub rows: Vec<TaskRow>,
    pub show_clear_completed: bool,
    pub modal: Option<ModalView>,
}

/// Presentation state wrapped around one task board.
pub struct BoardPresenter<R: TaskRepository> {
    board: TaskBoard<R>,
    input_text: String,
    modal: Option<Modal>,
}

impl<R: TaskRepository> BoardPresenter<R> {
    pub fn new(board: TaskBoard<R>) -> Self {
        Self {
            board,
            input_text: String::new(),
            modal: None,
        }
    }

    pub fn board(&self) -> &TaskBoard<R> {
        &self.board
    }

    /// Mutable access for observer registration.
    pub fn board_mut(&mut self) -> &mut TaskBoard<R> {
        &mut self.board
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Applies one intent. Returns whether any board or UI state changed.
    pub fn dispatch(&mut self, intent: UiIntent) -> RepoResult<bool> {
        debug!(
            "event=ui_intent module=presenter intent={} modal_open={}",
            intent_name(&intent),
            self.modal.is_some()
        );
        match self.modal.take() {
            Some(modal) => self.dispatch_in_modal(modal, intent),
            None => self.dispatch_in_list(intent),
        }
    }

    /// Builds the view model for the current state.
    pub fn render(&self) -> RepoResult<BoardViewModel> {
        let filter = self.board.filter();
        let rows = self
            .board
            .visible_tasks()
            .into_iter()
            .map(|task| TaskRow {
                id: task.id,
                text: task.text.clone(),
                completed: task.completed,
            })
            .collect();
        let modal = self.modal.as_ref().map(|modal| match modal {
            Modal::EditTask { task_id, draft } => ModalView::EditTask {
                task_id: *task_id,
                draft: draft.clone(),
                can_save: !is_blank(draft),
            },
            Modal::SelectFilter => ModalView::SelectFilter {
                selected: filter,
                options: Filter::ALL,
            },
        });

        Ok(BoardViewModel {
            title: BOARD_TITLE,
            summary: self.board.summary()?,
            input_text: self.input_text.clone(),
            filter_label: format!("Filter: {filter}"),
            rows,
            show_clear_completed: filter.offers_clear_completed(),
            modal,
        })
    }

    fn dispatch_in_list(&mut self, intent: UiIntent) -> RepoResult<bool> {
        match intent {
            UiIntent::InputChanged(text) => {
                let changed = self.input_text != text;
                self.input_text = text;
                Ok(changed)
            }
            UiIntent::AddTask => {
                if is_blank(&self.input_text) {
                    return Ok(false);
                }
                let text = std::mem::take(&mut self.input_text);
                if let Err(err) = self.board.add_task(text.clone()) {
                    self.input_text = text;
                    return Err(err);
                }
                Ok(true)
            }
            UiIntent::ToggleTask(id) => self.board.toggle_task(id),
            UiIntent::DeleteTask(id) => self.board.delete_task(id),
            UiIntent::OpenEdit(id) => {
                let Some(task) = self.board.tasks().get(id) else {
                    return Ok(false);
                };
                self.modal = Some(Modal::EditTask {
                    task_id: id,
                    draft: task.text.clone(),
                });
                Ok(true)
            }
            UiIntent::OpenFilter => {
                self.modal = Some(Modal::SelectFilter);
                Ok(true)
            }
            UiIntent::ClearCompleted => {
                if !self.board.filter().offers_clear_completed() {
                    return Ok(false);
                }
                self.board.clear_completed()
            }
            UiIntent::EditDraftChanged(_)
            | UiIntent::SaveEdit
            | UiIntent::CancelEdit
            | UiIntent::SelectFilter(_)
            | UiIntent::CloseFilter => Ok(false),
        }
    }

    fn dispatch_in_modal(&mut self, modal: Modal, intent: UiIntent) -> RepoResult<bool> {
        match (modal, intent) {
            (Modal::EditTask { task_id, .. }, UiIntent::EditDraftChanged(draft)) => {
                self.modal = Some(Modal::EditTask { task_id, draft });
                Ok(true)
            }
            (Modal::EditTask { task_id, draft }, UiIntent::SaveEdit) => {
                if is_blank(&draft) {
                    self.modal = Some(Modal::EditTask { task_id, draft });
                    return Ok(false);
                }
                if let Err(err) = self.board.edit_task(task_id, draft.clone()) {
                    self.modal = Some(Modal::EditTask { task_id, draft });
                    return Err(err);
                }
                Ok(true)
            }
            (Modal::EditTask { .. }, UiIntent::CancelEdit) => Ok(true),
            (Modal::SelectFilter, UiIntent::SelectFilter(filter)) => {
                self.modal = Some(Modal::SelectFilter);
                Ok(self.board.set_filter(filter))
            }
            (Modal::SelectFilter, UiIntent::CloseFilter) => Ok(true),
            (modal, _) => {
                self.modal = Some(modal);
                Ok(false)
            }
        }
    }
}

fn intent_name(intent: &UiIntent) -> &'static str {
    match intent {
        UiIntent::InputChanged(_) => "input_changed",
        UiIntent::AddTask => "add_task",
        UiIntent::ToggleTask(_) => "toggle_task",
        UiIntent::OpenEdit(_) => "open_edit",
        UiIntent::EditDraftChanged(_) => "edit_draft_changed",
        UiIntent::SaveEdit => "save_edit",
        UiIntent::CancelEdit => "cancel_edit",
        UiIntent::DeleteTask(_) => "delete_task",
        UiIntent::OpenFilter => "open_filter",
        UiIntent::SelectFilter(_) => "select_filter",
        UiIntent::CloseFilter => "close_filter",
        UiIntent::ClearCompleted => "clear_completed",
    }
}
