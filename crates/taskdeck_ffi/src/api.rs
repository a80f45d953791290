//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the board presenter to Dart via FRB as intents in, views out.
//! - Keep error semantics simple for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One process-wide presenter serves every call; calls are serialized.
//! - Unparsable task IDs or filter labels are silent no-ops.

use log::warn;
use std::sync::{Mutex, OnceLock, PoisonError};
use taskdeck_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    open_sqlite_presenter, ping as ping_inner, BoardPresenter, BoardViewModel, Filter,
    KvTaskRepository, ModalView, RepoResult, SqliteKvStore, StoreConfig, UiIntent,
};
use uuid::Uuid;

type SqlitePresenter = BoardPresenter<KvTaskRepository<SqliteKvStore>>;

static STORE_CONFIG: OnceLock<StoreConfig> = OnceLock::new();
static BOARD: Mutex<Option<SqlitePresenter>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive); empty
///   selects the build default (`debug` in debug builds, `info` in release).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = match level.trim() {
        "" => default_log_level(),
        level => level,
    };
    match init_logging_inner(level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// User intent forwarded by the Flutter UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardIntent {
    InputChanged { text: String },
    AddTask,
    ToggleTask { task_id: String },
    OpenEdit { task_id: String },
    EditDraftChanged { text: String },
    SaveEdit,
    CancelEdit,
    DeleteTask { task_id: String },
    OpenFilter,
    /// `filter` is `All|Completed|Remaining`, case-insensitive.
    SelectFilter { filter: String },
    CloseFilter,
    ClearCompleted,
}

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    pub task_id: String,
    pub text: String,
    pub completed: bool,
}

/// Open modal overlay, flattened for Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardModal {
    /// `edit_task` or `select_filter`.
    pub kind: String,
    pub task_id: Option<String>,
    pub draft: Option<String>,
    pub can_save: bool,
    pub selected_filter: Option<String>,
    pub filter_options: Vec<String>,
}

/// Full frame for the board screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub title: String,
    pub total: u32,
    pub completed: u32,
    pub remaining: u32,
    pub all_time_completed: u64,
    pub input_text: String,
    pub filter_label: String,
    pub rows: Vec<BoardRow>,
    pub show_clear_completed: bool,
    pub modal: Option<BoardModal>,
}

/// Response envelope for board calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardResponse {
    /// Whether the call completed without a storage failure.
    pub ok: bool,
    /// Whether board or UI state changed.
    pub changed: bool,
    /// Human-readable response message for diagnostics.
    pub message: String,
    /// Current frame; `None` only when the board could not be opened.
    pub view: Option<BoardView>,
}

/// Renders the current board without changing it.
///
/// # FFI contract
/// - Sync call, DB-backed execution (opens the store on first use).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_view() -> BoardResponse {
    respond(|presenter| Ok((false, presenter.render()?)), "board_view")
}

/// Applies one UI intent and returns the resulting frame.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Intents carrying an unparsable ID or filter change nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn board_dispatch(intent: BoardIntent) -> BoardResponse {
    let ui_intent = to_ui_intent(intent);
    respond(
        move |presenter| {
            let changed = match ui_intent {
                Some(intent) => presenter.dispatch(intent)?,
                None => false,
            };
            Ok((changed, presenter.render()?))
        },
        "board_dispatch",
    )
}

fn respond(
    f: impl FnOnce(&mut SqlitePresenter) -> RepoResult<(bool, BoardViewModel)>,
    operation: &str,
) -> BoardResponse {
    let mut guard = BOARD.lock().unwrap_or_else(PoisonError::into_inner);
    if guard.is_none() {
        match open_sqlite_presenter(resolve_store_config()) {
            Ok(presenter) => *guard = Some(presenter),
            Err(err) => {
                return BoardResponse {
                    ok: false,
                    changed: false,
                    message: format!("{operation} failed: board open failed: {err}"),
                    view: None,
                }
            }
        }
    }
    let Some(presenter) = guard.as_mut() else {
        return BoardResponse {
            ok: false,
            changed: false,
            message: format!("{operation} failed: board unavailable"),
            view: None,
        };
    };

    match f(&mut *presenter) {
        Ok((changed, view)) => BoardResponse {
            ok: true,
            changed,
            message: if changed { "Updated." } else { "No change." }.to_string(),
            view: Some(to_board_view(view)),
        },
        Err(err) => BoardResponse {
            ok: false,
            changed: false,
            message: format!("{operation} failed: {err}"),
            view: presenter.render().ok().map(to_board_view),
        },
    }
}

fn resolve_store_config() -> &'static StoreConfig {
    STORE_CONFIG.get_or_init(StoreConfig::from_env)
}

fn to_ui_intent(intent: BoardIntent) -> Option<UiIntent> {
    let ui_intent = match intent {
        BoardIntent::InputChanged { text } => UiIntent::InputChanged(text),
        BoardIntent::AddTask => UiIntent::AddTask,
        BoardIntent::ToggleTask { task_id } => UiIntent::ToggleTask(parse_task_id(&task_id)?),
        BoardIntent::OpenEdit { task_id } => UiIntent::OpenEdit(parse_task_id(&task_id)?),
        BoardIntent::EditDraftChanged { text } => UiIntent::EditDraftChanged(text),
        BoardIntent::SaveEdit => UiIntent::SaveEdit,
        BoardIntent::CancelEdit => UiIntent::CancelEdit,
        BoardIntent::DeleteTask { task_id } => UiIntent::DeleteTask(parse_task_id(&task_id)?),
        BoardIntent::OpenFilter => UiIntent::OpenFilter,
        BoardIntent::SelectFilter { filter } => match filter.parse::<Filter>() {
            Ok(filter) => UiIntent::SelectFilter(filter),
            Err(err) => {
                warn!(
                    "event=board_dispatch module=ffi status=ignored reason=invalid_filter error={err}"
                );
                return None;
            }
        },
        BoardIntent::CloseFilter => UiIntent::CloseFilter,
        BoardIntent::ClearCompleted => UiIntent::ClearCompleted,
    };
    Some(ui_intent)
}

fn parse_task_id(raw: &str) -> Option<Uuid> {
    match Uuid::parse_str(raw.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            warn!("event=board_dispatch module=ffi status=ignored reason=invalid_task_id");
            None
        }
    }
}

fn to_board_view(view: BoardViewModel) -> BoardView {
    BoardView {
        title: view.title.to_string(),
        total: count_to_u32(view.summary.total),
        completed: count_to_u32(view.summary.completed),
        remaining: count_to_u32(view.summary.remaining),
        all_time_completed: view.summary.all_time_completed,
        input_text: view.input_text,
        filter_label: view.filter_label,
        rows: view
            .rows
            .into_iter()
            .map(|row| BoardRow {
                task_id: row.id.to_string(),
                text: row.text,
                completed: row.completed,
            })
            .collect(),
        show_clear_completed: view.show_clear_completed,
        modal: view.modal.map(to_board_modal),
    }
}

fn to_board_modal(modal: ModalView) -> BoardModal {
    match modal {
        ModalView::EditTask {
            task_id,
            draft,
            can_save,
        } => BoardModal {
            kind: "edit_task".to_string(),
            task_id: Some(task_id.to_string()),
            draft: Some(draft),
            can_save,
            selected_filter: None,
            filter_options: Vec::new(),
        },
        ModalView::SelectFilter { selected, options } => BoardModal {
            kind: "select_filter".to_string(),
            task_id: None,
            draft: None,
            can_save: false,
            selected_filter: Some(selected.as_str().to_string()),
            filter_options: options
                .iter()
                .map(|filter| filter.as_str().to_string())
                .collect(),
        },
    }
}

fn count_to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        board_dispatch, board_view, core_version, init_logging, ping, resolve_store_config,
        BoardIntent, BoardView, STORE_CONFIG,
    };
    use serial_test::serial;
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};
    use taskdeck_core::StoreConfig;
    use tempfile::TempDir;

    static TEST_STORE_DIR: OnceLock<TempDir> = OnceLock::new();

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_uses_default_level_when_blank() {
        let error = init_logging("  ".to_string(), "tmp/logs".to_string());
        assert!(error.contains("absolute"), "{error}");
    }

    #[test]
    #[serial]
    fn board_store_lives_in_test_directory() {
        reset_ui();
        let dir = TEST_STORE_DIR.get().expect("test store dir should be set");
        let db_path = &resolve_store_config().db_path;
        assert!(db_path.starts_with(dir.path()));
        assert_ne!(db_path, &StoreConfig::from_env().db_path);
    }

    #[test]
    #[serial]
    fn add_toggle_and_delete_through_intents() {
        reset_ui();
        let text = unique_token("ffi-add");

        dispatch(BoardIntent::InputChanged { text: text.clone() });
        let view = dispatch(BoardIntent::AddTask);
        assert_eq!(view.input_text, "");
        let task_id = row_id(&view, &text).expect("added task should be listed");

        let view = dispatch(BoardIntent::ToggleTask {
            task_id: task_id.clone(),
        });
        assert!(view
            .rows
            .iter()
            .any(|row| row.task_id == task_id && row.completed));

        let view = dispatch(BoardIntent::DeleteTask { task_id });
        assert!(row_id(&view, &text).is_none());
    }

    #[test]
    #[serial]
    fn edit_flow_replaces_text() {
        reset_ui();
        let original = unique_token("ffi-edit");
        let replacement = unique_token("ffi-edited");
        dispatch(BoardIntent::InputChanged {
            text: original.clone(),
        });
        let view = dispatch(BoardIntent::AddTask);
        let task_id = row_id(&view, &original).expect("added task should be listed");

        let view = dispatch(BoardIntent::OpenEdit {
            task_id: task_id.clone(),
        });
        let modal = view.modal.expect("edit modal should be open");
        assert_eq!(modal.kind, "edit_task");
        assert_eq!(modal.draft.as_deref(), Some(original.as_str()));

        dispatch(BoardIntent::EditDraftChanged {
            text: replacement.clone(),
        });
        let view = dispatch(BoardIntent::SaveEdit);
        assert!(view.modal.is_none());
        assert_eq!(row_id(&view, &replacement), Some(task_id.clone()));

        dispatch(BoardIntent::DeleteTask { task_id });
    }

    #[test]
    #[serial]
    fn filter_dialog_selects_and_reports_label() {
        reset_ui();
        let view = dispatch(BoardIntent::OpenFilter);
        let modal = view.modal.expect("filter modal should be open");
        assert_eq!(modal.kind, "select_filter");
        assert_eq!(modal.filter_options, vec!["All", "Completed", "Remaining"]);

        let view = dispatch(BoardIntent::SelectFilter {
            filter: "remaining".to_string(),
        });
        assert_eq!(view.filter_label, "Filter: Remaining");
        assert!(!view.show_clear_completed);
        assert!(view.rows.iter().all(|row| !row.completed));

        let view = dispatch(BoardIntent::CloseFilter);
        assert!(view.modal.is_none());
        assert_eq!(view.filter_label, "Filter: Remaining");
        reset_ui();
    }

    #[test]
    #[serial]
    fn malformed_ids_and_filters_are_ignored() {
        reset_ui();
        let before = board_view();
        assert!(before.ok, "{}", before.message);

        let response = board_dispatch(BoardIntent::ToggleTask {
            task_id: "not-a-uuid".to_string(),
        });
        assert!(response.ok);
        assert!(!response.changed);
        assert_eq!(response.view, before.view);

        dispatch(BoardIntent::OpenFilter);
        let response = board_dispatch(BoardIntent::SelectFilter {
            filter: "someday".to_string(),
        });
        assert!(response.ok);
        assert!(!response.changed);
        reset_ui();
    }

    fn dispatch(intent: BoardIntent) -> BoardView {
        let response = board_dispatch(intent);
        assert!(response.ok, "{}", response.message);
        response.view.expect("successful dispatch should render")
    }

    /// Pins the shared board to a throwaway store before it is first opened.
    fn use_test_store() {
        let dir = TEST_STORE_DIR.get_or_init(|| tempfile::tempdir().expect("create temp store dir"));
        let config = STORE_CONFIG.get_or_init(|| StoreConfig {
            db_path: dir.path().join("taskdeck.sqlite3"),
        });
        assert!(config.db_path.starts_with(dir.path()));
    }

    fn reset_ui() {
        use_test_store();
        board_dispatch(BoardIntent::CancelEdit);
        board_dispatch(BoardIntent::CloseFilter);
        board_dispatch(BoardIntent::OpenFilter);
        board_dispatch(BoardIntent::SelectFilter {
            filter: "All".to_string(),
        });
        board_dispatch(BoardIntent::CloseFilter);
        board_dispatch(BoardIntent::InputChanged {
            text: String::new(),
        });
    }

    fn row_id(view: &BoardView, text: &str) -> Option<String> {
        view.rows
            .iter()
            .find(|row| row.text == text)
            .map(|row| row.task_id.clone())
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
