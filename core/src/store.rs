//! State-mutating operations: remote call first, local write after success.
//!
//! # Design
//! `TodoStore` owns the API layer and a clock but no state. Every operation
//! borrows a `TodoState` mutably for its whole duration, so there is exactly
//! one writer at a time and no ambient globals.
//!
//! Operations never return errors. A failure is logged, a short message is
//! stored in `TodoState::error`, and the local collections are left as they
//! were. `loading` is raised on entry and lowered on every exit path.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::TodoApi;
use crate::clock::{Clock, SystemClock};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::state::TodoState;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{CategoryPatch, NewCategory, NewTodo, TodoDraft, TodoPatch, FALLBACK_CATEGORY};

pub const LOAD_FAILED: &str = "Failed to load data";
pub const ADD_TODO_FAILED: &str = "Failed to add todo";
pub const UPDATE_TODO_FAILED: &str = "Failed to update todo";
pub const DELETE_TODO_FAILED: &str = "Failed to delete todo";
pub const ADD_CATEGORY_FAILED: &str = "Failed to add category";
pub const UPDATE_CATEGORY_FAILED: &str = "Failed to update category";
pub const DELETE_CATEGORY_FAILED: &str = "Failed to delete category";

/// Outcome of reassigning one orphaned todo during `delete_category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    pub todo_id: String,
    pub result: Result<(), ApiError>,
}

/// Everything `delete_category` did, in the order it did it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignmentReport {
    pub category_id: String,
    /// Whether the remote delete succeeded. No reassignment is attempted
    /// otherwise.
    pub deleted: bool,
    pub outcomes: Vec<Reassignment>,
}

impl ReassignmentReport {
    fn new(category_id: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            deleted: false,
            outcomes: Vec::new(),
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &Reassignment> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }

    pub fn is_clean(&self) -> bool {
        self.deleted && self.failures().next().is_none()
    }
}

pub struct TodoStore<T> {
    api: TodoApi<T>,
    clock: Arc<dyn Clock>,
}

impl TodoStore<ReqwestTransport> {
    /// Store talking to `config.base_url` over reqwest, stamping wall-clock time.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            TodoApi::new(&config.base_url, ReqwestTransport::new()),
            Arc::new(SystemClock),
        )
    }

    /// Same as [`TodoStore::from_config`] with [`ApiConfig::from_env`].
    pub fn from_env() -> Self {
        Self::from_config(&ApiConfig::from_env())
    }
}

impl<T: Transport> TodoStore<T> {
    pub fn new(api: TodoApi<T>, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }

    /// Fetch todos and categories concurrently and replace both collections.
    ///
    /// Nothing is written unless both requests succeed.
    pub async fn load_data(&self, state: &mut TodoState) {
        state.loading = true;
        state.error = None;

        let (todos, categories) =
            futures::join!(self.api.get_todos(), self.api.get_categories());
        match (todos, categories) {
            (Ok(todos), Ok(categories)) => {
                info!(todos = todos.len(), categories = categories.len(), "data loaded");
                state.todos = todos;
                state.categories = categories;
            }
            (Err(e), _) | (_, Err(e)) => record_failure(state, "load_data", LOAD_FAILED, &e),
        }

        state.loading = false;
    }

    /// Create a todo and put the server's copy at the front of the list.
    pub async fn add_todo(&self, state: &mut TodoState, draft: TodoDraft) {
        state.loading = true;

        let new = NewTodo::from_draft(draft, self.clock.now());
        match self.api.create_todo(&new).await {
            Ok(created) => state.todos.insert(0, created),
            Err(e) => record_failure(state, "add_todo", ADD_TODO_FAILED, &e),
        }

        state.loading = false;
    }

    /// Send `patch` with a fresh `updatedAt` and swap in the server's copy.
    ///
    /// `createdAt` is never sent. A result for an id that is not held
    /// locally is discarded.
    pub async fn update_todo(&self, state: &mut TodoState, id: &str, patch: TodoPatch) {
        state.loading = true;
        if let Err(e) = self.try_apply_update(state, id, patch).await {
            record_failure(state, "update_todo", UPDATE_TODO_FAILED, &e);
        }
        state.loading = false;
    }

    pub async fn delete_todo(&self, state: &mut TodoState, id: &str) {
        state.loading = true;

        match self.api.delete_todo(id).await {
            Ok(()) => {
                if let Some(index) = state.todos.iter().position(|todo| todo.id == id) {
                    state.todos.remove(index);
                }
            }
            Err(e) => record_failure(state, "delete_todo", DELETE_TODO_FAILED, &e),
        }

        state.loading = false;
    }

    /// Flip the completed flag of a locally known todo. Unknown ids are a no-op.
    pub async fn toggle_todo(&self, state: &mut TodoState, id: &str) {
        let Some(completed) = state.todo(id).map(|todo| todo.completed) else {
            return;
        };
        self.update_todo(state, id, TodoPatch::completed(!completed)).await;
    }

    pub async fn add_category(&self, state: &mut TodoState, category: NewCategory) {
        state.loading = true;

        match self.api.create_category(&category).await {
            Ok(created) => state.categories.push(created),
            Err(e) => record_failure(state, "add_category", ADD_CATEGORY_FAILED, &e),
        }

        state.loading = false;
    }

    pub async fn update_category(&self, state: &mut TodoState, id: &str, patch: CategoryPatch) {
        state.loading = true;

        match self.api.update_category(id, &patch).await {
            Ok(updated) => {
                if let Some(slot) = state.categories.iter_mut().find(|c| c.id == id) {
                    *slot = updated;
                }
            }
            Err(e) => record_failure(state, "update_category", UPDATE_CATEGORY_FAILED, &e),
        }

        state.loading = false;
    }

    /// Delete a category, then move each of its todos to [`FALLBACK_CATEGORY`].
    ///
    /// Reassignments run one at a time in collection order. A failed one does
    /// not stop the rest; `state.error` ends up holding the last failure and
    /// the returned report holds all of them.
    pub async fn delete_category(&self, state: &mut TodoState, id: &str) -> ReassignmentReport {
        state.loading = true;
        let mut report = ReassignmentReport::new(id);

        match self.api.delete_category(id).await {
            Ok(()) => {
                report.deleted = true;
                if let Some(index) = state.categories.iter().position(|c| c.id == id) {
                    state.categories.remove(index);
                }

                let orphans: Vec<String> = state
                    .todos
                    .iter()
                    .filter(|todo| todo.category == id)
                    .map(|todo| todo.id.clone())
                    .collect();

                for todo_id in orphans {
                    let result = self
                        .try_apply_update(state, &todo_id, TodoPatch::category(FALLBACK_CATEGORY))
                        .await;
                    if let Err(e) = &result {
                        record_failure(state, "update_todo", UPDATE_TODO_FAILED, e);
                    }
                    report.outcomes.push(Reassignment { todo_id, result });
                }

                let failed = report.failures().count();
                if failed > 0 {
                    warn!(category = id, failed, "some todos kept a deleted category");
                }
            }
            Err(e) => record_failure(state, "delete_category", DELETE_CATEGORY_FAILED, &e),
        }

        state.loading = false;
        report
    }

    async fn try_apply_update(
        &self,
        state: &mut TodoState,
        id: &str,
        patch: TodoPatch,
    ) -> Result<(), ApiError> {
        let patch = TodoPatch {
            created_at: None,
            updated_at: Some(self.clock.now()),
            ..patch
        };

        let updated = self.api.update_todo(id, &patch).await?;
        if let Some(slot) = state.todos.iter_mut().find(|todo| todo.id == id) {
            *slot = updated;
        }
        Ok(())
    }
}

fn record_failure(state: &mut TodoState, operation: &'static str, message: &str, error: &ApiError) {
    warn!(operation, error = %error, "{message}");
    state.error = Some(message.to_string());
}
