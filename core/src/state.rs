//! In-memory todo/category state and the views derived from it.
//!
//! # Design
//! `TodoState` is a plain owned struct. Only [`TodoStore`](crate::TodoStore)
//! operations and the synchronous setters below mutate it. Derived views are
//! pure functions of the state recomputed on every call; there is no cache
//! to invalidate.

use crate::types::{Category, Filter, TodoItem, TodoStats, ALL_CATEGORIES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoState {
    /// Newest first once `add_todo` has run; server order after `load_data`.
    pub todos: Vec<TodoItem>,
    pub categories: Vec<Category>,
    pub filter: Filter,
    /// A category id, or [`ALL_CATEGORIES`].
    pub selected_category: String,
    pub search_query: String,
    pub loading: bool,
    /// Message from the last failed operation. Persists until `load_data`
    /// clears it.
    pub error: Option<String>,
}

impl Default for TodoState {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            categories: Vec::new(),
            filter: Filter::All,
            selected_category: ALL_CATEGORIES.to_string(),
            search_query: String::new(),
            loading: false,
            error: None,
        }
    }
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_selected_category(&mut self, category_id: impl Into<String>) {
        self.selected_category = category_id.into();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn todo(&self, id: &str) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn filtered_todos(&self) -> Vec<&TodoItem> {
        filter_todos(
            &self.todos,
            self.filter,
            &self.selected_category,
            &self.search_query,
        )
    }

    pub fn stats(&self) -> TodoStats {
        todo_stats(&self.todos)
    }
}

/// Apply, in order: completion filter, category selection, title search.
///
/// The search is a case-insensitive substring match; an empty query keeps
/// everything. Relative order of `todos` is preserved.
pub fn filter_todos<'a>(
    todos: &'a [TodoItem],
    filter: Filter,
    selected_category: &str,
    search_query: &str,
) -> Vec<&'a TodoItem> {
    let needle = search_query.to_lowercase();
    todos
        .iter()
        .filter(|todo| match filter {
            Filter::All => true,
            Filter::Completed => todo.completed,
            Filter::Pending => !todo.completed,
        })
        .filter(|todo| selected_category == ALL_CATEGORIES || todo.category == selected_category)
        .filter(|todo| needle.is_empty() || todo.title.to_lowercase().contains(&needle))
        .collect()
}

/// Counts over the full collection, independent of any active filter.
pub fn todo_stats(todos: &[TodoItem]) -> TodoStats {
    let completed = todos.iter().filter(|todo| todo.completed).count();
    TodoStats {
        total: todos.len(),
        completed,
        pending: todos.len() - completed,
    }
}
