//! API access layer: one async call per entity/verb pair.
//!
//! Each call is a single build → execute → parse exchange. Failures are
//! logged with the operation name and handed back to the caller untouched.

use tracing::{debug, error};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Category, CategoryPatch, NewCategory, NewTodo, TodoItem, TodoPatch};

/// Typed todo/category operations over a `Transport`.
#[derive(Debug, Clone)]
pub struct TodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodoApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    pub async fn get_todos(&self) -> Result<Vec<TodoItem>, ApiError> {
        let result = async {
            let response = self.transport.execute(self.client.build_list_todos()).await?;
            self.client.parse_list_todos(response)
        }
        .await;
        logged("get_todos", result)
    }

    pub async fn create_todo(&self, todo: &NewTodo) -> Result<TodoItem, ApiError> {
        let result = async {
            let request = self.client.build_create_todo(todo)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_create_todo(response)
        }
        .await;
        logged("create_todo", result)
    }

    pub async fn update_todo(&self, id: &str, patch: &TodoPatch) -> Result<TodoItem, ApiError> {
        let result = async {
            let request = self.client.build_update_todo(id, patch)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_update_todo(response)
        }
        .await;
        logged("update_todo", result)
    }

    pub async fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
        let result = async {
            let response = self.transport.execute(self.client.build_delete_todo(id)).await?;
            self.client.parse_delete_todo(response)
        }
        .await;
        logged("delete_todo", result)
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let result = async {
            let response = self
                .transport
                .execute(self.client.build_list_categories())
                .await?;
            self.client.parse_list_categories(response)
        }
        .await;
        logged("get_categories", result)
    }

    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        let result = async {
            let request = self.client.build_create_category(category)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_create_category(response)
        }
        .await;
        logged("create_category", result)
    }

    pub async fn update_category(
        &self,
        id: &str,
        patch: &CategoryPatch,
    ) -> Result<Category, ApiError> {
        let result = async {
            let request = self.client.build_update_category(id, patch)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_update_category(response)
        }
        .await;
        logged("update_category", result)
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        let result = async {
            let response = self
                .transport
                .execute(self.client.build_delete_category(id))
                .await?;
            self.client.parse_delete_category(response)
        }
        .await;
        logged("delete_category", result)
    }
}

fn logged<R>(operation: &'static str, result: Result<R, ApiError>) -> Result<R, ApiError> {
    match &result {
        Ok(_) => debug!(operation, "remote operation succeeded"),
        Err(e) => error!(operation, error = %e, "remote operation failed"),
    }
    result
}
