//! In-memory stand-in for the todo/category REST service.
//!
//! Speaks the same JSON as the real backend: camelCase keys, string ids,
//! ISO-8601 timestamps, PATCH for partial updates. Collections keep insertion
//! order. Todo → category references are not checked, so deleting a category
//! leaves its todos pointing at a missing id.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub category: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub category: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
}

#[derive(Debug, Default)]
pub struct Tables {
    pub todos: Vec<Todo>,
    pub categories: Vec<Category>,
}

impl Tables {
    /// The categories a fresh backend ships with.
    pub fn seeded() -> Self {
        let category = |id: &str, name: &str| Category {
            id: id.to_string(),
            name: name.to_string(),
        };
        Self {
            todos: Vec::new(),
            categories: vec![category("personal", "Personal"), category("work", "Work")],
        }
    }
}

pub type Db = Arc<RwLock<Tables>>;

pub fn app() -> Router {
    app_with(Tables::seeded())
}

pub fn app_with(tables: Tables) -> Router {
    let db: Db = Arc::new(RwLock::new(tables));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(update_todo).delete(delete_todo))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            patch(update_category).delete(delete_category),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.todos.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let now = Utc::now();
    let todo = Todo {
        id: new_id(),
        title: input.title,
        completed: input.completed,
        category: input.category,
        created_at: input.created_at.unwrap_or(now),
        updated_at: input.updated_at.unwrap_or(now),
    };
    db.write().await.todos.push(todo.clone());
    tracing::debug!(id = %todo.id, "todo created");
    (StatusCode::CREATED, Json(todo))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut tables = db.write().await;
    let todo = tables
        .todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    if let Some(category) = input.category {
        todo.category = category;
    }
    if let Some(created_at) = input.created_at {
        todo.created_at = created_at;
    }
    if let Some(updated_at) = input.updated_at {
        todo.updated_at = updated_at;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut tables = db.write().await;
    match tables.todos.iter().position(|t| t.id == id) {
        Some(index) => {
            tables.todos.remove(index);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    Json(db.read().await.categories.clone())
}

async fn create_category(
    State(db): State<Db>,
    Json(input): Json<CreateCategory>,
) -> (StatusCode, Json<Category>) {
    let category = Category {
        id: new_id(),
        name: input.name,
    };
    db.write().await.categories.push(category.clone());
    tracing::debug!(id = %category.id, "category created");
    (StatusCode::CREATED, Json(category))
}

async fn update_category(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCategory>,
) -> Result<Json<Category>, StatusCode> {
    let mut tables = db.write().await;
    let category = tables
        .categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        category.name = name;
    }
    Ok(Json(category.clone()))
}

async fn delete_category(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut tables = db.write().await;
    match tables.categories.iter().position(|c| c.id == id) {
        Some(index) => {
            tables.categories.remove(index);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
