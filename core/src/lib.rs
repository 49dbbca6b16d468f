//! Client-side data layer for the todo service.
//!
//! # Overview
//! Two layers, composed top-down:
//! - The API access layer (`client` + `transport` + `api`) turns typed
//!   todo/category operations into HTTP exchanges against a fixed base URL.
//! - The state layer (`state` + `store`) owns the in-memory collections,
//!   applies remote results locally and derives filtered views and counts.
//!
//! # Design
//! - `TodoClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`, so the I/O boundary is explicit.
//! - `Transport` is the only I/O seam; tests plug in scripted transports.
//! - `TodoStore` borrows `&mut TodoState` per operation (single writer) and
//!   reports failures through `TodoState::error` rather than `Result`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod state;
pub mod store;
pub mod transport;
pub mod types;

pub use api::TodoApi;
pub use client::TodoClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ApiConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{filter_todos, todo_stats, TodoState};
pub use store::{Reassignment, ReassignmentReport, TodoStore};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    Category, CategoryPatch, Filter, NewCategory, NewTodo, ParseFilterError, TodoDraft, TodoItem,
    TodoPatch, TodoStats, ALL_CATEGORIES, FALLBACK_CATEGORY,
};
