//! Account API effect handlers
//!
//! Two implementations of the `AccountApiEffects` trait defined in
//! `atrio-core`: a production handler speaking HTTPS/JSON to the backend,
//! and a scripted mock for tests.

pub mod http;
pub mod mock;

pub use http::HttpAccountApi;
pub use mock::{CallCounts, MockAccountApi};
