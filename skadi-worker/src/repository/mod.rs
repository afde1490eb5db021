//! Repository layer
//!
//! The worker loop talks to the server only through the [`JobRepository`]
//! trait. [`AgentClient`](skadi_client::AgentClient) is the HTTP
//! implementation; tests substitute in-memory fakes.

mod jobs;

pub use jobs::JobRepository;
