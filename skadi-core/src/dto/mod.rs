//! Data Transfer Objects for requests sent to the skadi server
//!
//! These are the bodies of the one-shot operations (messages, job
//! enqueueing). The worker loop itself only needs the domain types.

pub mod job;
pub mod message;
