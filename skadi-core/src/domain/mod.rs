//! Core domain types
//!
//! The records exchanged with the skadi server while a worker is running.
//! A job is created by the server and is read-only to the agent; a result is
//! built fresh for every report and never stored.

pub mod job;
