//! Skadi Core
//!
//! Core types shared by the skadi agent crates.
//!
//! This crate contains:
//! - Domain types: the job handed out by the server and the result sent back
//! - DTOs: request bodies for messages and job enqueueing
//! - Duration formatting understood by the skadi server

pub mod domain;
pub mod dto;
pub mod duration;
