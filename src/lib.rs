// src/lib.rs
// Classroom - simulated students reacting to a teacher's explanations

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod simulation;

pub use error::{BackendError, ClassroomError, Result};
