//! Tests for the interpreter
//!
//! Organized by feature area

mod binding_tests;
mod error_tests;
mod helpers;
mod stdlib_tests;
