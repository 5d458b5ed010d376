//! Unit tests for the diagram canvas core.

mod feedback_tests;
mod mode_tests;
