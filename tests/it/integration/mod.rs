//! Integration tests for the diagram canvas core.
//!
//! These tests drive an `EditingSession` the way a host UI would and check
//! the combined effect on viewport, modes and drop zones.

mod drop_workflow_tests;
