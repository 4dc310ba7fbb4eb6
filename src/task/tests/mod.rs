//! Unit tests for the task module.

mod field_tests;
