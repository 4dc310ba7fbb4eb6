//! Unit tests for the taxonomy module.

mod dimension_tests;
