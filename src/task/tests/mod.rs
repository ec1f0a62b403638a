//! Unit tests for the task module.

mod admission_tests;
mod support;
