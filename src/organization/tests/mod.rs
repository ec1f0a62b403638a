//! Unit tests for the organization module.
