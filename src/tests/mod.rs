//! Integration-level test suites for the full pipeline

mod pipeline_tests;
mod property_tests;
