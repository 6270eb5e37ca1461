//! Unit tests for individual components

mod builders_test;
mod classification_test;
mod config_test;
mod history_test;
mod runtime_test;
mod traffic_test;
