// Library target exists for the benchmarks and integration tests.
// The binary entry point is main.rs; this file re-declares the module tree so
// that harnesses can import types via `vocab_trainer::trainer::*` /
// `vocab_trainer::store::*`.
// Most UI code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by benchmarks and tests/
pub mod config;
pub mod store;
pub mod trainer;

// Private: required transitively by the app layer
mod app;
mod event;
mod logging;
mod speech;
mod ui;
