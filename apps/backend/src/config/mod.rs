//! Process configuration. Database settings live in `db-infra` so the
//! migration CLI resolves them identically.

pub mod app;

pub use db_infra::config::db;
