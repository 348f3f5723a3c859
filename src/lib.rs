//! Planboard - Personal productivity backend
//!
//! Authenticated users keep tasks, goals, reminders and habits behind a
//! small JSON API. One set of generic CRUD handlers serves all four item
//! kinds; accounts use bcrypt passwords and server-side cookie sessions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
