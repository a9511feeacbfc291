//! Todo tracker library.
//!
//! Two components composed over HTTP: a REST API over a PostgreSQL
//! `todos` relation (`api` + `infrastructure`) and a terminal client
//! that mirrors server state (`client`).

pub mod api;
pub mod client;
pub mod domain;
pub mod infrastructure;
