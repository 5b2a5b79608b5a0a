#![doc = "The `jobboard` library crate."]
#![doc = ""]
#![doc = "Job listing search, filtering, facet aggregation and admin job management"]
#![doc = "for the job board backend. The binary (`main.rs`) wires these pieces into"]
#![doc = "an actix-web server backed by Postgres."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
