#![deny(warnings)]
// ports are only awaited inside this crate
#![allow(async_fn_in_trait)]

pub mod adapters;
pub mod app_config;
pub mod app_error;
pub mod commands;
pub mod database;
pub mod entities;
pub mod forms;
pub mod ports;
pub mod routes;
pub mod views;
pub mod walk_session;
