pub mod auth;
pub mod config;
pub mod controllers;
pub mod error;
pub mod extract;
pub mod forms;
pub mod routes;
pub mod state;
pub mod views;
