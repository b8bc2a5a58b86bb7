//! A greeter web application: a form that asks for a name and greets it.

pub mod app;
pub mod core;
pub mod infra;
pub mod views;
