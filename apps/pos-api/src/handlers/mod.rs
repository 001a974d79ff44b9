//! Request handlers, one module per resource.

pub mod auth;
pub mod bills;
pub mod customers;
pub mod health;
pub mod items;
pub mod users;
