//! The import dispatcher domain: what a notification turns into and the ports it needs

pub mod models;
pub mod ports;
pub mod services;
