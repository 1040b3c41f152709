//! Inbound adapters that drive the [crate::domain::ports::ImportDispatcher]

pub mod lambda;
