//! Database dialect implementations

pub mod postgres;
