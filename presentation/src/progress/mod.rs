//! Progress reporting while a query cycle runs

pub mod reporter;
