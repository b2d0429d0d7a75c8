//! Game implementations.

pub mod pairs;
