//! IO layer: everything that speaks to the outside world.

pub mod rest;

pub use rest::*;
