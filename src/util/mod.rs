pub mod finite;

pub use finite::{finite, mean};
