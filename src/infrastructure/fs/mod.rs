//! File system helpers shared by the concrete adapters

mod local;

pub use local::LocalFs;
