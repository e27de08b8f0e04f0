pub mod bench;
pub mod stats;
