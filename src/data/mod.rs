pub mod batch;
pub mod preprocessing;
