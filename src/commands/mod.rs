pub mod fetch;
pub mod start;
