pub mod scoring;
pub mod select;
