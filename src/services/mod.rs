pub mod mosaic;
pub mod scoring;
pub mod visibility;
