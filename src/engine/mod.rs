pub mod progression;
pub mod scoring;
