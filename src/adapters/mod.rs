pub mod key_sources;
pub mod providers;
pub mod publishers;
