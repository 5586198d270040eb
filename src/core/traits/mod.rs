pub mod applier;
pub mod key_source;
pub mod provider_inventory;
pub mod publisher;
