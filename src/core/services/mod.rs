pub mod reconciler;
pub mod sync_service;
pub mod template_generator;
