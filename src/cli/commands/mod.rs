pub mod init;
pub mod plan;
pub mod render;
pub mod service_helpers;
pub mod status;
pub mod sync;
