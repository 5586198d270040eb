pub mod dir_key_source;
pub mod github_key_source;
