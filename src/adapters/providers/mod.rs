pub mod file_provider;
