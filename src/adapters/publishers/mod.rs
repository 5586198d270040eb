pub mod file_publisher;
