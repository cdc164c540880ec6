pub mod request_reader;
pub mod summary_writer;
