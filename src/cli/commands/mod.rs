pub mod ingest;
pub mod initdb;
pub mod serve;

pub use ingest::run_ingestion;
pub use initdb::init_database;
pub use serve::serve;
