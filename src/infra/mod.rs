pub mod csv_writer;
pub mod forge_client;
