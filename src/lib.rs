pub mod aggregate;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod recovery;
pub mod server;
pub mod table;
