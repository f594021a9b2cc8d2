pub mod federation_client;
pub mod models;
pub mod parsers;

pub use federation_client::FederationClient;
