pub mod client;

pub use client::ChainClient;
