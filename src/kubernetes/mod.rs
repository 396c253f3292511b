mod client;

pub use client::ClusterClient;
