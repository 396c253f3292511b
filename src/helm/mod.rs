mod client;

pub use client::{HelmClient, ReleaseListEntry};
