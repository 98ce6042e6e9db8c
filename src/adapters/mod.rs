// Adapters layer: concrete implementations of the domain ports.

pub mod google_search;

pub use google_search::GoogleSearchClient;
