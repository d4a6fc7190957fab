//! Remote file fetching adapters.

mod http_fetcher;

pub use http_fetcher::HttpFileFetcher;
