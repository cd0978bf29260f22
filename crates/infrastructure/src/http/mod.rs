mod dispatcher_fetcher;
mod driver_fetcher;
mod token_provider;

pub use dispatcher_fetcher::HttpDispatcherFetcher;
pub use driver_fetcher::HttpDriverFetcher;
pub use token_provider::HttpTokenProvider;

use fleet_sync_domain::ApiToken;

/// Bearer scheme the fleet API expects on every authenticated call.
pub(crate) fn bearer_header(token: &ApiToken) -> String {
    format!("Ditat-Token {}", token.as_str())
}
