//! Rendering for `tickerbot check`.

use std::path::Path;

use super::output;

/// Print a validated configuration.
///
/// `settings` are `(name, value)` rows, already free of secrets.
pub fn print_config(path: &Path, settings: &[(&str, String)], token_present: bool) {
    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Settings");
    for (name, value) in settings {
        output::field(name, value);
    }

    if token_present {
        output::success("Telegram bot token detected");
    } else {
        output::warning("TELEGRAM_BOT_TOKEN is not set (required for bot and standalone modes)");
    }
}

/// Print the outcome of loading trading pairs from an exchange.
pub fn print_exchange(exchange: &str, api_url: &str, quote: &str, pairs: usize) {
    output::section("Exchange Check");
    output::field("Exchange", exchange);
    output::field("API", api_url);
    output::field("Quote asset", quote);
    output::field("Trading pairs", pairs);

    if pairs == 0 {
        output::warning("Exchange returned no trading pairs for this quote asset");
        output::hint("check exchange.quote_asset in the configuration");
    } else {
        output::success("Exchange reachable");
    }
}
