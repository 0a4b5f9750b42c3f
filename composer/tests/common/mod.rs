//! Shared helpers for composer integration tests

#![allow(dead_code)]

use catalog::BUILTIN;
use composer::*;

pub const FEE_RECIPIENT: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

/// Build a request from bare client names; `None` leaves the validator out
pub fn request(
    execution: &str,
    consensus: &str,
    validator: Option<&str>,
    mev_boost: bool,
) -> ClientRequest {
    ClientRequest {
        execution: RequestedClient::named(execution),
        consensus: RequestedClient::named(consensus),
        validator: validator.map(RequestedClient::named),
        mev_boost,
    }
}

/// Resolve against the built-in registry, panicking on failure
pub fn select(
    network: &str,
    execution: &str,
    consensus: &str,
    validator: Option<&str>,
    mev_boost: bool,
) -> ClientSelection {
    resolve(&BUILTIN, network, &request(execution, consensus, validator, mev_boost))
        .unwrap_or_else(|e| panic!("{network}/{execution}/{consensus}/{validator:?}: {e}"))
}

/// Options for `network` with MEV switched as requested
pub fn options(network: &str, mev_enabled: bool) -> GenerationOptions {
    GenerationOptions {
        network: network.to_string(),
        mev_enabled,
        ..GenerationOptions::default()
    }
}

/// Parse a cleaned `.env` text into key/value pairs, skipping comments
pub fn env_pairs(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn env_value(text: &str, key: &str) -> Option<String> {
    env_pairs(text).into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
}
