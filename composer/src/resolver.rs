//! Combination validation.
//!
//! `resolve` is the only place that decides whether a client triple can be
//! deployed, and the only place that rewrites the operator's wishes. Every
//! downgrade it applies is recorded on the returned selection so that the
//! composer never has to second-guess it.

use catalog::{CatalogEntry, Registry, Role};

use crate::error::{Error, Result};
use crate::types::{ClientRequest, ClientSelection, ClientSpec, Downgrade, RequestedClient};

pub fn resolve(
    registry: &Registry,
    network: &str,
    request: &ClientRequest,
) -> Result<ClientSelection> {
    let profile = registry
        .network(network)
        .ok_or_else(|| Error::UnsupportedNetwork {
            network: network.to_string(),
        })?;
    let entry = registry
        .entry(network)
        .ok_or_else(|| Error::MissingCatalogEntry {
            network: network.to_string(),
        })?;

    let execution = pick(entry, Role::Execution, &request.execution)?;
    let consensus = pick(entry, Role::Consensus, &request.consensus)?;
    let validator = match &request.validator {
        Some(requested) => pick(entry, Role::Validator, requested)?,
        None => ClientSpec::omitted(Role::Validator),
    };

    if !validator.omitted && !entry.compatible(&consensus.name, &validator.name) {
        return Err(Error::IncompatiblePair {
            consensus: consensus.name,
            validator: validator.name,
            network: network.to_string(),
        });
    }

    let mut downgrades = Vec::new();
    let mut mev_boost = request.mev_boost;
    if mev_boost && validator.omitted {
        mev_boost = false;
        downgrades.push(Downgrade::MevWithoutValidator);
    }
    if mev_boost && !profile.supports_mev() {
        mev_boost = false;
        downgrades.push(Downgrade::MevUnsupportedOnNetwork);
    }

    Ok(ClientSelection {
        network: profile.name.to_string(),
        execution,
        consensus,
        validator,
        mev_boost,
        downgrades,
    })
}

/// An empty name falls back to the network's preferred client for the role.
fn pick(entry: &CatalogEntry, role: Role, requested: &RequestedClient) -> Result<ClientSpec> {
    let name = if requested.name.is_empty() {
        entry.preferred(role).unwrap_or_default()
    } else {
        requested.name.as_str()
    };

    if !entry.supports(role, name) {
        return Err(Error::UnsupportedClient {
            role,
            client: name.to_string(),
            network: entry.network.to_string(),
        });
    }

    Ok(ClientSpec::new(role, name, requested.image.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::BUILTIN;

    fn request(execution: &str, consensus: &str, validator: Option<&str>) -> ClientRequest {
        ClientRequest {
            execution: RequestedClient::named(execution),
            consensus: RequestedClient::named(consensus),
            validator: validator.map(RequestedClient::named),
            mev_boost: true,
        }
    }

    #[test]
    fn empty_names_take_the_preferred_client() {
        let selection = resolve(&BUILTIN, "gnosis", &request("", "", Some(""))).unwrap();
        assert_eq!(selection.execution.name, "nethermind");
        assert_eq!(selection.consensus.name, "lighthouse");
        assert_eq!(selection.validator.name, "lighthouse");
    }

    #[test]
    fn downgrades_are_recorded_once_each() {
        let selection = resolve(&BUILTIN, "gnosis", &request("nethermind", "teku", None)).unwrap();
        assert!(!selection.mev_boost);
        assert_eq!(selection.downgrades, vec![Downgrade::MevWithoutValidator]);

        let selection =
            resolve(&BUILTIN, "gnosis", &request("nethermind", "teku", Some("teku"))).unwrap();
        assert!(!selection.mev_boost);
        assert_eq!(selection.downgrades, vec![Downgrade::MevUnsupportedOnNetwork]);
    }

    #[test]
    fn images_are_carried_through() {
        let mut req = request("geth", "lighthouse", Some("lighthouse"));
        req.execution = req.execution.with_image("ethereum/client-go:latest");
        let selection = resolve(&BUILTIN, "mainnet", &req).unwrap();
        assert_eq!(selection.execution.image.as_deref(), Some("ethereum/client-go:latest"));
        assert!(selection.has_custom_images());
    }
}
