use crate::Role;

/// Which clients a network supports, in preference order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub network: &'static str,
    pub execution: &'static [&'static str],
    pub consensus: &'static [&'static str],
    pub validator: &'static [&'static str],
    /// Consensus/validator pairs must come from the same family.
    pub families: &'static [&'static [&'static str]],
}

impl CatalogEntry {
    pub fn clients(&self, role: Role) -> &'static [&'static str] {
        match role {
            Role::Execution => self.execution,
            Role::Consensus => self.consensus,
            Role::Validator => self.validator,
        }
    }

    pub fn supports(&self, role: Role, client: &str) -> bool {
        self.clients(role).contains(&client)
    }

    pub fn preferred(&self, role: Role) -> Option<&'static str> {
        self.clients(role).first().copied()
    }

    pub fn family_of(&self, client: &str) -> Option<usize> {
        self.families.iter().position(|family| family.contains(&client))
    }

    pub fn compatible(&self, consensus: &str, validator: &str) -> bool {
        match (self.family_of(consensus), self.family_of(validator)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

const ETHEREUM_EXECUTION: &[&str] = &["geth", "nethermind", "besu", "erigon"];
const ETHEREUM_BEACON: &[&str] = &["lighthouse", "lodestar", "prysm", "teku"];
const GNOSIS_BEACON: &[&str] = &["lighthouse", "lodestar", "teku"];

// prysm validators talk gRPC to their own beacon node; everyone else uses the beacon REST API.
const BEACON_FAMILIES: &[&[&str]] = &[&["prysm"], &["lighthouse", "lodestar", "teku"]];

pub const MAINNET: CatalogEntry = CatalogEntry {
    network: "mainnet",
    execution: ETHEREUM_EXECUTION,
    consensus: ETHEREUM_BEACON,
    validator: ETHEREUM_BEACON,
    families: BEACON_FAMILIES,
};

pub const SEPOLIA: CatalogEntry = CatalogEntry {
    network: "sepolia",
    execution: ETHEREUM_EXECUTION,
    consensus: ETHEREUM_BEACON,
    validator: ETHEREUM_BEACON,
    families: BEACON_FAMILIES,
};

pub const HOLESKY: CatalogEntry = CatalogEntry {
    network: "holesky",
    execution: ETHEREUM_EXECUTION,
    consensus: ETHEREUM_BEACON,
    validator: ETHEREUM_BEACON,
    families: BEACON_FAMILIES,
};

pub const GNOSIS: CatalogEntry = CatalogEntry {
    network: "gnosis",
    execution: &["nethermind", "erigon"],
    consensus: GNOSIS_BEACON,
    validator: GNOSIS_BEACON,
    families: BEACON_FAMILIES,
};

pub const CHIADO: CatalogEntry = CatalogEntry {
    network: "chiado",
    execution: &["nethermind"],
    consensus: GNOSIS_BEACON,
    validator: GNOSIS_BEACON,
    families: BEACON_FAMILIES,
};

pub const CATALOG: &[CatalogEntry] = &[MAINNET, SEPOLIA, HOLESKY, GNOSIS, CHIADO];
