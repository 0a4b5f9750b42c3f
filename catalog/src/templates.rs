//! Per-client deployment fragments.
//!
//! Every string here is passed to the container runtime as-is. `${VAR}`
//! references resolve against the generated environment file at deploy time,
//! so a template only has to agree with the composer on variable names.

use crate::Role;

/// Where the shared authentication token is mounted inside containers.
pub const AUTH_TOKEN_MOUNT: &str = "/tmp/jwt/jwtsecret";

/// Where the validator keystore directory is mounted inside containers.
pub const KEYSTORE_MOUNT: &str = "/keystore";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        }
    }
}

/// How far a container port is published on the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Exposure {
    /// Peer-to-peer traffic; always published on every interface.
    P2p,
    /// Client API; always published on loopback, on every interface with map-all.
    Api,
    /// Only reachable from sibling services unless map-all is requested.
    Internal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortSpec {
    pub name: &'static str,
    pub env: &'static str,
    pub port: u16,
    pub protocol: Protocol,
    pub exposure: Exposure,
}

const fn tcp(name: &'static str, env: &'static str, port: u16, exposure: Exposure) -> PortSpec {
    PortSpec { name, env, port, protocol: Protocol::Tcp, exposure }
}

const fn udp(name: &'static str, env: &'static str, port: u16) -> PortSpec {
    PortSpec { name, env, port, protocol: Protocol::Udp, exposure: Exposure::P2p }
}

/// Arguments a client needs for each optional feature. An empty slice means
/// the client has no way to express the feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemplateFlags {
    pub auth_token: &'static [&'static str],
    pub bootnodes: &'static [&'static str],
    pub checkpoint_sync: &'static [&'static str],
    pub fee_recipient: &'static [&'static str],
    pub graffiti: &'static [&'static str],
    pub mev: &'static [&'static str],
    /// Link to the role this client depends on (execution for consensus,
    /// consensus for validator).
    pub upstream: &'static [&'static str],
    /// Replaces `upstream` when fallback execution endpoints are configured.
    pub fallback_execution: &'static [&'static str],
}

impl TemplateFlags {
    pub const NONE: TemplateFlags = TemplateFlags {
        auth_token: &[],
        bootnodes: &[],
        checkpoint_sync: &[],
        fee_recipient: &[],
        graffiti: &[],
        mev: &[],
        upstream: &[],
        fallback_execution: &[],
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientTemplate {
    pub role: Role,
    pub client: &'static str,
    pub image: &'static str,
    pub data_dir: &'static str,
    pub command: &'static [&'static str],
    pub ports: &'static [PortSpec],
    pub flags: TemplateFlags,
    /// Address sibling services use to reach this client.
    pub internal_url: Option<&'static str>,
    /// Key import invocation; empty when the client reads keystores directly.
    pub import_command: &'static [&'static str],
}

impl ClientTemplate {
    pub fn port(&self, name: &str) -> Option<&PortSpec> {
        self.ports.iter().find(|p| p.name == name)
    }
}

pub const GETH: ClientTemplate = ClientTemplate {
    role: Role::Execution,
    client: "geth",
    image: "ethereum/client-go:v1.13.14",
    data_dir: "/data",
    command: &[
        "--${NETWORK}",
        "--datadir=${EC_DATA_DIR}",
        "--http",
        "--http.addr=0.0.0.0",
        "--http.port=${EC_API_PORT}",
        "--http.vhosts=*",
        "--http.api=eth,net,web3",
        "--authrpc.addr=0.0.0.0",
        "--authrpc.port=${EC_AUTH_PORT}",
        "--authrpc.vhosts=*",
        "--port=${EC_DISCOVERY_PORT}",
        "--metrics",
        "--metrics.addr=0.0.0.0",
        "--metrics.port=${EC_METRICS_PORT}",
    ],
    ports: &[
        tcp("api", "EC_API_PORT", 8545, Exposure::Api),
        tcp("auth", "EC_AUTH_PORT", 8551, Exposure::Internal),
        tcp("metrics", "EC_METRICS_PORT", 6060, Exposure::Internal),
        tcp("p2p", "EC_DISCOVERY_PORT", 30303, Exposure::P2p),
        udp("discovery", "EC_DISCOVERY_PORT", 30303),
    ],
    flags: TemplateFlags {
        auth_token: &["--authrpc.jwtsecret=/tmp/jwt/jwtsecret"],
        bootnodes: &["--bootnodes=${EC_BOOTNODES}"],
        ..TemplateFlags::NONE
    },
    internal_url: Some("http://execution:8551"),
    import_command: &[],
};

pub const NETHERMIND: ClientTemplate = ClientTemplate {
    role: Role::Execution,
    client: "nethermind",
    image: "nethermind/nethermind:1.25.4",
    data_dir: "/nethermind/data",
    command: &[
        "--config=${NETWORK}",
        "--datadir=${EC_DATA_DIR}",
        "--JsonRpc.Enabled=true",
        "--JsonRpc.Host=0.0.0.0",
        "--JsonRpc.Port=${EC_API_PORT}",
        "--JsonRpc.EngineHost=0.0.0.0",
        "--JsonRpc.EnginePort=${EC_AUTH_PORT}",
        "--Network.DiscoveryPort=${EC_DISCOVERY_PORT}",
        "--Network.P2PPort=${EC_DISCOVERY_PORT}",
        "--Metrics.Enabled=true",
        "--Metrics.ExposePort=${EC_METRICS_PORT}",
        "--Sync.SnapSync=true",
        "--HealthChecks.Enabled=true",
    ],
    ports: &[
        tcp("api", "EC_API_PORT", 8545, Exposure::Api),
        tcp("auth", "EC_AUTH_PORT", 8551, Exposure::Internal),
        tcp("metrics", "EC_METRICS_PORT", 8018, Exposure::Internal),
        tcp("p2p", "EC_DISCOVERY_PORT", 30303, Exposure::P2p),
        udp("discovery", "EC_DISCOVERY_PORT", 30303),
    ],
    flags: TemplateFlags {
        auth_token: &["--JsonRpc.JwtSecretFile=/tmp/jwt/jwtsecret"],
        bootnodes: &["--Discovery.Bootnodes=${EC_BOOTNODES}"],
        ..TemplateFlags::NONE
    },
    internal_url: Some("http://execution:8551"),
    import_command: &[],
};

pub const BESU: ClientTemplate = ClientTemplate {
    role: Role::Execution,
    client: "besu",
    image: "hyperledger/besu:24.1.2",
    data_dir: "/var/lib/besu/data",
    command: &[
        "--network=${NETWORK}",
        "--data-path=${EC_DATA_DIR}",
        "--rpc-http-enabled=true",
        "--rpc-http-host=0.0.0.0",
        "--rpc-http-port=${EC_API_PORT}",
        "--host-allowlist=*",
        "--engine-rpc-port=${EC_AUTH_PORT}",
        "--engine-host-allowlist=*",
        "--p2p-port=${EC_DISCOVERY_PORT}",
        "--metrics-enabled=true",
        "--metrics-host=0.0.0.0",
        "--metrics-port=${EC_METRICS_PORT}",
        "--sync-mode=X_SNAP",
        "--data-storage-format=BONSAI",
    ],
    ports: &[
        tcp("api", "EC_API_PORT", 8545, Exposure::Api),
        tcp("auth", "EC_AUTH_PORT", 8551, Exposure::Internal),
        tcp("metrics", "EC_METRICS_PORT", 9545, Exposure::Internal),
        tcp("p2p", "EC_DISCOVERY_PORT", 30303, Exposure::P2p),
        udp("discovery", "EC_DISCOVERY_PORT", 30303),
    ],
    flags: TemplateFlags {
        auth_token: &["--engine-jwt-secret=/tmp/jwt/jwtsecret"],
        bootnodes: &["--bootnodes=${EC_BOOTNODES}"],
        ..TemplateFlags::NONE
    },
    internal_url: Some("http://execution:8551"),
    import_command: &[],
};

pub const ERIGON: ClientTemplate = ClientTemplate {
    role: Role::Execution,
    client: "erigon",
    image: "thorax/erigon:v2.58.1",
    data_dir: "/home/erigon/.local/share/erigon",
    command: &[
        "--chain=${NETWORK}",
        "--datadir=${EC_DATA_DIR}",
        "--http",
        "--http.addr=0.0.0.0",
        "--http.port=${EC_API_PORT}",
        "--http.vhosts=*",
        "--http.api=eth,erigon,engine,web3,net",
        "--authrpc.addr=0.0.0.0",
        "--authrpc.port=${EC_AUTH_PORT}",
        "--authrpc.vhosts=*",
        "--port=${EC_DISCOVERY_PORT}",
        "--metrics",
        "--metrics.addr=0.0.0.0",
        "--metrics.port=${EC_METRICS_PORT}",
    ],
    ports: &[
        tcp("api", "EC_API_PORT", 8545, Exposure::Api),
        tcp("auth", "EC_AUTH_PORT", 8551, Exposure::Internal),
        tcp("metrics", "EC_METRICS_PORT", 6060, Exposure::Internal),
        tcp("p2p", "EC_DISCOVERY_PORT", 30303, Exposure::P2p),
        udp("discovery", "EC_DISCOVERY_PORT", 30303),
    ],
    flags: TemplateFlags {
        auth_token: &["--authrpc.jwtsecret=/tmp/jwt/jwtsecret"],
        bootnodes: &["--bootnodes=${EC_BOOTNODES}"],
        ..TemplateFlags::NONE
    },
    internal_url: Some("http://execution:8551"),
    import_command: &[],
};

pub const LIGHTHOUSE_BEACON: ClientTemplate = ClientTemplate {
    role: Role::Consensus,
    client: "lighthouse",
    image: "sigp/lighthouse:v5.0.0",
    data_dir: "/var/lib/lighthouse",
    command: &[
        "lighthouse",
        "bn",
        "--network=${NETWORK}",
        "--datadir=${CC_DATA_DIR}",
        "--http",
        "--http-address=0.0.0.0",
        "--http-port=${CC_API_PORT}",
        "--port=${CC_DISCOVERY_PORT}",
        "--metrics",
        "--metrics-address=0.0.0.0",
        "--metrics-port=${CC_METRICS_PORT}",
        "--disable-deposit-contract-sync",
    ],
    ports: &[
        tcp("api", "CC_API_PORT", 5052, Exposure::Api),
        tcp("metrics", "CC_METRICS_PORT", 5054, Exposure::Internal),
        tcp("p2p", "CC_DISCOVERY_PORT", 9000, Exposure::P2p),
        udp("discovery", "CC_DISCOVERY_PORT", 9000),
    ],
    flags: TemplateFlags {
        auth_token: &["--execution-jwt=/tmp/jwt/jwtsecret"],
        bootnodes: &["--boot-nodes=${CC_BOOTNODES}"],
        checkpoint_sync: &["--checkpoint-sync-url=${CHECKPOINT_SYNC_URL}"],
        fee_recipient: &["--suggested-fee-recipient=${FEE_RECIPIENT}"],
        graffiti: &[],
        mev: &["--builder=http://mev-boost:${MEV_PORT}"],
        upstream: &["--execution-endpoint=${EC_AUTH_URL}"],
        fallback_execution: &["--execution-endpoints=${EC_AUTH_URL},${CC_FALLBACK_EXECUTION_URLS}"],
    },
    internal_url: Some("http://consensus:5052"),
    import_command: &[],
};

pub const LODESTAR_BEACON: ClientTemplate = ClientTemplate {
    role: Role::Consensus,
    client: "lodestar",
    image: "chainsafe/lodestar:v1.16.0",
    data_dir: "/var/lib/lodestar/consensus",
    command: &[
        "beacon",
        "--network=${NETWORK}",
        "--dataDir=${CC_DATA_DIR}",
        "--rest",
        "--rest.address=0.0.0.0",
        "--rest.port=${CC_API_PORT}",
        "--port=${CC_DISCOVERY_PORT}",
        "--metrics",
        "--metrics.address=0.0.0.0",
        "--metrics.port=${CC_METRICS_PORT}",
    ],
    ports: &[
        tcp("api", "CC_API_PORT", 9596, Exposure::Api),
        tcp("metrics", "CC_METRICS_PORT", 8008, Exposure::Internal),
        tcp("p2p", "CC_DISCOVERY_PORT", 9000, Exposure::P2p),
        udp("discovery", "CC_DISCOVERY_PORT", 9000),
    ],
    flags: TemplateFlags {
        auth_token: &["--jwt-secret=/tmp/jwt/jwtsecret"],
        bootnodes: &["--bootnodes=${CC_BOOTNODES}"],
        checkpoint_sync: &["--checkpointSyncUrl=${CHECKPOINT_SYNC_URL}"],
        fee_recipient: &["--suggestedFeeRecipient=${FEE_RECIPIENT}"],
        graffiti: &[],
        mev: &["--builder", "--builder.urls=http://mev-boost:${MEV_PORT}"],
        upstream: &["--execution.urls=${EC_AUTH_URL}"],
        fallback_execution: &["--execution.urls=${EC_AUTH_URL},${CC_FALLBACK_EXECUTION_URLS}"],
    },
    internal_url: Some("http://consensus:9596"),
    import_command: &[],
};

pub const PRYSM_BEACON: ClientTemplate = ClientTemplate {
    role: Role::Consensus,
    client: "prysm",
    image: "gcr.io/prysmaticlabs/prysm/beacon-chain:v5.0.0",
    data_dir: "/var/lib/prysm",
    command: &[
        "--${NETWORK}",
        "--datadir=${CC_DATA_DIR}",
        "--rpc-host=0.0.0.0",
        "--rpc-port=${CC_GRPC_PORT}",
        "--grpc-gateway-host=0.0.0.0",
        "--grpc-gateway-port=${CC_API_PORT}",
        "--p2p-tcp-port=${CC_DISCOVERY_PORT}",
        "--p2p-udp-port=${CC_DISCOVERY_UDP_PORT}",
        "--monitoring-host=0.0.0.0",
        "--monitoring-port=${CC_METRICS_PORT}",
        "--accept-terms-of-use",
    ],
    ports: &[
        tcp("api", "CC_API_PORT", 3500, Exposure::Api),
        tcp("grpc", "CC_GRPC_PORT", 4000, Exposure::Internal),
        tcp("metrics", "CC_METRICS_PORT", 8080, Exposure::Internal),
        tcp("p2p", "CC_DISCOVERY_PORT", 13000, Exposure::P2p),
        udp("discovery", "CC_DISCOVERY_UDP_PORT", 12000),
    ],
    flags: TemplateFlags {
        auth_token: &["--jwt-secret=/tmp/jwt/jwtsecret"],
        bootnodes: &["--bootstrap-node=${CC_BOOTNODES}"],
        checkpoint_sync: &[
            "--checkpoint-sync-url=${CHECKPOINT_SYNC_URL}",
            "--genesis-beacon-api-url=${CHECKPOINT_SYNC_URL}",
        ],
        fee_recipient: &["--suggested-fee-recipient=${FEE_RECIPIENT}"],
        graffiti: &[],
        mev: &["--http-mev-relay=http://mev-boost:${MEV_PORT}"],
        upstream: &["--execution-endpoint=${EC_AUTH_URL}"],
        fallback_execution: &[],
    },
    // The prysm validator speaks gRPC, not the beacon REST API.
    internal_url: Some("consensus:4000"),
    import_command: &[],
};

pub const TEKU_BEACON: ClientTemplate = ClientTemplate {
    role: Role::Consensus,
    client: "teku",
    image: "consensys/teku:24.2.0",
    data_dir: "/var/lib/teku",
    command: &[
        "--network=${NETWORK}",
        "--data-path=${CC_DATA_DIR}",
        "--rest-api-enabled=true",
        "--rest-api-interface=0.0.0.0",
        "--rest-api-port=${CC_API_PORT}",
        "--rest-api-host-allowlist=*",
        "--p2p-port=${CC_DISCOVERY_PORT}",
        "--metrics-enabled=true",
        "--metrics-interface=0.0.0.0",
        "--metrics-port=${CC_METRICS_PORT}",
        "--metrics-host-allowlist=*",
    ],
    ports: &[
        tcp("api", "CC_API_PORT", 5051, Exposure::Api),
        tcp("metrics", "CC_METRICS_PORT", 8008, Exposure::Internal),
        tcp("p2p", "CC_DISCOVERY_PORT", 9000, Exposure::P2p),
        udp("discovery", "CC_DISCOVERY_PORT", 9000),
    ],
    flags: TemplateFlags {
        auth_token: &["--ee-jwt-secret-file=/tmp/jwt/jwtsecret"],
        bootnodes: &["--p2p-discovery-bootnodes=${CC_BOOTNODES}"],
        checkpoint_sync: &["--checkpoint-sync-url=${CHECKPOINT_SYNC_URL}"],
        fee_recipient: &["--validators-proposer-default-fee-recipient=${FEE_RECIPIENT}"],
        graffiti: &[],
        mev: &["--builder-endpoint=http://mev-boost:${MEV_PORT}"],
        upstream: &["--ee-endpoint=${EC_AUTH_URL}"],
        fallback_execution: &[],
    },
    internal_url: Some("http://consensus:5051"),
    import_command: &[],
};

pub const LIGHTHOUSE_VALIDATOR: ClientTemplate = ClientTemplate {
    role: Role::Validator,
    client: "lighthouse",
    image: "sigp/lighthouse:v5.0.0",
    data_dir: "/var/lib/lighthouse-validator",
    command: &[
        "lighthouse",
        "vc",
        "--network=${NETWORK}",
        "--datadir=${VL_DATA_DIR}",
        "--init-slashing-protection",
        "--metrics",
        "--metrics-address=0.0.0.0",
        "--metrics-port=${VL_METRICS_PORT}",
    ],
    ports: &[tcp("metrics", "VL_METRICS_PORT", 5064, Exposure::Internal)],
    flags: TemplateFlags {
        fee_recipient: &["--suggested-fee-recipient=${FEE_RECIPIENT}"],
        graffiti: &["--graffiti=${VL_GRAFFITI}"],
        mev: &["--builder-proposals"],
        upstream: &["--beacon-nodes=${CC_API_URL}"],
        ..TemplateFlags::NONE
    },
    internal_url: None,
    import_command: &[
        "lighthouse",
        "account",
        "validator",
        "import",
        "--network=${NETWORK}",
        "--datadir=${VL_DATA_DIR}",
        "--directory=/keystore/validator_keys",
        "--password-file=/keystore/keystore_password.txt",
        "--reuse-password",
    ],
};

pub const LODESTAR_VALIDATOR: ClientTemplate = ClientTemplate {
    role: Role::Validator,
    client: "lodestar",
    image: "chainsafe/lodestar:v1.16.0",
    data_dir: "/var/lib/lodestar/validator",
    command: &[
        "validator",
        "--network=${NETWORK}",
        "--dataDir=${VL_DATA_DIR}",
        "--metrics",
        "--metrics.address=0.0.0.0",
        "--metrics.port=${VL_METRICS_PORT}",
    ],
    ports: &[tcp("metrics", "VL_METRICS_PORT", 5064, Exposure::Internal)],
    flags: TemplateFlags {
        fee_recipient: &["--suggestedFeeRecipient=${FEE_RECIPIENT}"],
        graffiti: &["--graffiti=${VL_GRAFFITI}"],
        mev: &["--builder"],
        upstream: &["--beaconNodes=${CC_API_URL}"],
        ..TemplateFlags::NONE
    },
    internal_url: None,
    import_command: &[
        "validator",
        "import",
        "--network=${NETWORK}",
        "--dataDir=${VL_DATA_DIR}",
        "--importKeystores=/keystore/validator_keys",
        "--importKeystoresPassword=/keystore/keystore_password.txt",
    ],
};

pub const PRYSM_VALIDATOR: ClientTemplate = ClientTemplate {
    role: Role::Validator,
    client: "prysm",
    image: "gcr.io/prysmaticlabs/prysm/validator:v5.0.0",
    data_dir: "/var/lib/prysm-validator",
    command: &[
        "--${NETWORK}",
        "--datadir=${VL_DATA_DIR}",
        "--wallet-dir=${VL_DATA_DIR}/wallet",
        "--wallet-password-file=/keystore/keystore_password.txt",
        "--monitoring-host=0.0.0.0",
        "--monitoring-port=${VL_METRICS_PORT}",
        "--accept-terms-of-use",
    ],
    ports: &[tcp("metrics", "VL_METRICS_PORT", 8081, Exposure::Internal)],
    flags: TemplateFlags {
        fee_recipient: &["--suggested-fee-recipient=${FEE_RECIPIENT}"],
        graffiti: &["--graffiti=${VL_GRAFFITI}"],
        mev: &["--enable-builder"],
        upstream: &["--beacon-rpc-provider=${CC_API_URL}"],
        ..TemplateFlags::NONE
    },
    internal_url: None,
    import_command: &[
        "accounts",
        "import",
        "--${NETWORK}",
        "--wallet-dir=${VL_DATA_DIR}/wallet",
        "--keys-dir=/keystore/validator_keys",
        "--account-password-file=/keystore/keystore_password.txt",
        "--wallet-password-file=/keystore/keystore_password.txt",
        "--accept-terms-of-use",
    ],
};

pub const TEKU_VALIDATOR: ClientTemplate = ClientTemplate {
    role: Role::Validator,
    client: "teku",
    image: "consensys/teku:24.2.0",
    data_dir: "/var/lib/teku-validator",
    command: &[
        "validator-client",
        "--network=${NETWORK}",
        "--data-path=${VL_DATA_DIR}",
        "--validator-keys=/keystore/validator_keys:/keystore/keystore_password.txt",
        "--validators-keystore-locking-enabled=false",
        "--metrics-enabled=true",
        "--metrics-interface=0.0.0.0",
        "--metrics-port=${VL_METRICS_PORT}",
        "--metrics-host-allowlist=*",
    ],
    ports: &[tcp("metrics", "VL_METRICS_PORT", 8009, Exposure::Internal)],
    flags: TemplateFlags {
        fee_recipient: &["--validators-proposer-default-fee-recipient=${FEE_RECIPIENT}"],
        graffiti: &["--validators-graffiti=${VL_GRAFFITI}"],
        mev: &["--validators-builder-registration-default-enabled=true"],
        upstream: &["--beacon-node-api-endpoint=${CC_API_URL}"],
        ..TemplateFlags::NONE
    },
    internal_url: None,
    import_command: &[],
};

pub const TEMPLATES: &[ClientTemplate] = &[
    GETH,
    NETHERMIND,
    BESU,
    ERIGON,
    LIGHTHOUSE_BEACON,
    LODESTAR_BEACON,
    PRYSM_BEACON,
    TEKU_BEACON,
    LIGHTHOUSE_VALIDATOR,
    LODESTAR_VALIDATOR,
    PRYSM_VALIDATOR,
    TEKU_VALIDATOR,
];

/// MEV-boost sidecar, shared by every network that has relays.
pub const MEV_BOOST_IMAGE: &str = "flashbots/mev-boost:1.7";
pub const MEV_BOOST_PORT: u16 = 18550;
pub const MEV_BOOST_COMMAND: &[&str] = &[
    "-${NETWORK}",
    "-addr=0.0.0.0:${MEV_PORT}",
    "-relay-check",
    "-relays=${RELAY_URL}",
];

/// Image for the service that holds the validator back until the beacon API answers.
pub const BLOCKER_IMAGE: &str = "busybox:1.36";
pub const BLOCKER_COMMAND: &[&str] = &[
    "sh",
    "-c",
    "until wget -q -O /dev/null http://consensus:${CC_API_PORT}/eth/v1/node/health; do echo 'waiting for consensus'; sleep 10; done",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_declares_an_api_port_or_is_a_validator() {
        for template in TEMPLATES {
            match template.role {
                Role::Validator => assert!(template.port("api").is_none()),
                _ => assert!(template.port("api").is_some(), "{} has no api port", template.client),
            }
        }
    }

    #[test]
    fn upstream_links_are_declared_for_dependent_roles() {
        for template in TEMPLATES.iter().filter(|t| t.role != Role::Execution) {
            assert!(!template.flags.upstream.is_empty(), "{}", template.client);
        }
    }

    #[test]
    fn mounted_paths_match_the_mount_points() {
        for template in TEMPLATES.iter().filter(|t| t.role == Role::Validator) {
            for arg in template.import_command.iter().filter(|a| a.contains("keystore")) {
                assert!(arg.contains(KEYSTORE_MOUNT), "{arg}");
            }
        }
        for template in TEMPLATES.iter().filter(|t| t.role != Role::Validator) {
            assert!(template.flags.auth_token[0].ends_with(AUTH_TOKEN_MOUNT));
        }
    }
}
