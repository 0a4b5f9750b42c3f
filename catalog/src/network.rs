use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceType {
    PreMerge,
    Merge,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::PreMerge => f.write_str("pre-merge"),
            ServiceType::Merge => f.write_str("merge"),
        }
    }
}

/// Static facts about a network a deployment can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkProfile {
    pub name: &'static str,
    pub requires_auth_token: bool,
    pub service_type: ServiceType,
    pub genesis_fork_version: [u8; 4],
    pub default_execution_bootnodes: &'static [&'static str],
    pub default_consensus_bootnodes: &'static [&'static str],
    pub default_relay_urls: &'static [&'static str],
}

impl NetworkProfile {
    /// MEV-boost needs at least one relay to talk to.
    pub fn supports_mev(&self) -> bool {
        !self.default_relay_urls.is_empty()
    }

    /// `0x`-prefixed lowercase hex, the way beacon configs spell it.
    pub fn genesis_fork_version_hex(&self) -> String {
        format!("0x{}", hex::encode(self.genesis_fork_version))
    }
}

pub const MAINNET: NetworkProfile = NetworkProfile {
    name: "mainnet",
    requires_auth_token: true,
    service_type: ServiceType::Merge,
    genesis_fork_version: [0x00, 0x00, 0x00, 0x00],
    default_execution_bootnodes: &[
        "enode://d860a01f9722d78051619d1e2351aba3f43f943f6f00718d1b9baa4101932a1f5011f16bb2b1bb35db20d6fe28fa0bf09636d26a87d31de9ec6203eeedb1f666@18.138.108.67:30303",
        "enode://22a8232c3abc76a16ae9d6c3b164f98775fe226f0917b0ca871128a74a8e9630b458460865bab457221f1d448dd9791d24c4e5d88786180ac185df813a68d4de@3.209.45.79:30303",
        "enode://2b252ab6a1d0f971d9722cb839a42cb81db019ba44c08754628ab4a823487071b5695317c8ccd085219c3a03af063495b2f1da8d18218da2d6a82981b45e6ffc@65.108.70.101:30303",
        "enode://4aeb4ab6c14b23e2c4cfdce879c04b0748a20d8e9b59e25ded2a08143e265c6c25936e74cbc8e641e3312ca288673d91f2f93f8e277de3cfa444ecdaaf982052@157.90.35.166:30303",
    ],
    default_consensus_bootnodes: &[
        "enr:-Jq4QItoFUuug_n_qbYbU0OY04-np2wT8rUCauOOXNi0H3BWbDj-zbfZb7otA7jZ6flbBpx1LNZK2TDebZ9dEKx84LYBhGV0aDKQtTA_KgEAAAD__________4JpZIJ2NIJpcIQSv2qciXNlY3AyNTZrMaEDxBIf0MOXfh1gNeeYxxQcUl7cDw5_aN9q67dfEe6GCmKDdWRwgiMo",
        "enr:-Jq4QN_YBsUOqQsty1OGvYv48PMaiEt1AzGD1NkYQHaxZoTyVGqMYXg0K9c0LPNWC9pkXmggApp8nygYLsQwScwAgfgBhGV0aDKQtTA_KgEAAAD__________4JpZIJ2NIJpcIQDKM2eiXNlY3AyNTZrMaEDYSL1W3fKWKE5bEADMCSf4fH2ZpJNtuJKNqq5pb_5QeODdWRwgiMo",
    ],
    default_relay_urls: &[
        "https://0xac6e77dfe25ecd6110b8e780608cce0dab71fdd5ebea22a16c0205200f2f8e2e3ad3b71d3499c54ad14d6c21b41a37ae@boost-relay.flashbots.net",
        "https://0xa1559ace749633b997cb3fdacffb890aeebdb0f5a3b6aaa7eeeaf1a38af0a8fe88b9e4b1f61f236d2e64d95733327a62@relay.ultrasound.money",
        "https://0x8b5d2e73e2a3a55c6c87b8b6eb92e0149a125c852751db1422fa951e42a09b82c142c3ea98d0d9930b056a3bc9896b8f@bloxroute.max-profit.blxrbdn.com",
    ],
};

pub const SEPOLIA: NetworkProfile = NetworkProfile {
    name: "sepolia",
    requires_auth_token: true,
    service_type: ServiceType::Merge,
    genesis_fork_version: [0x90, 0x00, 0x00, 0x69],
    default_execution_bootnodes: &[
        "enode://4e5e92199ee224a01932a377160aa432f31d0b351f84ab413a8e0a42f4f36476f8fb1cbe914af0d9aef0d51665c214cf653c651c4bbd9d5550a934f241f1682b@138.197.51.181:30303",
        "enode://143e11fb766781d22d92a2e33f8f104cddae4411a122295ed1fdb6638de96a6ce65f5b7c964ba3763bba27961738fef7d3ecc739268f3e5e771fb4c87b6234ba@146.190.1.103:30303",
    ],
    default_consensus_bootnodes: &[
        "enr:-Iq4QMCTfIMXnow27baRUb35Q8iiFHSIDBJh6hQM5Axohhf4b6Kr_cOCu0htQ5WvVqKvFgY28893DHAg8gnBAXsAVqmGAX53x8JggmlkgnY0gmlwhLKAlv6Jc2VjcDI1NmsxoQK6S-Cii_KmfFdUJL2TANL3ksaKUnNXvTCv1tLwXs0QgIN1ZHCCIyk",
    ],
    default_relay_urls: &[
        "https://0x845bd072b7cd566f02faeb0a4033ce9399e42839ced64e8b2adcfc859ed1e8e1a5a293336a49feac6d9a5edb779be53a@boost-relay-sepolia.flashbots.net",
    ],
};

pub const HOLESKY: NetworkProfile = NetworkProfile {
    name: "holesky",
    requires_auth_token: true,
    service_type: ServiceType::Merge,
    genesis_fork_version: [0x01, 0x01, 0x70, 0x00],
    default_execution_bootnodes: &[
        "enode://ac906289e4b7f12df423d654c5a962b6ebe5b3a74cc9e06292a85221f9a64a6f1cfdd6b714ed6dacef51578f92b34c60ee91e9ede9c7f8fadc4d347326d95e2b@146.190.13.128:30303",
        "enode://a3435a0155a3e837c02f5e7f5662a2f1fbc25b48e4dc232016e1c51b544cb5b4510ef633ea3278c0e970fa8ad8141e2d4d0f9f95456c537ff05fdf9b31c15072@178.128.136.233:30303",
    ],
    default_consensus_bootnodes: &[
        "enr:-Ku4QFo-9q73SspYI8cac_4kTX7yF800VXqJW4Lj3HkIkb5CMqFLxciNHePmMt4XdJzHvhrCC5ADI4D_GkAsxGJRLnQBh2F0dG5ldHOIAAAAAAAAAACEZXRoMpAhnTT-AQFwAP__________gmlkgnY0gmlwhLKAiOmJc2VjcDI1NmsxoQORcM6e19T1T9gi7jxEZjk_sjVLGFscUNqAY9obgZaxbIN1ZHCCIyk",
    ],
    default_relay_urls: &[
        "https://0xafa4c6985aa049fb79dd37010438cfebeb0f2bd42b115b89dd678dab0670c1de38da0c4e9138c9290a398ecd9a0b3110@boost-relay-holesky.flashbots.net",
    ],
};

pub const GNOSIS: NetworkProfile = NetworkProfile {
    name: "gnosis",
    requires_auth_token: true,
    service_type: ServiceType::Merge,
    genesis_fork_version: [0x00, 0x00, 0x00, 0x64],
    default_execution_bootnodes: &[
        "enode://fb14d72321ee823fcf21e163091849ee42e0f6ac0cddc737d79e324b0a734c4fc51823ef0a96b749c954483c25e8d2e534d1d5fc2619ea22d58671aff96f5188@65.109.103.148:30303",
    ],
    default_consensus_bootnodes: &[
        "enr:-Ly4QMU1y81COwm1VZgxGF4_eZ21ub9-GHF6dXZ29aEJ0oZpcV2Rysw-viaEKfpcpu9ZarILJLxFZjcKOjE0Sybs3MQBh2F0dG5ldHOIAAAAAAAAAACEZXRoMpCCS-QxAgAAZP__________gmlkgnY0gmlwhANLnx-Jc2VjcDI1NmsxoQKoaYT8I-wf2I_f_ii6EgoSSXj5T3bhiDyW-7ZLsY3T64hzeW5jbmV0cwCDdGNwgiMog3VkcIIjKA",
    ],
    default_relay_urls: &[],
};

pub const CHIADO: NetworkProfile = NetworkProfile {
    name: "chiado",
    requires_auth_token: true,
    service_type: ServiceType::Merge,
    genesis_fork_version: [0x00, 0x00, 0x00, 0x6f],
    default_execution_bootnodes: &[
        "enode://712144ac396fd2298b3e2559e2930d7f3a36fded3addd66955224958f1845634067717ab9522757ed2948f480fc52add5676487c8378e9011a7e2c0ac2f36cc3@3.71.132.231:30303",
    ],
    default_consensus_bootnodes: &[
        "enr:-L64QOijsdi9aVIawMb5h5PWueaPM9Ai6P17GNPFlHzz7MGJQ8tFMdYrEx8WQitNKLG924g2Q9cCdzg54M0UtKa3QIKCMxaHYXR0bmV0c4j__________4RldGgykDE2cEMCAABv__________-CaWSCdjSCaXCEi5AaWYlzZWNwMjU2azGhA8CjTkD4m1s8FbKCN18LgqlYcE65jrT148vFtwd9U62SiHN5bmNuZXRzD4N0Y3CCIyiDdWRwgiMo",
    ],
    default_relay_urls: &[],
};

pub const NETWORKS: &[NetworkProfile] = &[MAINNET, SEPOLIA, HOLESKY, GNOSIS, CHIADO];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fork_version_renders_as_prefixed_hex() {
        assert_eq!(MAINNET.genesis_fork_version_hex(), "0x00000000");
        assert_eq!(SEPOLIA.genesis_fork_version_hex(), "0x90000069");
        assert_eq!(HOLESKY.genesis_fork_version_hex(), "0x01017000");
        assert_eq!(CHIADO.genesis_fork_version_hex(), "0x0000006f");
    }

    #[test]
    fn network_names_are_unique() {
        for (i, a) in NETWORKS.iter().enumerate() {
            for b in &NETWORKS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn gnosis_networks_have_no_relays() {
        assert!(!GNOSIS.supports_mev());
        assert!(!CHIADO.supports_mev());
        assert!(MAINNET.supports_mev());
    }
}
