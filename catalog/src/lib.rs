pub mod clients;
pub mod network;
pub mod role;
pub mod templates;

pub use clients::CatalogEntry;
pub use network::{NetworkProfile, ServiceType};
pub use role::Role;
pub use templates::{ClientTemplate, Exposure, PortSpec, Protocol, TemplateFlags};

/// Read-only lookup tables every other component resolves against.
#[derive(Clone, Copy, Debug)]
pub struct Registry {
    pub networks: &'static [NetworkProfile],
    pub catalog: &'static [CatalogEntry],
    pub templates: &'static [ClientTemplate],
}

pub const BUILTIN: Registry = Registry {
    networks: network::NETWORKS,
    catalog: clients::CATALOG,
    templates: templates::TEMPLATES,
};

impl Registry {
    pub fn network(&self, name: &str) -> Option<&'static NetworkProfile> {
        self.networks.iter().find(|n| n.name == name)
    }

    pub fn entry(&self, network: &str) -> Option<&'static CatalogEntry> {
        self.catalog.iter().find(|e| e.network == network)
    }

    pub fn template(&self, role: Role, client: &str) -> Option<&'static ClientTemplate> {
        self.templates
            .iter()
            .find(|t| t.role == role && t.client == client)
    }
}

impl Default for Registry {
    fn default() -> Self {
        BUILTIN
    }
}
