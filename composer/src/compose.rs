//! Template composition.
//!
//! A deployment is built by running [`FRAGMENTS`] in order over a [`Draft`].
//! Each fragment only reads the [`ComposeContext`] and writes the draft, so
//! the same inputs always produce the same documents.

use alloy_primitives::Address;
use catalog::templates::{
    AUTH_TOKEN_MOUNT, BLOCKER_COMMAND, BLOCKER_IMAGE, KEYSTORE_MOUNT, MEV_BOOST_COMMAND,
    MEV_BOOST_IMAGE, MEV_BOOST_PORT,
};
use catalog::{ClientTemplate, Exposure, NetworkProfile, PortSpec, Protocol, Registry, Role};

use crate::env::EnvDocument;
use crate::error::{Error, Result};
use crate::manifest::{
    Condition, Logging, Manifest, NetworkDefinition, PortBinding, Service, VolumeDefinition,
};
use crate::options::GenerationOptions;
use crate::types::ClientSelection;

pub const DEPLOYMENT_NETWORK: &str = "nodekit";
pub const CONTAINER_PREFIX: &str = "nodekit";
pub const DEFAULT_JWT_SECRET_PATH: &str = "./jwtsecret";
pub const DEFAULT_KEYSTORE_DIR: &str = "./keystore";
pub const RESTART_POLICY: &str = "unless-stopped";
pub const MEV_BOOST_SERVICE: &str = "mev-boost";
pub const BLOCKER_SERVICE: &str = "validator-blocker";
pub const IMPORT_SERVICE: &str = "validator-import";

const LOOPBACK: &str = "127.0.0.1";

/// Inputs every fragment reads. Built only after all lookups and option checks passed.
pub struct ComposeContext<'a> {
    pub network: &'static NetworkProfile,
    pub selection: &'a ClientSelection,
    pub options: &'a GenerationOptions,
    pub execution: &'static ClientTemplate,
    pub consensus: &'static ClientTemplate,
    pub validator: Option<&'static ClientTemplate>,
    pub fee_recipient: Option<Address>,
}

impl ComposeContext<'_> {
    pub fn mev_active(&self) -> bool {
        self.options.mev_enabled
            && self.selection.mev_boost
            && self.validator.is_some()
            && self.network.supports_mev()
    }

    fn image(&self, role: Role, template: &ClientTemplate) -> String {
        self.selection
            .get(role)
            .image
            .clone()
            .unwrap_or_else(|| template.image.to_string())
    }

    fn templates(&self) -> impl Iterator<Item = &'static ClientTemplate> {
        [Some(self.execution), Some(self.consensus), self.validator]
            .into_iter()
            .flatten()
    }

    fn relay_urls(&self) -> Vec<String> {
        if self.options.relay_urls.is_empty() {
            self.network
                .default_relay_urls
                .iter()
                .map(|url| url.to_string())
                .collect()
        } else {
            self.options.relay_urls.clone()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub env: EnvDocument,
    pub manifest: Manifest,
}

impl Draft {
    fn service_mut(&mut self, name: &str) -> Option<&mut Service> {
        self.manifest.services.get_mut(name)
    }
}

pub type Fragment = fn(&ComposeContext<'_>, &mut Draft);

/// Applied in this order; later environment writes win.
pub const FRAGMENTS: &[Fragment] = &[
    network_base,
    execution_client,
    consensus_client,
    validator_client,
    mev_boost,
    fallback_execution,
    auth_token,
    extra_flags,
    port_mapping,
    logging,
];

/// The two documents a deployment consists of, before cleanup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composed {
    pub env: EnvDocument,
    pub manifest: Manifest,
}

impl Composed {
    pub fn env_text(&self) -> String {
        self.env.render()
    }

    pub fn manifest_text(&self) -> Result<String> {
        self.manifest.render()
    }
}

pub fn compose(
    registry: &Registry,
    selection: &ClientSelection,
    options: &GenerationOptions,
) -> Result<Composed> {
    let network = registry
        .network(&selection.network)
        .ok_or_else(|| Error::UnsupportedNetwork {
            network: selection.network.clone(),
        })?;

    let entry = registry
        .entry(network.name)
        .ok_or_else(|| Error::MissingCatalogEntry {
            network: selection.network.clone(),
        })?;

    // A hand-built selection gets the same catalog checks as `resolve`.
    let template = |role: Role| -> Result<&'static ClientTemplate> {
        let spec = selection.get(role);
        if !entry.supports(role, &spec.name) {
            return Err(Error::UnsupportedClient {
                role,
                client: spec.name.clone(),
                network: selection.network.clone(),
            });
        }
        registry
            .template(role, &spec.name)
            .ok_or_else(|| Error::MissingTemplate {
                role,
                client: spec.name.clone(),
                network: selection.network.clone(),
            })
    };
    let execution = template(Role::Execution)?;
    let consensus = template(Role::Consensus)?;
    let validator = match selection.validator.omitted {
        true => None,
        false => Some(template(Role::Validator)?),
    };
    if let Some(validator) = validator {
        if !entry.compatible(consensus.client, validator.client) {
            return Err(Error::IncompatiblePair {
                consensus: consensus.client.to_string(),
                validator: validator.client.to_string(),
                network: selection.network.clone(),
            });
        }
    }

    let validated = options.validate(network.name, consensus)?;

    let context = ComposeContext {
        network,
        selection,
        options,
        execution,
        consensus,
        validator,
        fee_recipient: validated.fee_recipient,
    };

    let mut draft = Draft::default();
    for fragment in FRAGMENTS {
        fragment(&context, &mut draft);
    }

    Ok(Composed {
        env: draft.env,
        manifest: draft.manifest,
    })
}

fn network_base(ctx: &ComposeContext<'_>, draft: &mut Draft) {
    let network = ctx.network;
    draft
        .env
        .section("Network")
        .set("NETWORK", network.name)
        .set("GENESIS_FORK_VERSION", network.genesis_fork_version_hex())
        .set("EC_BOOTNODES", network.default_execution_bootnodes.join(","))
        .set("CC_BOOTNODES", network.default_consensus_bootnodes.join(","))
        .set(
            "FEE_RECIPIENT",
            ctx.fee_recipient
                .map(|address| address.to_checksum(None))
                .unwrap_or_default(),
        )
        .set(
            "CHECKPOINT_SYNC_URL",
            ctx.options.checkpoint_sync_url.clone().unwrap_or_default(),
        );

    draft.manifest.networks.insert(
        DEPLOYMENT_NETWORK.to_string(),
        NetworkDefinition {
            name: Some(format!("{DEPLOYMENT_NETWORK}-network")),
            driver: Some("bridge".to_string()),
        },
    );
}

fn execution_client(ctx: &ComposeContext<'_>, draft: &mut Draft) {
    let template = ctx.execution;
    client_section(ctx, template, draft);
    draft.env.set("EC_AUTH_URL", template.internal_url.unwrap_or_default());

    let mut service = client_service(template);
    if !ctx.network.default_execution_bootnodes.is_empty() {
        push_flags(&mut service, template.flags.bootnodes);
    }
    insert_service(draft, Role::Execution.as_str(), service);
}

fn consensus_client(ctx: &ComposeContext<'_>, draft: &mut Draft) {
    let template = ctx.consensus;
    client_section(ctx, template, draft);
    draft.env.set("CC_API_URL", template.internal_url.unwrap_or_default());

    let mut service = client_service(template);
    push_flags(&mut service, template.flags.upstream);
    if !ctx.network.default_consensus_bootnodes.is_empty() {
        push_flags(&mut service, template.flags.bootnodes);
    }
    if ctx.options.checkpoint_sync_url.is_some() {
        push_flags(&mut service, template.flags.checkpoint_sync);
    }
    if ctx.fee_recipient.is_some() {
        push_flags(&mut service, template.flags.fee_recipient);
    }
    service.depends_on(Role::Execution.as_str(), Condition::ServiceStarted);
    insert_service(draft, Role::Consensus.as_str(), service);
}

/// The validator comes with a blocker that waits for the beacon API and,
/// when the client needs it, a one-shot key import.
fn validator_client(ctx: &ComposeContext<'_>, draft: &mut Draft) {
    let Some(template) = ctx.validator else {
        return;
    };
    client_section(ctx, template, draft);
    draft
        .env
        .set("VL_GRAFFITI", ctx.options.graffiti.clone().unwrap_or_default())
        .set("KEYSTORE_DIR", DEFAULT_KEYSTORE_DIR);

    let keystore_volume = format!("${{KEYSTORE_DIR}}:{KEYSTORE_MOUNT}");

    let mut blocker = Service {
        container_name: container_name(BLOCKER_SERVICE),
        image: BLOCKER_IMAGE.to_string(),
        networks: vec![DEPLOYMENT_NETWORK.to_string()],
        command: BLOCKER_COMMAND.iter().map(|arg| arg.to_string()).collect(),
        ..Service::default()
    };
    blocker.depends_on(Role::Consensus.as_str(), Condition::ServiceStarted);
    insert_service(draft, BLOCKER_SERVICE, blocker);

    let has_import = !template.import_command.is_empty();
    if has_import {
        let mut import = Service {
            container_name: container_name(IMPORT_SERVICE),
            image: format!("${{{}_IMAGE_VERSION}}", Role::Validator.env_prefix()),
            volumes: vec![data_volume(template), keystore_volume.clone()],
            command: template.import_command.iter().map(|arg| arg.to_string()).collect(),
            ..Service::default()
        };
        import.depends_on(BLOCKER_SERVICE, Condition::ServiceCompletedSuccessfully);
        insert_service(draft, IMPORT_SERVICE, import);
    }

    let mut service = client_service(template);
    service.volumes.push(keystore_volume);
    push_flags(&mut service, template.flags.upstream);
    if ctx.fee_recipient.is_some() {
        push_flags(&mut service, template.flags.fee_recipient);
    }
    if ctx.options.graffiti.is_some() {
        push_flags(&mut service, template.flags.graffiti);
    }
    service.depends_on(BLOCKER_SERVICE, Condition::ServiceCompletedSuccessfully);
    if has_import {
        service.depends_on(IMPORT_SERVICE, Condition::ServiceCompletedSuccessfully);
    }
    insert_service(draft, Role::Validator.as_str(), service);
}

fn mev_boost(ctx: &ComposeContext<'_>, draft: &mut Draft) {
    if !ctx.mev_active() {
        return;
    }
    let image = ctx
        .options
        .mev_image
        .clone()
        .unwrap_or_else(|| MEV_BOOST_IMAGE.to_string());
    draft
        .env
        .section("MEV-boost")
        .set("MEV_IMAGE", image)
        .set("MEV_PORT", MEV_BOOST_PORT.to_string())
        .set("RELAY_URL", ctx.relay_urls().join(","));

    let service = Service {
        container_name: container_name(MEV_BOOST_SERVICE),
        image: "${MEV_IMAGE}".to_string(),
        restart: Some(RESTART_POLICY.to_string()),
        networks: vec![DEPLOYMENT_NETWORK.to_string()],
        command: MEV_BOOST_COMMAND.iter().map(|arg| arg.to_string()).collect(),
        ..Service::default()
    };
    insert_service(draft, MEV_BOOST_SERVICE, service);

    if let Some(consensus) = draft.service_mut(Role::Consensus.as_str()) {
        push_flags(consensus, ctx.consensus.flags.mev);
        consensus.depends_on(MEV_BOOST_SERVICE, Condition::ServiceStarted);
    }
    if let (Some(template), Some(validator)) =
        (ctx.validator, draft.service_mut(Role::Validator.as_str()))
    {
        push_flags(validator, template.flags.mev);
    }
}

/// Swaps the consensus client's single execution endpoint for the endpoint list.
fn fallback_execution(ctx: &ComposeContext<'_>, draft: &mut Draft) {
    let urls = &ctx.options.fallback_execution_urls;
    if urls.is_empty() {
        return;
    }
    draft
        .env
        .section("Consensus client")
        .set("CC_FALLBACK_EXECUTION_URLS", urls.join(","));

    let flags = &ctx.consensus.flags;
    if let Some(consensus) = draft.service_mut(Role::Consensus.as_str()) {
        consensus
            .command
            .retain(|arg| !flags.upstream.iter().any(|flag| *flag == arg.as_str()));
        push_flags(consensus, flags.fallback_execution);
    }
}

fn auth_token(ctx: &ComposeContext<'_>, draft: &mut Draft) {
    if !ctx.network.requires_auth_token {
        return;
    }
    let path = ctx
        .options
        .jwt_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| DEFAULT_JWT_SECRET_PATH.to_string());
    draft
        .env
        .section("Authentication")
        .set("JWT_SECRET_PATH", path);

    let mount = format!("${{JWT_SECRET_PATH}}:{AUTH_TOKEN_MOUNT}");
    for template in [ctx.execution, ctx.consensus] {
        if let Some(service) = draft.service_mut(template.role.as_str()) {
            service.volumes.push(mount.clone());
            push_flags(service, template.flags.auth_token);
        }
    }
}

/// Raw flags go last, in input order, without any checking.
fn extra_flags(ctx: &ComposeContext<'_>, draft: &mut Draft) {
    for template in ctx.templates() {
        let flags = ctx.options.extra_flags_for(template.role);
        if let Some(service) = draft.service_mut(template.role.as_str()) {
            service.command.extend(flags.iter().cloned());
        }
    }
}

fn port_mapping(ctx: &ComposeContext<'_>, draft: &mut Draft) {
    let map_all = ctx.options.map_all_ports;
    for template in ctx.templates() {
        let bindings: Vec<PortBinding> = template
            .ports
            .iter()
            .filter_map(|port| binding(port, map_all))
            .collect();
        if let Some(service) = draft.service_mut(template.role.as_str()) {
            service.ports.extend(bindings);
        }
    }

    if map_all {
        if let Some(service) = draft.service_mut(MEV_BOOST_SERVICE) {
            service.ports.push(PortBinding {
                name: "api".to_string(),
                target: MEV_BOOST_PORT,
                published: MEV_BOOST_PORT,
                host_ip: None,
                protocol: Protocol::Tcp.as_str().to_string(),
            });
        }
    }
}

fn logging(ctx: &ComposeContext<'_>, draft: &mut Draft) {
    let Some(driver) = ctx.options.logging_driver.driver() else {
        return;
    };
    for service in draft.manifest.services.values_mut() {
        service.logging = Some(Logging {
            driver: driver.to_string(),
        });
    }
}

fn binding(port: &PortSpec, map_all: bool) -> Option<PortBinding> {
    let host_ip = match (port.exposure, map_all) {
        (Exposure::P2p, _) | (_, true) => None,
        (Exposure::Api, false) => Some(LOOPBACK.to_string()),
        (Exposure::Internal, false) => return None,
    };
    Some(PortBinding {
        name: port.name.to_string(),
        target: port.port,
        published: port.port,
        host_ip,
        protocol: port.protocol.as_str().to_string(),
    })
}

fn client_section(ctx: &ComposeContext<'_>, template: &ClientTemplate, draft: &mut Draft) {
    let prefix = template.role.env_prefix();
    let title = match template.role {
        Role::Execution => "Execution client",
        Role::Consensus => "Consensus client",
        Role::Validator => "Validator client",
    };
    let env = draft.env.section(title);
    env.set(format!("{prefix}_IMAGE_VERSION"), ctx.image(template.role, template))
        .set(format!("{prefix}_DATA_DIR"), template.data_dir);
    for port in template.ports {
        env.set(port.env, port.port.to_string());
    }

    draft
        .manifest
        .volumes
        .insert(volume_name(template.role), VolumeDefinition::default());
}

fn client_service(template: &ClientTemplate) -> Service {
    let prefix = template.role.env_prefix();
    Service {
        container_name: container_name(template.role.as_str()),
        image: format!("${{{prefix}_IMAGE_VERSION}}"),
        restart: Some(RESTART_POLICY.to_string()),
        networks: vec![DEPLOYMENT_NETWORK.to_string()],
        volumes: vec![data_volume(template)],
        command: template.command.iter().map(|arg| arg.to_string()).collect(),
        ..Service::default()
    }
}

fn insert_service(draft: &mut Draft, name: &str, service: Service) {
    draft.manifest.services.insert(name.to_string(), service);
}

fn push_flags(service: &mut Service, flags: &[&str]) {
    service.command.extend(flags.iter().map(|flag| flag.to_string()));
}

fn volume_name(role: Role) -> String {
    format!("{}-data", role.as_str())
}

fn data_volume(template: &ClientTemplate) -> String {
    format!(
        "{}:${{{}_DATA_DIR}}",
        volume_name(template.role),
        template.role.env_prefix()
    )
}

fn container_name(service: &str) -> String {
    format!("{CONTAINER_PREFIX}-{service}")
}
