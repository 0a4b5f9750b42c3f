use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use alloy_primitives::Address;
use catalog::{ClientTemplate, Role};
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_NETWORK: &str = "mainnet";
pub const DEFAULT_GENERATION_PATH: &str = "./nodekit-data";
pub const MAX_GRAFFITI_BYTES: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoggingDriver {
    #[default]
    JsonFile,
    RuntimeDefault,
}

impl LoggingDriver {
    /// Driver name for the manifest, `None` when the runtime default applies.
    pub fn driver(&self) -> Option<&'static str> {
        match self {
            LoggingDriver::JsonFile => Some("json-file"),
            LoggingDriver::RuntimeDefault => None,
        }
    }
}

impl FromStr for LoggingDriver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(LoggingDriver::JsonFile),
            "none" => Ok(LoggingDriver::RuntimeDefault),
            other => Err(format!("unknown logging driver '{other}', expected json or none")),
        }
    }
}

/// Everything the composer needs besides the client selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationOptions {
    pub network: String,
    pub path: PathBuf,
    pub checkpoint_sync_url: Option<String>,
    pub fee_recipient: Option<String>,
    /// Absolute path of an existing token; defaults to `./jwtsecret` in `path`.
    pub jwt_path: Option<PathBuf>,
    pub graffiti: Option<String>,
    pub fallback_execution_urls: Vec<String>,
    /// Replaces the network's default relays when non-empty.
    pub relay_urls: Vec<String>,
    pub extra_flags: BTreeMap<Role, Vec<String>>,
    pub map_all_ports: bool,
    pub mev_enabled: bool,
    pub mev_image: Option<String>,
    pub logging_driver: LoggingDriver,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            path: PathBuf::from(DEFAULT_GENERATION_PATH),
            checkpoint_sync_url: None,
            fee_recipient: None,
            jwt_path: None,
            graffiti: None,
            fallback_execution_urls: Vec::new(),
            relay_urls: Vec::new(),
            extra_flags: BTreeMap::new(),
            map_all_ports: false,
            mev_enabled: false,
            mev_image: None,
            logging_driver: LoggingDriver::default(),
        }
    }
}

/// Options after format checks, with the fee recipient in checksummed form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ValidatedOptions {
    pub fee_recipient: Option<Address>,
}

impl GenerationOptions {
    pub fn extra_flags_for(&self, role: Role) -> &[String] {
        self.extra_flags.get(&role).map(Vec::as_slice).unwrap_or_default()
    }

    /// Checks every option that has a format. Runs before anything is merged.
    pub(crate) fn validate(
        &self,
        network: &str,
        consensus: &ClientTemplate,
    ) -> Result<ValidatedOptions> {
        if self.network != network {
            return Err(Error::invalid_option(
                "network",
                format!("options target '{}' but the selection targets '{network}'", self.network),
            ));
        }

        let fee_recipient = self.fee_recipient.as_deref().map(parse_fee_recipient).transpose()?;

        if let Some(path) = &self.jwt_path {
            if !path.is_absolute() {
                return Err(Error::invalid_option(
                    "jwt secret path",
                    format!("{} is not an absolute path", path.display()),
                ));
            }
        }

        if let Some(url) = &self.checkpoint_sync_url {
            check_http_url("checkpoint sync url", url)?;
        }
        for url in &self.fallback_execution_urls {
            check_http_url("fallback execution url", url)?;
        }
        for url in &self.relay_urls {
            check_http_url("relay url", url)?;
        }

        if let Some(graffiti) = &self.graffiti {
            if graffiti.len() > MAX_GRAFFITI_BYTES {
                return Err(Error::invalid_option(
                    "graffiti",
                    format!("{} bytes exceeds the {MAX_GRAFFITI_BYTES} byte limit", graffiti.len()),
                ));
            }
        }

        if !self.fallback_execution_urls.is_empty()
            && consensus.flags.fallback_execution.is_empty()
        {
            return Err(Error::invalid_option(
                "fallback execution urls",
                format!("{} does not accept fallback execution endpoints", consensus.client),
            ));
        }

        if matches!(self.mev_image.as_deref(), Some(image) if image.trim().is_empty()) {
            return Err(Error::invalid_option("mev-boost image", "image reference is empty"));
        }

        Ok(ValidatedOptions { fee_recipient })
    }
}

/// Accepts `0x` plus 40 hex digits. Mixed-case input must carry a valid EIP-55 checksum.
pub fn parse_fee_recipient(input: &str) -> Result<Address> {
    let invalid = |reason: &str| Error::InvalidFeeRecipient {
        address: input.to_string(),
        reason: reason.to_string(),
    };

    let digits = input
        .strip_prefix("0x")
        .ok_or_else(|| invalid("missing 0x prefix"))?;
    if digits.len() != 40 {
        return Err(invalid("expected 40 hex digits"));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("contains non-hex characters"));
    }

    let address = Address::from_str(input).map_err(|e| invalid(&e.to_string()))?;

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None) != input {
        return Err(invalid("checksum mismatch"));
    }

    Ok(address)
}

fn check_http_url(option: &'static str, raw: &str) -> Result<()> {
    let url = Url::parse(raw).map_err(|e| Error::invalid_option(option, format!("'{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::invalid_option(
            option,
            format!("'{raw}': unsupported scheme '{scheme}'"),
        )),
    }
}
