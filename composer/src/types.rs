use std::fmt;
use std::str::FromStr;

use catalog::Role;

/// A client as the operator named it: `name` or `name:image`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestedClient {
    pub name: String,
    pub image: Option<String>,
}

impl RequestedClient {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl FromStr for RequestedClient {
    type Err = String;

    /// Splits at the first colon only; image references carry their own tag colon.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None => Ok(Self::named(s)),
            Some(("", _)) => Err(format!("missing client name in '{s}'")),
            Some((name, "")) => Ok(Self::named(name)),
            Some((name, image)) => Ok(Self::named(name).with_image(image)),
        }
    }
}

/// What the operator asked for, before it is checked against the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientRequest {
    pub execution: RequestedClient,
    pub consensus: RequestedClient,
    /// `None` deploys without a validator.
    pub validator: Option<RequestedClient>,
    pub mev_boost: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientSpec {
    pub role: Role,
    pub name: String,
    pub image: Option<String>,
    pub omitted: bool,
}

impl ClientSpec {
    pub fn new(role: Role, name: impl Into<String>, image: Option<String>) -> Self {
        Self {
            role,
            name: name.into(),
            image,
            omitted: false,
        }
    }

    pub fn omitted(role: Role) -> Self {
        Self {
            role,
            name: String::new(),
            image: None,
            omitted: true,
        }
    }
}

/// A policy decision the resolver took on the operator's behalf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Downgrade {
    MevWithoutValidator,
    MevUnsupportedOnNetwork,
}

impl fmt::Display for Downgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Downgrade::MevWithoutValidator => {
                f.write_str("mev-boost disabled because no validator is deployed")
            }
            Downgrade::MevUnsupportedOnNetwork => {
                f.write_str("mev-boost disabled because the network has no relays")
            }
        }
    }
}

/// A client triple known to work on `network`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientSelection {
    pub network: String,
    pub execution: ClientSpec,
    pub consensus: ClientSpec,
    pub validator: ClientSpec,
    pub mev_boost: bool,
    pub downgrades: Vec<Downgrade>,
}

impl ClientSelection {
    pub fn get(&self, role: Role) -> &ClientSpec {
        match role {
            Role::Execution => &self.execution,
            Role::Consensus => &self.consensus,
            Role::Validator => &self.validator,
        }
    }

    pub fn present(&self) -> impl Iterator<Item = &ClientSpec> {
        [&self.execution, &self.consensus, &self.validator]
            .into_iter()
            .filter(|spec| !spec.omitted)
    }

    pub fn has_custom_images(&self) -> bool {
        self.present().any(|spec| spec.image.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_client_keeps_image_tag() {
        let parsed: RequestedClient = "geth:ethereum/client-go:v1.13.0".parse().unwrap();
        assert_eq!(parsed.name, "geth");
        assert_eq!(parsed.image.as_deref(), Some("ethereum/client-go:v1.13.0"));
    }

    #[test]
    fn requested_client_without_image() {
        assert_eq!("teku".parse::<RequestedClient>().unwrap(), RequestedClient::named("teku"));
        assert_eq!("teku:".parse::<RequestedClient>().unwrap(), RequestedClient::named("teku"));
        assert!(":consensys/teku".parse::<RequestedClient>().is_err());
    }
}
