use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use onduty_core::error::{OndutyError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OndutyConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub presence: PresenceSection,

    #[serde(default)]
    pub admin: AdminSection,
}

impl Default for OndutyConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            presence: PresenceSection::default(),
            admin: AdminSection::default(),
        }
    }
}

impl OndutyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OndutyError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.gateway.validate()?;
        self.presence.validate()?;
        self.admin.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Let any origin poll `/status` (the public counter widget lives on
    /// another site).
    #[serde(default = "default_cors_allow_any")]
    pub cors_allow_any: bool,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            cors_allow_any: default_cors_allow_any(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            OndutyError::BadRequest(format!(
                "gateway.listen must be a valid SocketAddr (got {:?})",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_cors_allow_any() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresenceSection {
    /// Inactivity window after which a member is evicted.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for PresenceSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl PresenceSection {
    pub fn validate(&self) -> Result<()> {
        if !(60..=604_800).contains(&self.timeout_secs) {
            return Err(OndutyError::BadRequest(
                "presence.timeout_secs must be between 60 and 604800".into(),
            ));
        }
        if !(1..=86_400).contains(&self.sweep_interval_secs) {
            return Err(OndutyError::BadRequest(
                "presence.sweep_interval_secs must be between 1 and 86400".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn default_timeout_secs() -> u64 {
    4 * 3600
}
fn default_sweep_interval_secs() -> u64 {
    30 * 60
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AdminSection {
    /// User ids allowed to run the reset command from chat.
    #[serde(default)]
    pub ids: Vec<String>,

    /// Shared secret for `POST /reset`. Unset disables the endpoint.
    #[serde(default)]
    pub token: Option<String>,
}

impl fmt::Debug for AdminSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSection")
            .field("ids", &self.ids)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AdminSection {
    pub fn validate(&self) -> Result<()> {
        if self.ids.iter().any(|id| id.trim().is_empty()) {
            return Err(OndutyError::BadRequest(
                "admin.ids must not contain empty entries".into(),
            ));
        }
        Ok(())
    }
}
