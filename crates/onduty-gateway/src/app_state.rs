//! Shared application state for the onduty gateway.
//!
//! Owns the one `PresenceRegistry` instance and hands clones of its `Arc` to
//! the HTTP handlers, the command front end, and the sweeper.

use std::sync::Arc;

use onduty_core::error::Result;
use onduty_core::{AdminPolicy, AdminToken, Caller, PresenceRegistry};

use crate::commands::{self, CommandCtx, CommandRouter};
use crate::config::OndutyConfig;
use crate::obs::OndutyMetrics;
use crate::sweeper::Sweeper;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<PresenceRegistry>,
    commands: Arc<CommandRouter>,
    metrics: Arc<OndutyMetrics>,
}

struct AppStateInner {
    cfg: OndutyConfig,
    admins: Arc<AdminPolicy>,
    admin_token: AdminToken,
}

impl AppState {
    /// Build application state from a validated config.
    pub fn new(cfg: OndutyConfig) -> Result<Self> {
        cfg.validate()?;

        let admins = Arc::new(AdminPolicy::new(cfg.admin.ids.iter().map(String::as_str)));
        let admin_token = AdminToken::new(cfg.admin.token.clone());
        if !admin_token.is_configured() {
            tracing::warn!("admin token not set; POST /reset will answer 503");
        }
        tracing::info!(
            admin_ids = admins.len(),
            timeout_secs = cfg.presence.timeout_secs,
            sweep_interval_secs = cfg.presence.sweep_interval_secs,
            "presence window configured"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, admins, admin_token }),
            registry: Arc::new(PresenceRegistry::new()),
            commands: Arc::new(commands::builtin()),
            metrics: Arc::new(OndutyMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &OndutyConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    pub fn admin_token(&self) -> &AdminToken {
        &self.inner.admin_token
    }

    pub fn commands(&self) -> &CommandRouter {
        &self.commands
    }

    pub fn metrics(&self) -> &OndutyMetrics {
        &self.metrics
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn command_ctx(&self, caller: Caller, display_name: Option<String>) -> CommandCtx {
        CommandCtx::new(
            caller,
            display_name,
            Arc::clone(&self.registry),
            Arc::clone(&self.inner.admins),
            Arc::clone(&self.metrics),
        )
    }

    /// Start the expiry task for this state's registry.
    pub fn spawn_sweeper(&self) -> Sweeper {
        let presence = &self.inner.cfg.presence;
        Sweeper::spawn(
            Arc::clone(&self.registry),
            presence.timeout(),
            presence.sweep_interval(),
            Arc::clone(&self.metrics),
        )
    }
}
