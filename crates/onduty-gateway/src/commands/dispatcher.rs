use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;

use onduty_core::error::Result;
use onduty_core::{AdminPolicy, Caller, PresenceRegistry};

use crate::obs::OndutyMetrics;

/// Reply posted back into the channel the command came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub reply: String,
    /// Only the caller should see it.
    pub ephemeral: bool,
}

impl Reply {
    pub fn public(text: impl Into<String>) -> Self {
        Self {
            reply: text.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            reply: text.into(),
            ephemeral: true,
        }
    }
}

/// Per-message context handed to a command (borrowed tools, no transport).
#[derive(Clone)]
pub struct CommandCtx {
    caller: Caller,
    display_name: Option<String>,
    registry: Arc<PresenceRegistry>,
    admins: Arc<AdminPolicy>,
    metrics: Arc<OndutyMetrics>,
}

impl CommandCtx {
    pub fn new(
        caller: Caller,
        display_name: Option<String>,
        registry: Arc<PresenceRegistry>,
        admins: Arc<AdminPolicy>,
        metrics: Arc<OndutyMetrics>,
    ) -> Self {
        Self {
            caller,
            display_name,
            registry,
            admins,
            metrics,
        }
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &OndutyMetrics {
        &self.metrics
    }

    /// Name used in acknowledgements; falls back to the raw user id.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.caller.user_id.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.admins.is_authorized(&self.caller)
    }
}

/// A chat command such as `/clockin`.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn run(&self, ctx: CommandCtx) -> Result<Reply>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Name -> command table.
#[derive(Default)]
pub struct CommandRouter {
    commands: DashMap<&'static str, Arc<dyn Command>>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self {
            commands: DashMap::new(),
        }
    }

    pub fn register(&self, cmd: Arc<dyn Command>) {
        self.commands.insert(cmd.name(), cmd);
    }

    /// Registered commands, sorted by name.
    pub fn list(&self) -> Vec<CommandInfo> {
        let mut out: Vec<CommandInfo> = self
            .commands
            .iter()
            .map(|e| CommandInfo {
                name: *e.key(),
                description: e.value().description(),
            })
            .collect();
        out.sort_by_key(|c| c.name);
        out
    }

    /// Resolve a raw chat message to a registered command.
    ///
    /// The whole message must be the token: case and surrounding whitespace
    /// are ignored and the leading `/` is optional.
    pub fn resolve(&self, content: &str) -> Option<Arc<dyn Command>> {
        let token = content.trim().to_lowercase();
        let token = token.strip_prefix('/').unwrap_or(&token);
        if token.is_empty() || token.contains(char::is_whitespace) {
            return None;
        }
        self.commands.get(token).map(|e| Arc::clone(e.value()))
    }

    /// Run the command named by `content`. `Ok(None)` means "not a command".
    pub async fn dispatch(&self, ctx: CommandCtx, content: &str) -> Result<Option<Reply>> {
        let Some(cmd) = self.resolve(content) else {
            return Ok(None);
        };
        ctx.metrics().commands.inc(&[("command", cmd.name())]);
        tracing::debug!(command = cmd.name(), user = %ctx.caller().user_id, "running command");
        cmd.run(ctx).await.map(Some)
    }
}
