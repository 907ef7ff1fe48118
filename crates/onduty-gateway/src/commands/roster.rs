//! Roster commands: clock in/out, refresh, headcount, admin reset.

use async_trait::async_trait;

use onduty_core::error::Result;

use crate::clock;
use crate::commands::dispatcher::{Command, CommandCtx, Reply};

const VIA: (&str, &str) = ("via", "command");

#[derive(Default)]
pub struct ClockIn;

#[async_trait]
impl Command for ClockIn {
    fn name(&self) -> &'static str {
        "clockin"
    }

    fn description(&self) -> &'static str {
        "Mark yourself as clocked in (driver online)"
    }

    async fn run(&self, ctx: CommandCtx) -> Result<Reply> {
        let out = ctx
            .registry()
            .mark_active(ctx.caller().user_id.clone(), clock::now());
        if out.changed {
            ctx.metrics().clock_ins.inc(&[VIA]);
        }
        tracing::info!(user = %ctx.caller().user_id, online = out.online, "clocked in");
        Ok(Reply::public(format!(
            "✅ {} clocked in. {} drivers online.",
            ctx.display_name(),
            out.online
        )))
    }
}

#[derive(Default)]
pub struct ClockOut;

#[async_trait]
impl Command for ClockOut {
    fn name(&self) -> &'static str {
        "clockout"
    }

    fn description(&self) -> &'static str {
        "Mark yourself as clocked out (driver offline)"
    }

    async fn run(&self, ctx: CommandCtx) -> Result<Reply> {
        let out = ctx.registry().mark_inactive(&ctx.caller().user_id);
        if !out.changed {
            return Ok(Reply::public(format!(
                "❌ {} is not clocked in. {} drivers online.",
                ctx.display_name(),
                out.online
            )));
        }
        ctx.metrics().clock_outs.inc(&[VIA]);
        tracing::info!(user = %ctx.caller().user_id, online = out.online, "clocked out");
        Ok(Reply::public(format!(
            "👋 {} clocked out. {} drivers online.",
            ctx.display_name(),
            out.online
        )))
    }
}

#[derive(Default)]
pub struct Ping;

#[async_trait]
impl Command for Ping {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn description(&self) -> &'static str {
        "Refresh your clock-in so you are not timed out"
    }

    async fn run(&self, ctx: CommandCtx) -> Result<Reply> {
        let out = ctx.registry().refresh(&ctx.caller().user_id, clock::now());
        if out.changed {
            Ok(Reply::public(format!(
                "🔄 {}'s status has been refreshed.",
                ctx.display_name()
            )))
        } else {
            Ok(Reply::ephemeral("❌ You are not clocked in. Use /clockin first."))
        }
    }
}

#[derive(Default)]
pub struct Drivers;

#[async_trait]
impl Command for Drivers {
    fn name(&self) -> &'static str {
        "drivers"
    }

    fn description(&self) -> &'static str {
        "Show current count of online drivers"
    }

    async fn run(&self, ctx: CommandCtx) -> Result<Reply> {
        Ok(Reply::public(format!(
            "🚦 Drivers online: {}",
            ctx.registry().count()
        )))
    }
}

#[derive(Default)]
pub struct Reset;

#[async_trait]
impl Command for Reset {
    fn name(&self) -> &'static str {
        "reset"
    }

    fn description(&self) -> &'static str {
        "(Admin) Reset all counts"
    }

    async fn run(&self, ctx: CommandCtx) -> Result<Reply> {
        if !ctx.is_admin() {
            ctx.metrics()
                .admin_rejections
                .inc(&[VIA, ("reason", "not_admin")]);
            tracing::warn!(user = %ctx.caller().user_id, "reset refused: caller is not an admin");
            return Ok(Reply::ephemeral("You are not authorized to run this command."));
        }

        let removed = ctx.registry().clear();
        ctx.metrics().resets.inc(&[VIA]);
        tracing::info!(user = %ctx.caller().user_id, removed, "roster reset");
        Ok(Reply::public("✅ Reset complete. 0 drivers online."))
    }
}
