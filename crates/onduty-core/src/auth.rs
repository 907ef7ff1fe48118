//! Admin authorization gate.
//!
//! Two independent paths guard the bulk clear:
//! - chat callers are checked against a static admin id set or an
//!   administrator role in the group the message came from;
//! - HTTP callers present a shared secret that must match exactly.
//!
//! The registry itself never authorizes anything; front ends consult this
//! module before calling `PresenceRegistry::clear`.

use std::collections::HashSet;
use std::fmt;

use crate::error::{OndutyError, Result};
use crate::identity::UserId;

/// Who is asking, as far as the front end can tell.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: UserId,
    /// `Some(true)` when the group context grants an administrator role,
    /// `None` when there is no group context at all (e.g. a direct message).
    pub guild_admin: Option<bool>,
}

impl Caller {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            guild_admin: None,
        }
    }

    pub fn with_guild_admin(mut self, is_admin: bool) -> Self {
        self.guild_admin = Some(is_admin);
        self
    }
}

/// The admin capabilities a caller holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub static_admin: bool,
    pub contextual_admin: bool,
}

impl Capabilities {
    pub fn any(self) -> bool {
        self.static_admin || self.contextual_admin
    }
}

/// Static admin id set, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    ids: HashSet<UserId>,
}

impl AdminPolicy {
    pub fn new<I, U>(ids: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<UserId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capabilities(&self, caller: &Caller) -> Capabilities {
        Capabilities {
            static_admin: self.ids.contains(&caller.user_id),
            contextual_admin: caller.guild_admin.unwrap_or(false),
        }
    }

    pub fn is_authorized(&self, caller: &Caller) -> bool {
        self.capabilities(caller).any()
    }
}

/// Shared secret for the HTTP reset path. An empty secret counts as unset.
#[derive(Clone, Default)]
pub struct AdminToken(Option<String>);

impl AdminToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.is_empty()))
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// Fails closed: with no secret configured every request is rejected as
    /// `NotConfigured`, whatever it supplies.
    pub fn verify(&self, supplied: Option<&str>) -> Result<()> {
        let Some(expected) = self.0.as_deref() else {
            return Err(OndutyError::NotConfigured("admin reset".into()));
        };
        match supplied {
            Some(s) if s == expected => Ok(()),
            _ => Err(OndutyError::Unauthorized),
        }
    }
}

impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.is_configured() { "<redacted>" } else { "<unset>" };
        f.debug_tuple("AdminToken").field(&shown).finish()
    }
}
