//! Observable session state.

use tokio::sync::watch;

use authentic_wear_core::{Identity, SessionStatus};

/// What the UI sees of the session: the identity, if any, and whether an auth
/// call is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<Identity>,
    in_flight: usize,
}

impl SessionState {
    pub(super) const fn with_identity(identity: Option<Identity>) -> Self {
        Self {
            identity,
            in_flight: 0,
        }
    }

    pub(super) fn set_identity(&mut self, identity: Option<Identity>) {
        self.identity = identity;
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// `true` while at least one login, signup or logout is running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Collapse the state into a single status value.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        if self.is_loading() {
            SessionStatus::Authenticating
        } else if self.identity.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }
}

/// Marks an auth call as in flight for as long as it is alive.
///
/// Dropping the guard (on success, on error, or when the caller abandons the
/// future) releases the mark.
pub(super) struct InFlight<'a> {
    state: &'a watch::Sender<SessionState>,
}

impl<'a> InFlight<'a> {
    pub(super) fn begin(state: &'a watch::Sender<SessionState>) -> Self {
        state.send_modify(|s| s.in_flight += 1);
        Self { state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state
            .send_modify(|s| s.in_flight = s.in_flight.saturating_sub(1));
    }
}
