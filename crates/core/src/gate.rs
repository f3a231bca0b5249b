//! Admin access gate.
//!
//! Client-side view of admin access: `Locked` until a PIN the server accepts
//! is submitted, then `Unlocked` with that PIN cached for the admin header.
//! The server re-checks the PIN on every admin request, so this state is
//! only advisory. Failed attempts are unlimited and all report the same
//! message.

use thiserror::Error;

use crate::types::Pin;

/// Gate failures shown to the person at the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Incorrect PIN")]
    IncorrectPin,
    #[error("Enter a PIN")]
    EmptyPin,
}

/// Current gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    Locked,
    Unlocked,
}

/// Admin access gate holding the cached credential while unlocked.
#[derive(Clone, Default)]
pub struct AccessGate {
    credential: Option<String>,
}

impl AccessGate {
    /// A locked gate.
    #[must_use]
    pub const fn new() -> Self {
        Self { credential: None }
    }

    #[must_use]
    pub const fn state(&self) -> AccessState {
        if self.credential.is_some() {
            AccessState::Unlocked
        } else {
            AccessState::Locked
        }
    }

    /// Record the server's verdict on a submitted PIN.
    ///
    /// # Errors
    ///
    /// `GateError::EmptyPin` for an empty submission, `GateError::IncorrectPin`
    /// when the server rejected it. Either way the gate stays as it was.
    pub fn submit(&mut self, candidate: &str, accepted: bool) -> Result<(), GateError> {
        if candidate.is_empty() {
            return Err(GateError::EmptyPin);
        }
        if !accepted {
            return Err(GateError::IncorrectPin);
        }
        self.credential = Some(candidate.to_owned());
        Ok(())
    }

    /// The PIN to send with admin requests, when unlocked.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Swap the cached PIN after a successful PIN change.
    pub fn rotate(&mut self, new_pin: &Pin) {
        if self.credential.is_some() {
            self.credential = Some(new_pin.as_str().to_owned());
        }
    }

    /// Forget the cached PIN (exit admin).
    pub fn lock(&mut self) {
        self.credential = None;
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
