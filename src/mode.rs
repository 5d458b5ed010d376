//! Interaction mode state machine - select, pan, and temporary pan.
//!
//! ## State Transitions
//!
//! ```text
//! Select <-> Pan                 (set_mode / toggle_mode, clears temporary pan)
//! Any -> Any + TemporaryPan      (activate_temporary, e.g. modifier held)
//! Any + TemporaryPan -> Any      (restore_previous, e.g. modifier released)
//! ```
//!
//! The effective mode is `Pan` whenever the base mode is `Pan` or temporary
//! pan is active. Transitions are edge-triggered: a call that changes nothing
//! fires no notification.
//!
//! Listeners run synchronously in subscription order. A listener that returns
//! an error or panics is logged and skipped; the remaining listeners still run
//! and the transition stands.

use serde::{Deserialize, Serialize};
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, error};

/// Base interaction mode chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    Select,
    Pan,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Select => Self::Pan,
            Self::Pan => Self::Select,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Pan => "pan",
        }
    }
}

/// Payload delivered to mode listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeChange {
    pub mode: InteractionMode,
    pub previous_mode: InteractionMode,
}

/// Handle returned by [`ModeController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type ModeListener = Box<dyn FnMut(&ModeChange) -> anyhow::Result<()>>;

pub struct ModeController {
    mode: InteractionMode,
    temporary: bool,
    /// Base mode captured by the last `activate_temporary`
    previous_mode: InteractionMode,
    listeners: Vec<(ListenerId, ModeListener)>,
    next_listener_id: u64,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ModeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeController")
            .field("mode", &self.mode)
            .field("temporary", &self.temporary)
            .field("previous_mode", &self.previous_mode)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ModeController {
    pub fn new() -> Self {
        Self {
            mode: InteractionMode::Select,
            temporary: false,
            previous_mode: InteractionMode::Select,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// The base mode, ignoring any temporary override.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn effective_mode(&self) -> InteractionMode {
        if self.is_pan() {
            InteractionMode::Pan
        } else {
            InteractionMode::Select
        }
    }

    pub fn is_pan(&self) -> bool {
        self.mode == InteractionMode::Pan || self.temporary
    }

    pub fn is_select(&self) -> bool {
        self.mode == InteractionMode::Select && !self.temporary
    }

    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    /// Mode that `restore_previous` will report, while temporary pan is active.
    pub fn previous_mode(&self) -> Option<InteractionMode> {
        self.temporary.then_some(self.previous_mode)
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Switch the base mode. Always clears temporary pan; only a base mode
    /// change notifies.
    pub fn set_mode(&mut self, target: InteractionMode) -> bool {
        if target == self.mode {
            self.temporary = false;
            return false;
        }
        let old = self.mode;
        self.mode = target;
        self.temporary = false;
        debug!(from = old.name(), to = target.name(), "Mode changed");
        self.notify(ModeChange {
            mode: target,
            previous_mode: old,
        });
        true
    }

    pub fn toggle_mode(&mut self) -> bool {
        self.set_mode(self.mode.toggled())
    }

    /// Enter temporary pan. No-op if already active.
    pub fn activate_temporary(&mut self) -> bool {
        if self.temporary {
            return false;
        }
        self.previous_mode = self.mode;
        self.temporary = true;
        debug!(previous = self.previous_mode.name(), "Temporary pan on");
        self.notify(ModeChange {
            mode: InteractionMode::Pan,
            previous_mode: self.previous_mode,
        });
        true
    }

    /// Leave temporary pan. No-op if not active.
    pub fn restore_previous(&mut self) -> bool {
        if !self.temporary {
            return false;
        }
        self.temporary = false;
        debug!(restored = self.previous_mode.name(), "Temporary pan off");
        self.notify(ModeChange {
            mode: self.previous_mode,
            previous_mode: InteractionMode::Pan,
        });
        true
    }

    // ------------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------------

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ModeChange) -> anyhow::Result<()> + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, change: ModeChange) {
        for (id, listener) in self.listeners.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| listener(&change))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(listener = id.0, ?change, "Mode listener failed: {:#}", e);
                }
                Err(payload) => {
                    let msg = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    error!(listener = id.0, ?change, "Mode listener panicked: {}", msg);
                }
            }
        }
    }
}

/// Turns raw "modifier held" samples into temporary-pan transitions.
///
/// Repeated samples with the same value (key auto-repeat) do nothing; only a
/// change from released to pressed or back reaches the controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifierEdge {
    pressed: bool,
}

impl ModifierEdge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed a sample. Returns true if it was an edge.
    pub fn update(&mut self, pressed: bool, controller: &mut ModeController) -> bool {
        if pressed == self.pressed {
            return false;
        }
        self.pressed = pressed;
        if pressed {
            controller.activate_temporary();
        } else {
            controller.restore_previous();
        }
        true
    }
}
