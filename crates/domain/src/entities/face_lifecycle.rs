//! Watch face lifecycle
//!
//! Platform callbacks (visibility, ambient mode, display properties) are
//! modelled as events applied to an explicit state machine, so the timer and
//! drawing decisions can be tested without a device.

use serde::{Deserialize, Serialize};

use super::DisplayState;

/// Redraw interval while the face is visible and interactive
pub const INTERACTIVE_TICK_MS: u64 = 1_000;

/// Lifecycle event delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FaceEvent {
    /// Face became visible or hidden
    VisibilityChanged {
        /// New visibility
        visible: bool,
    },
    /// Face entered or left ambient mode
    AmbientChanged {
        /// New ambient flag
        ambient: bool,
    },
    /// Display capabilities reported by the platform
    PropertiesChanged {
        /// Display uses fewer bits per colour in ambient mode
        low_bit_ambient: bool,
    },
}

/// Current lifecycle flags of a watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaceLifecycle {
    visible: bool,
    ambient: bool,
    low_bit_ambient: bool,
}

impl FaceLifecycle {
    /// A hidden, interactive face
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visible: false,
            ambient: false,
            low_bit_ambient: false,
        }
    }

    /// Apply an event; returns `true` when the tick timer must be re-evaluated
    pub fn apply(&mut self, event: FaceEvent) -> bool {
        match event {
            FaceEvent::VisibilityChanged { visible } => {
                let changed = self.visible != visible;
                self.visible = visible;
                changed
            },
            FaceEvent::AmbientChanged { ambient } => {
                let changed = self.ambient != ambient;
                self.ambient = ambient;
                changed
            },
            FaceEvent::PropertiesChanged { low_bit_ambient } => {
                self.low_bit_ambient = low_bit_ambient;
                false
            },
        }
    }

    /// Face is visible
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Face is in ambient mode
    #[must_use]
    pub const fn is_ambient(&self) -> bool {
        self.ambient
    }

    /// The once-per-second tick only runs while visible and interactive
    #[must_use]
    pub const fn should_tick(&self) -> bool {
        self.visible && !self.ambient
    }

    /// Anti-aliasing is disabled on low-bit displays in ambient mode
    #[must_use]
    pub const fn anti_alias(&self) -> bool {
        !(self.low_bit_ambient && self.ambient)
    }

    /// Asset to draw: the full scene when interactive, the icon in ambient mode
    #[must_use]
    pub const fn asset_for(&self, state: &DisplayState) -> &'static str {
        if self.ambient {
            state.assets.icon
        } else {
            state.assets.scene
        }
    }

    /// Delay until the next whole-second tick, or `None` when not ticking
    #[must_use]
    pub const fn next_tick_delay_ms(&self, now_ms: u64) -> Option<u64> {
        if self.should_tick() {
            Some(INTERACTIVE_TICK_MS - now_ms % INTERACTIVE_TICK_MS)
        } else {
            None
        }
    }
}
