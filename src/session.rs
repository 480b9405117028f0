//! Pinch session tracking.
//!
//! A two-finger gesture is interpreted as a stream of incremental changes: each
//! touch-move event is compared with the previous one, not with the first. The
//! tracker keeps the single active [`GestureSession`] holding that previous
//! reading (the baseline) and the id of the sticker it belongs to.
//!
//! The first event for a sticker only records the baseline and reports
//! [`PinchStep::Initializing`]. Every later event reports the ratio and angle
//! difference since the baseline and then replaces it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::debug;

use crate::config::EngineConfig;
use crate::doc::ObjectId;

/// Reference frame of the pinch currently in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Sticker engaged in the pinch.
    pub id: ObjectId,
    /// Inter-touch distance at the previous event.
    pub baseline_distance: f64,
    /// Inter-touch angle in degrees at the previous event.
    pub baseline_angle: f64,
}

/// Outcome of feeding one two-finger reading to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchStep {
    /// A fresh baseline was recorded; nothing should be applied.
    Initializing,
    /// Change since the previous reading.
    Delta {
        /// Per-event scale ratio, already clamped to the configured step range.
        scale_factor: f64,
        /// Angle change in degrees.
        rotation_delta: f64,
    },
}

/// Owner of the single active pinch session.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    active: Option<GestureSession>,
    step_min: f64,
    step_max: f64,
}

impl SessionTracker {
    /// Create a tracker with the default per-event step limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Create a tracker using the step limits from `config`.
    #[must_use]
    pub fn with_config(config: &EngineConfig) -> Self {
        let config = config.validated();
        Self { active: None, step_min: config.pinch_step_min, step_max: config.pinch_step_max }
    }

    /// Feed the current two-finger reading for sticker `id`.
    ///
    /// Starts a new session when none is active or when the active one belongs
    /// to another sticker. A zero baseline distance yields a scale factor of 1.
    pub fn begin_or_continue(&mut self, id: ObjectId, distance: f64, angle: f64) -> PinchStep {
        let continuing = matches!(self.active, Some(session) if session.id == id);
        if !continuing {
            if let Some(stale) = self.active {
                debug!(from = %stale.id, to = %id, "pinch session switched sticker");
            }
            self.active = Some(GestureSession { id, baseline_distance: distance, baseline_angle: angle });
            debug!(%id, distance, angle, "pinch baseline recorded");
            return PinchStep::Initializing;
        }
        let Some(session) = self.active.as_mut() else {
            return PinchStep::Initializing;
        };

        let scale_factor = if session.baseline_distance == 0.0 {
            1.0
        } else {
            (distance / session.baseline_distance).clamp(self.step_min, self.step_max)
        };
        let rotation_delta = angle - session.baseline_angle;

        session.baseline_distance = distance;
        session.baseline_angle = angle;

        PinchStep::Delta { scale_factor, rotation_delta }
    }

    /// Drop the active session, if any.
    pub fn end(&mut self) {
        if let Some(session) = self.active.take() {
            debug!(id = %session.id, "pinch session ended");
        }
    }

    /// The active session, if a pinch is in progress.
    #[must_use]
    pub fn active(&self) -> Option<&GestureSession> {
        self.active.as_ref()
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
