//! Gesture dispatcher.
//!
//! `EngineCore` is constructed once per canvas and receives every touch event
//! for every sticker, keyed by sticker id. It classifies each move batch by
//! touch count, drives the [`SessionTracker`] for pinches, and writes the
//! resulting deltas into the [`DocStore`]. Each entry point returns the
//! [`Action`]s the host should react to.

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::doc::{CanvasBounds, DocStore, ObjectId, PlacedObject};
use crate::geom::{self, Point};
use crate::input::{GestureMode, InputState, Touch};
use crate::session::{PinchStep, SessionTracker};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ObjectCreated(PlacedObject),
    ObjectMoved { id: ObjectId, position: Point },
    ObjectTransformed { id: ObjectId, scale: f64, rotation: f64 },
    ObjectDeleted { id: ObjectId },
    SelectionChanged(Option<ObjectId>),
    RenderNeeded,
}

/// Core engine state: the transform store, the pinch tracker, and the
/// dispatcher state machine.
pub struct EngineCore {
    pub doc: DocStore,
    pub tracker: SessionTracker,
    pub input: InputState,
    pub config: EngineConfig,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let config = config.validated();
        Self {
            doc: DocStore::with_config(config),
            tracker: SessionTracker::with_config(&config),
            input: InputState::Idle,
            config,
        }
    }

    // --- Viewport ---

    /// Update the canvas dimensions reported by host layout.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        let bounds = CanvasBounds::new(width, height);
        debug!(width = bounds.width, height = bounds.height, "viewport updated");
        self.doc.set_bounds(bounds);
    }

    // --- Store commands ---

    /// Place a new sticker at the center of the current canvas.
    pub fn add_sticker(&mut self, symbol: &str) -> Vec<Action> {
        let bounds = self.doc.bounds();
        let obj = self.doc.create_object(symbol, bounds);
        let id = obj.id;
        vec![Action::ObjectCreated(obj), Action::SelectionChanged(Some(id)), Action::RenderNeeded]
    }

    /// Select a sticker (or clear the selection when `id` is unknown).
    pub fn select(&mut self, id: &ObjectId) -> Vec<Action> {
        let before = self.selection();
        let selected = self.doc.select(id).then_some(*id);
        if before == selected {
            return Vec::new();
        }
        vec![Action::SelectionChanged(selected), Action::RenderNeeded]
    }

    /// Delete a sticker. Ends the gesture if it was the engaged sticker.
    pub fn delete(&mut self, id: &ObjectId) -> Vec<Action> {
        let Some(removed) = self.doc.delete(id) else {
            return Vec::new();
        };
        if self.input.engaged_id() == Some(*id) {
            self.finish_gesture("deleted");
        }
        let mut actions = vec![Action::ObjectDeleted { id: *id }];
        if removed.selected {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove every sticker and drop any gesture in progress.
    pub fn clear(&mut self) -> Vec<Action> {
        self.finish_gesture("cleared");
        let ids: Vec<ObjectId> = self.doc.iter().map(|o| o.id).collect();
        self.doc.clear();
        let mut actions: Vec<Action> = ids.into_iter().map(|id| Action::ObjectDeleted { id }).collect();
        actions.push(Action::SelectionChanged(None));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Gesture events ---

    /// Touch-down on a sticker: engage it and make it the selection.
    pub fn on_gesture_start(&mut self, id: &ObjectId) -> Vec<Action> {
        if let Some(previous) = self.input.engaged_id() {
            // Touch-down without a release; never carry the old baseline over.
            warn!(%previous, next = %id, "gesture started without release");
            self.tracker.end();
        }
        self.input = InputState::Engaged { id: *id, mode: GestureMode::Pending };
        debug!(%id, "gesture started");
        self.select(id)
    }

    /// Touch-move batch for a sticker.
    ///
    /// One touch drags by the host-supplied frame displacement; two touches
    /// pinch and rotate. Any other count is ignored.
    pub fn on_gesture_move(&mut self, id: &ObjectId, touches: &[Touch]) -> Vec<Action> {
        let Some(mode) = GestureMode::for_touch_count(touches.len()) else {
            return Vec::new();
        };
        self.input = InputState::Engaged { id: *id, mode };

        match touches {
            [touch] => self.drag(id, touch),
            [t0, t1] => self.pinch(id, t0.point, t1.point),
            _ => Vec::new(),
        }
    }

    /// Release: drop the pinch session and return to idle.
    pub fn on_gesture_end(&mut self) -> Vec<Action> {
        self.finish_gesture("released");
        Vec::new()
    }

    /// Host interruption: identical to a release.
    pub fn on_gesture_cancel(&mut self) -> Vec<Action> {
        self.finish_gesture("cancelled");
        Vec::new()
    }

    fn drag(&mut self, id: &ObjectId, touch: &Touch) -> Vec<Action> {
        match self.doc.move_by(id, touch.dx, touch.dy) {
            Some(position) => vec![Action::ObjectMoved { id: *id, position }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    fn pinch(&mut self, id: &ObjectId, p0: Point, p1: Point) -> Vec<Action> {
        let points = [p0, p1];
        let distance = geom::distance(&points);
        let angle = geom::angle_degrees(&points);
        let PinchStep::Delta { scale_factor, rotation_delta } = self.tracker.begin_or_continue(*id, distance, angle)
        else {
            return Vec::new();
        };
        match self.doc.apply_pinch(id, scale_factor, rotation_delta) {
            Some((scale, rotation)) => {
                vec![Action::ObjectTransformed { id: *id, scale, rotation }, Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    fn finish_gesture(&mut self, reason: &'static str) {
        self.tracker.end();
        if let InputState::Engaged { id, mode } = self.input {
            debug!(%id, ?mode, reason, "gesture finished");
        }
        self.input = InputState::Idle;
    }

    // --- Queries ---

    /// The currently selected sticker id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.doc.selected().map(|o| o.id)
    }

    /// Look up a sticker by id.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.doc.get(id)
    }

    /// Stickers in draw order, for rendering or export.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PlacedObject> {
        self.doc.snapshot()
    }

    /// Snapshot serialized as a JSON array for hosts that render from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(&self.doc.snapshot())?;
        debug!(count = self.doc.len(), bytes = json.len(), "snapshot serialized");
        Ok(json)
    }

    /// Current dispatcher state.
    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }
}
