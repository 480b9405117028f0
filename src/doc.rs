//! Document model: placed stickers, canvas bounds, and the transform store.
//!
//! This module defines what is on the canvas (`PlacedObject`), the size of the
//! surface it lives on (`CanvasBounds`), and the runtime store that owns every
//! live sticker (`DocStore`).
//!
//! The store is the only writer of sticker state. Insertion order is draw order:
//! later stickers render above earlier ones. Operations on an unknown id are
//! silent no-ops, since touch events routinely arrive for a sticker that was
//! deleted a frame earlier.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::geom::Point;

/// Unique identifier for a placed sticker.
pub type ObjectId = Uuid;

/// Pixel dimensions of the rendering surface, as reported by host layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    /// Build bounds, treating negative or non-finite sizes as zero.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width: sanitize_extent(width), height: sanitize_extent(height) }
    }

    /// Largest in-bounds top-left position for an item of edge `size`.
    #[must_use]
    pub fn max_position(&self, size: f64) -> Point {
        Point { x: (self.width - size).max(0.0), y: (self.height - size).max(0.0) }
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// One emoji sticker on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Unique identifier, stable for the sticker's lifetime.
    pub id: ObjectId,
    /// Emoji or glyph to render. Never changes after creation.
    pub symbol: String,
    /// Top-left corner in canvas-local coordinates.
    pub position: Point,
    /// Absolute scale factor; 1.0 renders at the configured icon size.
    pub scale: f64,
    /// Accumulated clockwise rotation in degrees. Not normalized.
    pub rotation: f64,
    /// Whether the sticker shows its delete affordance.
    pub selected: bool,
}

impl PlacedObject {
    /// Rotation folded into `[0, 360)` for display.
    #[must_use]
    pub fn display_rotation(&self) -> f64 {
        let r = self.rotation.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs.
        if r >= 360.0 { 0.0 } else { r }
    }
}

/// Ordered store of placed stickers.
pub struct DocStore {
    objects: Vec<PlacedObject>,
    bounds: CanvasBounds,
    config: EngineConfig,
}

impl DocStore {
    /// Create an empty store with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an empty store using the given limits.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { objects: Vec::new(), bounds: CanvasBounds::default(), config: config.validated() }
    }

    /// Current canvas bounds used for clamping moves.
    #[must_use]
    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    /// Record new canvas bounds. Existing positions are left as they are; the
    /// next move on each sticker clamps it into the new bounds.
    pub fn set_bounds(&mut self, bounds: CanvasBounds) {
        self.bounds = CanvasBounds::new(bounds.width, bounds.height);
    }

    /// Append a sticker centered on the canvas and make it the only selection.
    pub fn create_object(&mut self, symbol: &str, bounds: CanvasBounds) -> PlacedObject {
        let bounds = CanvasBounds::new(bounds.width, bounds.height);
        self.bounds = bounds;
        let half = self.config.icon_size / 2.0;
        let obj = PlacedObject {
            id: Uuid::new_v4(),
            symbol: symbol.to_owned(),
            position: Point { x: bounds.width / 2.0 - half, y: bounds.height / 2.0 - half },
            scale: 1.0,
            rotation: 0.0,
            selected: true,
        };
        for existing in &mut self.objects {
            existing.selected = false;
        }
        info!(id = %obj.id, symbol, x = obj.position.x, y = obj.position.y, "sticker created");
        self.objects.push(obj.clone());
        obj
    }

    /// Select `id` and deselect everything else.
    ///
    /// An unknown id still clears every other selection. Returns whether the id
    /// matched a sticker.
    pub fn select(&mut self, id: &ObjectId) -> bool {
        let mut found = false;
        for obj in &mut self.objects {
            obj.selected = obj.id == *id;
            found |= obj.selected;
        }
        found
    }

    /// Remove a sticker by id, returning it if it was present.
    pub fn delete(&mut self, id: &ObjectId) -> Option<PlacedObject> {
        let idx = self.objects.iter().position(|o| o.id == *id)?;
        let removed = self.objects.remove(idx);
        info!(%id, "sticker deleted");
        Some(removed)
    }

    /// Translate a sticker, then clamp it inside the canvas.
    ///
    /// Each axis clamps independently, so a diagonal drag past one edge keeps
    /// sliding along the other. Returns the new position, or `None` if the id is
    /// unknown.
    pub fn move_by(&mut self, id: &ObjectId, dx: f64, dy: f64) -> Option<Point> {
        let max = self.bounds.max_position(self.config.icon_size);
        let obj = self.objects.iter_mut().find(|o| o.id == *id)?;
        let dx = if dx.is_finite() { dx } else { 0.0 };
        let dy = if dy.is_finite() { dy } else { 0.0 };
        obj.position = Point {
            x: (obj.position.x + dx).clamp(0.0, max.x),
            y: (obj.position.y + dy).clamp(0.0, max.y),
        };
        debug!(%id, x = obj.position.x, y = obj.position.y, "sticker moved");
        Some(obj.position)
    }

    /// Multiply a sticker's scale (clamped to the configured limits) and add a
    /// rotation delta (unclamped).
    ///
    /// Non-finite inputs count as "no change". Returns the new
    /// `(scale, rotation)`, or `None` if the id is unknown.
    pub fn apply_pinch(&mut self, id: &ObjectId, scale_factor: f64, rotation_delta: f64) -> Option<(f64, f64)> {
        let (min, max) = (self.config.min_scale, self.config.max_scale);
        let obj = self.objects.iter_mut().find(|o| o.id == *id)?;
        let factor = if scale_factor.is_finite() { scale_factor } else { 1.0 };
        let delta = if rotation_delta.is_finite() { rotation_delta } else { 0.0 };
        obj.scale = (obj.scale * factor).clamp(min, max);
        obj.rotation += delta;
        debug!(%id, scale = obj.scale, rotation = obj.rotation, "sticker transformed");
        Some((obj.scale, obj.rotation))
    }

    /// Copy of every sticker in creation (draw) order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PlacedObject> {
        self.objects.clone()
    }

    /// Iterate stickers in creation (draw) order without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter()
    }

    /// Return a reference to a sticker by id.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    /// The selected sticker, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.selected)
    }

    /// Remove every sticker.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Number of stickers currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store contains no stickers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
