//! Shared numeric defaults for the sticker engine.
//!
//! These seed [`crate::config::EngineConfig::default`]; runtime code reads the
//! config rather than the constants directly.

// ── Layout ──────────────────────────────────────────────────────

/// Rendered edge length of a sticker at scale 1.0, in canvas pixels.
pub const ICON_SIZE: f64 = 40.0;

// ── Transform limits ────────────────────────────────────────────

/// Smallest absolute scale a sticker may reach.
pub const MIN_SCALE: f64 = 0.5;

/// Largest absolute scale a sticker may reach.
pub const MAX_SCALE: f64 = 3.0;

/// Lower bound for the scale ratio applied by a single pinch event.
pub const PINCH_STEP_MIN: f64 = 0.8;

/// Upper bound for the scale ratio applied by a single pinch event.
pub const PINCH_STEP_MAX: f64 = 1.25;

// ── Image intake ────────────────────────────────────────────────

/// Picked images larger than this (5 MiB) are resized before use.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Target width for oversized images.
pub const RESIZE_WIDTH: u32 = 1200;

// ── Actor ───────────────────────────────────────────────────────

/// Bounded capacity of the engine command queue.
pub const COMMAND_QUEUE_CAPACITY: usize = 256;
