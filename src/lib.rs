//! Gesture-to-transform engine for a photo sticker editor.
//!
//! The host UI layer places emoji stickers over a photo and forwards raw touch
//! events for the sticker under the user's finger. This crate owns the full
//! lifecycle of those stickers: translating one-finger drags and two-finger
//! pinch/rotate streams into per-object position, scale, and rotation updates,
//! keeping the single selection and single gesture session consistent, and
//! clamping everything into the canvas. Image picking, permissions, and export
//! are contracted to the host through the traits in [`editor`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Gesture dispatcher and testable [`engine::EngineCore`] |
//! | [`doc`] | Sticker types and the ordered transform store |
//! | [`session`] | Pinch baseline tracking between touch-move events |
//! | [`input`] | Touch samples and the dispatcher state machine |
//! | [`geom`] | Points, distances, and angles between touches |
//! | [`catalog`] | The static sticker palette offered by the picker |
//! | [`editor`] | Pick/add/save workflow over host collaborators |
//! | [`actor`] | Single-writer command queue for multi-threaded hosts |
//! | [`config`] | Tunable limits, loaded from the environment |
//! | [`consts`] | Shared numeric defaults (icon size, scale limits, etc.) |

pub mod actor;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod doc;
pub mod editor;
pub mod engine;
pub mod geom;
pub mod input;
pub mod session;
