//! The sticker palette offered by the host's picker.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::Serialize;

/// One entry in the sticker palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sticker {
    /// Stable palette key.
    pub id: &'static str,
    /// Emoji placed on the canvas when this entry is picked.
    pub symbol: &'static str,
}

/// Every sticker the picker can offer, in display order.
pub const STICKERS: &[Sticker] = &[
    Sticker { id: "1", symbol: "😀" },
    Sticker { id: "2", symbol: "😍" },
    Sticker { id: "3", symbol: "🔥" },
    Sticker { id: "4", symbol: "👍" },
    Sticker { id: "5", symbol: "🎉" },
    Sticker { id: "6", symbol: "🚀" },
    Sticker { id: "7", symbol: "🌈" },
    Sticker { id: "8", symbol: "💯" },
    Sticker { id: "9", symbol: "🤩" },
    Sticker { id: "10", symbol: "🦄" },
    Sticker { id: "11", symbol: "🍕" },
    Sticker { id: "12", symbol: "⭐" },
    Sticker { id: "13", symbol: "❤️" },
    Sticker { id: "14", symbol: "👏" },
    Sticker { id: "15", symbol: "🎸" },
    Sticker { id: "16", symbol: "🏆" },
];

/// Look up a palette entry by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static Sticker> {
    STICKERS.iter().find(|s| s.id == id)
}
