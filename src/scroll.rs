//! Scroll policy: where to put the viewport after selecting an entry

use serde::{Deserialize, Serialize};

/// How the viewport follows the selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollStyle {
    /// Scroll just enough to reveal the entry on the side it came from
    #[default]
    Directional,
    /// Flip a whole page when the entry leaves the viewport
    Page,
    /// Always put the entry at the top
    Top,
    /// Only scroll when the entry is entirely offscreen, then align its top
    Legacy,
}

/// Visible part of the page, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub top: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Vertical extent of an entry, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryBounds {
    pub top: f64,
    pub bottom: f64,
}

impl EntryBounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// New viewport top for `bounds`, or `None` to leave the viewport alone
pub fn resolve(style: ScrollStyle, viewport: Viewport, bounds: EntryBounds) -> Option<f64> {
    let above = bounds.top < viewport.top;
    let below = bounds.bottom > viewport.bottom();

    let target = match style {
        ScrollStyle::Directional => {
            if above {
                Some(bounds.top)
            } else if below {
                if bounds.height() > viewport.height {
                    Some(bounds.top)
                } else {
                    Some(bounds.bottom - viewport.height)
                }
            } else {
                None
            }
        }
        ScrollStyle::Page => {
            if below {
                Some(bounds.top)
            } else if above {
                Some(bounds.bottom - viewport.height)
            } else {
                None
            }
        }
        ScrollStyle::Top => Some(bounds.top),
        ScrollStyle::Legacy => {
            let offscreen = bounds.bottom < viewport.top || bounds.top > viewport.bottom();
            offscreen.then_some(bounds.top)
        }
    };

    target.map(|top| top.max(0.0))
}
