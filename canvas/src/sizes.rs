//! Canvas-size catalog and layout classes.
//!
//! Each size's `id` doubles as the key under which per-size overrides are
//! stored. The layout class drives the template's default composition.

#[cfg(test)]
#[path = "sizes_test.rs"]
mod sizes_test;

use serde::Serialize;

use crate::camera::Size;

/// One exportable ad canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasSize {
    pub id: &'static str,
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    #[must_use]
    pub fn layout_class(&self) -> LayoutClass {
        LayoutClass::of(self.size())
    }

    /// `"1080 × 1080"`, as shown under each size tab.
    #[must_use]
    pub fn dimensions_label(&self) -> String {
        format!("{} × {}", self.width, self.height)
    }
}

pub const AD_SIZES: [CanvasSize; 5] = [
    CanvasSize { id: "meta-feed", label: "Meta Feed", width: 1080, height: 1080 },
    CanvasSize { id: "portrait", label: "Portrait", width: 1080, height: 1350 },
    CanvasSize { id: "story", label: "Story", width: 1080, height: 1920 },
    CanvasSize { id: "landscape", label: "Landscape", width: 1200, height: 628 },
    CanvasSize { id: "youtube-thumb", label: "YouTube Thumb", width: 1280, height: 720 },
];

pub const DEFAULT_AD_SIZE: CanvasSize = AD_SIZES[0];

/// Look up a catalog entry by id.
#[must_use]
pub fn find_size(id: &str) -> Option<CanvasSize> {
    AD_SIZES.iter().copied().find(|s| s.id == id)
}

/// Coarse aspect bucket a template composes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutClass {
    Wide,
    Tall,
    Square,
}

impl LayoutClass {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::Tall => "tall",
            Self::Square => "square",
        }
    }

    /// Classify a canvas. Tall wins over square, square over wide.
    #[must_use]
    pub fn of(size: Size) -> Self {
        if size.width <= 0.0 || size.height <= 0.0 {
            return Self::Square;
        }
        let ratio = size.width / size.height;
        if size.height / size.width > 1.1 {
            Self::Tall
        } else if (ratio - 1.0).abs() < 0.15 {
            Self::Square
        } else {
            Self::Wide
        }
    }
}
