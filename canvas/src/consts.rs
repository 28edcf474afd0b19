//! Shared numeric constants for the canvas crate.

// ── Scale ───────────────────────────────────────────────────────

/// Floor applied to every caller-supplied canvas scale before dividing by it.
pub const MIN_CANVAS_SCALE: f64 = 0.1;

/// Floor applied to a gesture's starting height when deriving its aspect ratio.
pub const MIN_ASPECT_DENOMINATOR: f64 = 1.0;

// ── Freeform overlay ────────────────────────────────────────────

/// Side length used to derive an overlay's initial square when no size is recorded.
pub const DEFAULT_OVERLAY_SIZE: f64 = 350.0;

/// Minimum overlay width during a resize. Height follows from the aspect ratio.
pub const OVERLAY_MIN_WIDTH: f64 = 100.0;

/// Fraction of its own size an overlay may travel past each canvas edge.
pub const OVERLAY_OVERHANG: f64 = 0.5;

/// z-index of an overlay brought to the front.
pub const Z_FRONT: i32 = 50;

/// z-index of an overlay sent to the back.
pub const Z_BACK: i32 = 1;

// ── Template elements ───────────────────────────────────────────

/// Minimum width and height of an image element.
pub const IMAGE_MIN_SIZE: f64 = 50.0;

/// Fallback width/height when neither an override nor a default is known.
pub const FALLBACK_IMAGE_SIZE: f64 = 200.0;

/// Fallback font size when neither an override nor a default is known.
pub const FALLBACK_FONT_SIZE: f64 = 40.0;

/// Font size change per canvas pixel of handle travel.
pub const FONT_SIZE_PER_PX: f64 = 0.5;

pub const FONT_SIZE_MIN: f64 = 10.0;
pub const FONT_SIZE_MAX: f64 = 200.0;

/// Scale change per canvas pixel of handle travel.
pub const SCALE_PER_PX: f64 = 0.003;

pub const SCALE_MIN: f64 = 0.3;
pub const SCALE_MAX: f64 = 3.0;

/// z-index a selected element is lifted to while editing.
pub const SELECTED_Z_INDEX: i32 = 100;

// ── Chrome (screen pixels, divided by the canvas scale at render time) ──

/// Side length of a resize handle.
pub const HANDLE_SIZE_PX: f64 = 10.0;

/// Width of the selection border and handle outline.
pub const BORDER_WIDTH_PX: f64 = 2.0;

/// Corner radius of the selection border.
pub const BORDER_RADIUS_PX: f64 = 4.0;

/// Diameter of the overlay delete button.
pub const DELETE_BUTTON_PX: f64 = 24.0;

/// Distance from the element's top edge to the Reset button.
pub const RESET_BUTTON_OFFSET_PX: f64 = 28.0;

/// Distance from the overlay's bottom edge to the dimension tooltip.
pub const TOOLTIP_OFFSET_PX: f64 = 28.0;

/// Extra screen-space slop around handles when hit-testing.
pub const HANDLE_HIT_SLOP_PX: f64 = 4.0;

// ── Popups (fixed screen coordinates) ───────────────────────────

/// Horizontal offset of the quick-swap palette from the cursor.
pub const QUICK_SWAP_OFFSET_X: f64 = 8.0;

/// Vertical offset of the quick-swap palette from the cursor.
pub const QUICK_SWAP_OFFSET_Y: f64 = -60.0;

/// Columns in the quick-swap grid.
pub const QUICK_SWAP_COLUMNS: usize = 3;

// ── Template defaults ───────────────────────────────────────────

/// Canvas short side the template's font sizes were designed against.
pub const TEMPLATE_BASE_SIDE: f64 = 563.0;

/// Asset directory the expression manifest's file names are relative to.
pub const DEFAULT_ASSET_BASE: &str = "/assets/founders";
