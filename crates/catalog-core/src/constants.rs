//! Shared constants for the catalog viewer
//!
//! This module centralizes the default book shape, timing values and
//! storage keys used throughout the viewer.

// =============================================================================
// Book Shape
// =============================================================================

/// Number of real content images in the default catalog
pub const DEFAULT_CONTENT_PAGES: u32 = 4;

/// Front cover positions (outer face + inner face)
pub const DEFAULT_FRONT_COVER_PAGES: u32 = 2;

/// Back cover positions (inner face + outer face)
pub const DEFAULT_BACK_COVER_PAGES: u32 = 2;

/// Native width of one page image in pixels
pub const DEFAULT_PAGE_WIDTH: f32 = 480.0;

/// Native height of one page image in pixels
pub const DEFAULT_PAGE_HEIGHT: f32 = 600.0;

// =============================================================================
// Images
// =============================================================================

pub const DEFAULT_IMAGE_BASE_PATH: &str = "images/";

pub const DEFAULT_IMAGE_FORMAT: &str = "jpg";

/// How many positions on each side of the current one are preloaded first
pub const DEFAULT_PRELOAD_RANGE: u32 = 2;

/// Per-attempt image load timeout (milliseconds)
pub const DEFAULT_IMAGE_LOAD_TIMEOUT_MS: u64 = 10_000;

/// Retries after the first failed attempt
pub const DEFAULT_RETRY_COUNT: u32 = 2;

// =============================================================================
// Timing
// =============================================================================

/// Page-turn animation duration (milliseconds)
pub const DEFAULT_FLIP_DURATION_MS: u64 = 800;

/// Minimum interval between two next/previous commands (milliseconds)
pub const DEFAULT_DOUBLE_TAP_PREVENTION_MS: u64 = 300;

/// Trailing debounce for resize handling (milliseconds)
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 150;

/// Delay before the notes pad is written to storage (milliseconds)
pub const DEFAULT_NOTES_SAVE_DELAY_MS: u64 = 500;

/// How long the first-visit guide stays visible (milliseconds)
pub const DEFAULT_GUIDE_DISPLAY_MS: u64 = 3000;

// =============================================================================
// Layout
// =============================================================================

/// Viewports narrower than this use single-page mode
pub const DEFAULT_MOBILE_BREAKPOINT: f32 = 768.0;

/// Space reserved above the book for the header (pixels)
pub const DEFAULT_TOP_MARGIN: f32 = 60.0;

/// Space reserved below the book for the slider and controls (pixels)
pub const DEFAULT_BOTTOM_MARGIN: f32 = 110.0;

/// Horizontal padding on each side of the book (pixels)
pub const DEFAULT_SIDE_PADDING: f32 = 20.0;

// =============================================================================
// Zoom
// =============================================================================

pub const DEFAULT_ZOOM_MIN: f32 = 1.0;

pub const DEFAULT_ZOOM_MAX: f32 = 3.0;

pub const DEFAULT_ZOOM_STEP: f32 = 0.25;

// =============================================================================
// Storage
// =============================================================================

pub const GUIDE_STORAGE_KEY: &str = "catalog_guide_shown";

pub const SIDEBAR_STORAGE_KEY: &str = "catalog_sidebar";

pub const NOTES_STORAGE_KEY: &str = "catalog_notes";

pub const STICKY_STORAGE_KEY: &str = "catalog_sticky_notes";

/// Query parameter holding the current book position
pub const POSITION_QUERY_PARAM: &str = "pNo";

/// Prefix of sticky note ids; the suffix is the counter value
pub const STICKY_ID_PREFIX: &str = "sticky-";

pub const DEFAULT_STICKY_COLOR: &str = "yellow";

/// Colors offered by the sticky note palette
pub const STICKY_COLORS: [&str; 4] = ["yellow", "pink", "blue", "green"];
