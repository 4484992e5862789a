use crate::constants::*;
use crate::layout::LayoutGeometry;
use crate::navigation::EngineConfig;
use crate::types::{BookConfig, DisplayMode};
use crate::zoom::ZoomLimits;
use crate::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    // Book shape
    pub book: BookConfig,

    // Images
    pub image_base_path: String,
    pub image_format: String,
    pub preload_range: u32,
    pub image_load_timeout_ms: u64,
    pub retry_count: u32,

    // Page geometry and surrounding chrome
    pub layout: LayoutGeometry,

    // Flip engine
    pub flip_duration_ms: u64,
    pub acceleration: bool,
    pub gradients: bool,
    pub auto_center: bool,
    pub elevation: u32,

    // Input timing
    pub double_tap_prevention_ms: u64,
    pub resize_debounce_ms: u64,
    pub notes_save_delay_ms: u64,

    // First-visit guide
    pub guide_display_ms: u64,

    pub zoom: ZoomLimits,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            book: BookConfig::default(),
            image_base_path: DEFAULT_IMAGE_BASE_PATH.to_string(),
            image_format: DEFAULT_IMAGE_FORMAT.to_string(),
            preload_range: DEFAULT_PRELOAD_RANGE,
            image_load_timeout_ms: DEFAULT_IMAGE_LOAD_TIMEOUT_MS,
            retry_count: DEFAULT_RETRY_COUNT,
            layout: LayoutGeometry::default(),
            flip_duration_ms: DEFAULT_FLIP_DURATION_MS,
            acceleration: true,
            gradients: true,
            auto_center: true,
            elevation: 50,
            double_tap_prevention_ms: DEFAULT_DOUBLE_TAP_PREVENTION_MS,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            notes_save_delay_ms: DEFAULT_NOTES_SAVE_DELAY_MS,
            guide_display_ms: DEFAULT_GUIDE_DISPLAY_MS,
            zoom: ZoomLimits::default(),
        }
    }
}

impl CatalogOptions {
    /// Load options from JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CatalogError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.book.validate()?;

        if self.layout.page_width <= 0.0 || self.layout.page_height <= 0.0 {
            return Err(CatalogError::Config(
                "Page width and height must be positive".to_string(),
            ));
        }

        if self.zoom.min <= 0.0 || self.zoom.min > self.zoom.max {
            return Err(CatalogError::Config(format!(
                "Invalid zoom range {}..{}",
                self.zoom.min, self.zoom.max
            )));
        }

        if self.image_format.is_empty() {
            return Err(CatalogError::Config("Image format is empty".to_string()));
        }

        Ok(())
    }

    pub fn double_tap_interval(&self) -> Duration {
        Duration::from_millis(self.double_tap_prevention_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn notes_save_delay(&self) -> Duration {
        Duration::from_millis(self.notes_save_delay_ms)
    }

    pub fn guide_duration(&self) -> Duration {
        Duration::from_millis(self.guide_display_ms)
    }

    /// Engine settings for a laid-out book
    pub fn engine_config(&self, width: f32, height: f32, display_mode: DisplayMode) -> EngineConfig {
        EngineConfig {
            width,
            height,
            display_mode,
            page_count: self.book.total_positions(),
            duration_ms: self.flip_duration_ms,
        }
    }
}
