//! Book position <-> content image index mapping

use crate::types::{BookConfig, CoverContent, PageKind};

impl BookConfig {
    /// Check if a book position shows a content image
    pub fn is_content_position(&self, pos: u32) -> bool {
        pos > self.front_cover_pages && pos <= self.front_cover_pages + self.content_pages
    }

    /// Convert a book position to its content image index (None for covers)
    pub fn position_to_image_index(&self, pos: u32) -> Option<u32> {
        if !self.is_content_position(pos) {
            return None;
        }
        Some(pos - self.front_cover_pages)
    }

    /// Convert a content image index to its book position.
    ///
    /// The index is not validated; callers check `1..=content_pages` first.
    pub fn image_index_to_position(&self, idx: u32) -> u32 {
        idx + self.front_cover_pages
    }

    /// First position belonging to the back cover
    pub fn back_cover_start(&self) -> u32 {
        self.total_positions() - self.back_cover_pages + 1
    }

    pub fn first_content_position(&self) -> u32 {
        self.front_cover_pages + 1
    }

    pub fn last_content_position(&self) -> u32 {
        self.front_cover_pages + self.content_pages
    }

    pub fn classify_position(&self, pos: u32) -> PageKind {
        if pos == 0 || pos > self.total_positions() {
            PageKind::Outside
        } else if pos <= self.front_cover_pages {
            PageKind::FrontCover
        } else if self.is_content_position(pos) {
            PageKind::Content
        } else {
            PageKind::BackCover
        }
    }

    /// Printed content of a cover face, None for content positions
    pub fn cover_content(&self, pos: u32) -> Option<CoverContent> {
        match self.classify_position(pos) {
            PageKind::FrontCover => Some(match pos {
                1 => CoverContent::FrontOuter,
                2 => CoverContent::FrontInner,
                _ => CoverContent::Blank,
            }),
            PageKind::BackCover => {
                let total = self.total_positions();
                Some(if pos == total {
                    CoverContent::BackOuter
                } else if pos + 1 == total {
                    CoverContent::BackInner
                } else {
                    CoverContent::Blank
                })
            }
            PageKind::Content | PageKind::Outside => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_default_book() {
        let config = BookConfig::new(2, 4, 2);

        assert_eq!(config.classify_position(0), PageKind::Outside);
        assert_eq!(config.classify_position(1), PageKind::FrontCover);
        assert_eq!(config.classify_position(2), PageKind::FrontCover);
        assert_eq!(config.classify_position(3), PageKind::Content);
        assert_eq!(config.classify_position(6), PageKind::Content);
        assert_eq!(config.classify_position(7), PageKind::BackCover);
        assert_eq!(config.classify_position(8), PageKind::BackCover);
        assert_eq!(config.classify_position(9), PageKind::Outside);
    }

    #[test]
    fn test_cover_content() {
        let config = BookConfig::new(2, 4, 2);

        assert_eq!(config.cover_content(1), Some(CoverContent::FrontOuter));
        assert_eq!(config.cover_content(2), Some(CoverContent::FrontInner));
        assert_eq!(config.cover_content(3), None);
        assert_eq!(config.cover_content(7), Some(CoverContent::BackInner));
        assert_eq!(config.cover_content(8), Some(CoverContent::BackOuter));
    }

    #[test]
    fn test_no_covers() {
        let config = BookConfig::new(0, 3, 0);

        assert_eq!(config.position_to_image_index(1), Some(1));
        assert_eq!(config.position_to_image_index(3), Some(3));
        assert_eq!(config.back_cover_start(), 4);
        assert_eq!(config.classify_position(3), PageKind::Content);
    }
}
