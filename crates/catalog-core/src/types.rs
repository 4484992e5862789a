use crate::constants::*;
use crate::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// Structural shape of the virtual book.
///
/// Positions are 1-based and run through the front cover faces, the content
/// images and the back cover faces in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
    /// Number of real content images (at least 1)
    pub content_pages: u32,
    /// Front cover faces placed before the content
    pub front_cover_pages: u32,
    /// Back cover faces placed after the content
    pub back_cover_pages: u32,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            content_pages: DEFAULT_CONTENT_PAGES,
            front_cover_pages: DEFAULT_FRONT_COVER_PAGES,
            back_cover_pages: DEFAULT_BACK_COVER_PAGES,
        }
    }
}

impl BookConfig {
    pub fn new(front_cover_pages: u32, content_pages: u32, back_cover_pages: u32) -> Self {
        Self {
            content_pages,
            front_cover_pages,
            back_cover_pages,
        }
    }

    /// Front cover + content + back cover
    pub fn total_positions(&self) -> u32 {
        self.front_cover_pages + self.content_pages + self.back_cover_pages
    }

    pub fn validate(&self) -> Result<()> {
        if self.content_pages == 0 {
            return Err(CatalogError::Config(
                "A catalog needs at least one content page".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `pos` lies inside `[1, total_positions]`
    pub fn contains(&self, pos: u32) -> bool {
        pos >= 1 && pos <= self.total_positions()
    }
}

/// Where a single book position sits in the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    FrontCover,
    Content,
    BackCover,
    /// Not a position of this book (0 or past the end)
    Outside,
}

/// Single page (narrow viewports) or two-page spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    Single,
    #[default]
    Double,
}

/// Semantic kind of the current view window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    FrontCover,
    BackCover,
    Spread,
}

/// Fixed content printed on the hard cover faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverContent {
    /// Outer front cover with the catalog title
    FrontOuter,
    /// Inside of the front cover
    FrontInner,
    /// Inside of the back cover
    BackInner,
    /// Outer back cover
    BackOuter,
    /// Any additional structural face
    Blank,
}

impl CoverContent {
    pub fn heading(self) -> Option<&'static str> {
        match self {
            CoverContent::FrontOuter => Some("TABLE ACCESSORIES\nPRODUCT CATALOG"),
            CoverContent::FrontInner => Some("About this catalog"),
            CoverContent::BackInner => Some("Company Information"),
            CoverContent::BackOuter => Some("Thank you"),
            CoverContent::Blank => None,
        }
    }

    pub fn paragraphs(self) -> &'static [&'static str] {
        match self {
            CoverContent::FrontInner => &[
                "This catalog introduces our latest table accessories, designed for professional and commercial use.",
                "All products are available for bulk orders and custom specifications.",
            ],
            CoverContent::BackInner => &[
                "Thank you for viewing our catalog. For inquiries, please contact us using the information below.",
                "Email: info@example.com\nWebsite: www.example.com",
            ],
            _ => &[],
        }
    }
}
