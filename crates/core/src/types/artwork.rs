//! Classification of product images and ad/offer icons.
//!
//! The backend stores a single free-form string for artwork: a remote URL, an
//! inline `data:image` URL, a bundled `logo.*` asset, or just a glyph such as
//! an emoji. Rendering needs to know which one it has.

use serde::{Deserialize, Serialize};

/// Which kind of record the artwork belongs to; decides the fallback glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkKind {
    Product,
    Category,
    Ad,
    Offer,
}

impl ArtworkKind {
    /// Glyph shown when artwork is missing or an image fails to load.
    #[must_use]
    pub const fn fallback_glyph(self) -> &'static str {
        match self {
            Self::Product => "📚",
            Self::Category => "📁",
            Self::Ad => "🎉",
            Self::Offer => "🎁",
        }
    }
}

/// Resolved artwork for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artwork {
    /// Something an `<img>` can load, with a glyph to swap in on error.
    Image { src: String, fallback: &'static str },
    /// Text rendered as-is.
    Glyph(String),
}

impl Artwork {
    /// Classify a stored artwork value.
    #[must_use]
    pub fn classify(value: Option<&str>, kind: ArtworkKind) -> Self {
        match value.map(str::trim) {
            Some(v) if is_loadable(v) => Self::Image {
                src: v.to_owned(),
                fallback: kind.fallback_glyph(),
            },
            Some(v) if !v.is_empty() => Self::Glyph(v.to_owned()),
            _ => Self::Glyph(kind.fallback_glyph().to_owned()),
        }
    }

    /// The image source, if this artwork is loadable.
    #[must_use]
    pub fn image_src(&self) -> Option<&str> {
        match self {
            Self::Image { src, .. } => Some(src),
            Self::Glyph(_) => None,
        }
    }

    /// The glyph to show: the artwork itself, or the fallback for images.
    #[must_use]
    pub fn glyph(&self) -> &str {
        match self {
            Self::Image { fallback, .. } => fallback,
            Self::Glyph(glyph) => glyph,
        }
    }
}

fn is_loadable(value: &str) -> bool {
    value.starts_with("http") || value.starts_with("data:image") || value.starts_with("logo.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_and_data_urls_are_images() {
        let art = Artwork::classify(Some("https://cdn.example/pen.png"), ArtworkKind::Product);
        assert_eq!(art.image_src(), Some("https://cdn.example/pen.png"));
        assert_eq!(art.glyph(), "📚");

        let art = Artwork::classify(Some("data:image/png;base64,AAAA"), ArtworkKind::Ad);
        assert!(art.image_src().is_some());
        assert_eq!(art.glyph(), "🎉");

        let art = Artwork::classify(Some("logo.png"), ArtworkKind::Offer);
        assert!(art.image_src().is_some());
    }

    #[test]
    fn test_glyphs_render_as_text() {
        let art = Artwork::classify(Some("✏️"), ArtworkKind::Product);
        assert_eq!(art, Artwork::Glyph("✏️".to_string()));
    }

    #[test]
    fn test_missing_artwork_falls_back_per_kind() {
        assert_eq!(Artwork::classify(None, ArtworkKind::Offer).glyph(), "🎁");
        assert_eq!(Artwork::classify(Some("  "), ArtworkKind::Category).glyph(), "📁");
    }
}
