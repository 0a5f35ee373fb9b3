//! Create/edit form submissions.
//!
//! The CRUD modals post `multipart/form-data` so that an image or icon can be
//! either typed (URL or glyph) or uploaded. [`FormData`] is the decoded
//! submission; each resource turns it into its write payload and reports a
//! [`FormError`] before anything is sent to the API.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;
use base64::{Engine, engine::general_purpose::STANDARD};
use rust_decimal::Decimal;
use thiserror::Error;

use maktaba_core::ArtworkKind;

/// A submission rejected before reaching the API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Price must be a non-negative number, got \"{0}\"")]
    InvalidPrice(String),

    #[error("Uploaded file is not an image")]
    NotAnImage,

    #[error("Could not read the form: {0}")]
    Malformed(String),
}

/// An uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Inline the file as a `data:` URL.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

/// Decoded form fields. Empty uploads (no file chosen) are dropped.
#[derive(Debug, Default, Clone)]
pub struct FormData {
    text: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl FormData {
    /// Read every part of a multipart body.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Malformed`] if the body cannot be decoded.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, FormError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| FormError::Malformed(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if field.file_name().is_some() {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Malformed(e.body_text()))?;
                if !bytes.is_empty() {
                    form.files.insert(
                        name,
                        Upload {
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| FormError::Malformed(e.body_text()))?;
                form.text.insert(name, value);
            }
        }
        Ok(form)
    }

    #[must_use]
    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.text.insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn with_file(mut self, name: &str, upload: Upload) -> Self {
        self.files.insert(name.to_owned(), upload);
        self
    }

    /// Trimmed text value; empty when absent.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        self.text.get(name).map_or("", |v| v.trim())
    }

    /// A non-empty text value.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Missing`] naming `label`.
    pub fn required(&self, name: &str, label: &'static str) -> Result<String, FormError> {
        let value = self.text(name);
        if value.is_empty() {
            return Err(FormError::Missing(label));
        }
        Ok(value.to_owned())
    }

    /// A required, non-negative price.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Missing`] or [`FormError::InvalidPrice`].
    pub fn price(&self, name: &str) -> Result<Decimal, FormError> {
        let raw = self.required(name, "Price")?;
        match Decimal::from_str(&raw) {
            Ok(price) if !price.is_sign_negative() => Ok(price),
            _ => Err(FormError::InvalidPrice(raw)),
        }
    }

    /// Image or icon value: an upload wins over typed text.
    ///
    /// `{name}_file` holds the upload. With neither, the value is `kind`'s
    /// fallback glyph, or empty when `kind` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotAnImage`] for a non-image upload.
    pub fn artwork(&self, name: &str, kind: Option<ArtworkKind>) -> Result<String, FormError> {
        if let Some(upload) = self.files.get(&format!("{name}_file")) {
            if !upload.content_type.starts_with("image/") {
                return Err(FormError::NotAnImage);
            }
            return Ok(upload.data_url());
        }
        let typed = self.text(name);
        if !typed.is_empty() {
            return Ok(typed.to_owned());
        }
        Ok(kind.map(ArtworkKind::fallback_glyph).unwrap_or_default().to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn png() -> Upload {
        Upload {
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn test_required_trims_and_rejects_blank() {
        let form = FormData::default()
            .with_text("name", "  Ruler ")
            .with_text("title", "   ");

        assert_eq!(form.required("name", "Name").unwrap(), "Ruler");
        assert_eq!(
            form.required("title", "Title"),
            Err(FormError::Missing("Title"))
        );
        assert_eq!(
            form.required("absent", "Discount").unwrap_err().to_string(),
            "Discount is required"
        );
    }

    #[test]
    fn test_price_parsing() {
        let form = FormData::default()
            .with_text("ok", "12.50")
            .with_text("word", "twelve")
            .with_text("negative", "-1");

        assert_eq!(form.price("ok").unwrap(), Decimal::new(1250, 2));
        assert_eq!(
            form.price("word"),
            Err(FormError::InvalidPrice("twelve".to_string()))
        );
        assert!(matches!(
            form.price("negative"),
            Err(FormError::InvalidPrice(_))
        ));
        assert_eq!(form.price("missing"), Err(FormError::Missing("Price")));
    }

    #[test]
    fn test_upload_becomes_data_url_and_wins_over_text() {
        let form = FormData::default()
            .with_text("image", "https://cdn.example/pen.png")
            .with_file("image_file", png());

        let value = form.artwork("image", Some(ArtworkKind::Product)).unwrap();

        assert_eq!(value, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_artwork_falls_back_to_kind_glyph() {
        let form = FormData::default().with_text("icon", " ");

        assert_eq!(form.artwork("icon", Some(ArtworkKind::Ad)).unwrap(), "🎉");
        assert_eq!(form.artwork("icon", Some(ArtworkKind::Offer)).unwrap(), "🎁");
        assert_eq!(form.artwork("image", Some(ArtworkKind::Product)).unwrap(), "📚");
        assert_eq!(form.artwork("icon", None).unwrap(), "");
    }

    #[test]
    fn test_non_image_upload_is_rejected() {
        let form = FormData::default().with_file(
            "icon_file",
            Upload {
                content_type: "application/pdf".to_string(),
                bytes: b"%PDF".to_vec(),
            },
        );

        assert_eq!(form.artwork("icon", None), Err(FormError::NotAnImage));
    }
}
