//! Subcommand implementations.
//!
//! Every command reads through [`CatalogApi`](maktaba_client::CatalogApi)
//! and writes to an [`Output`], so the same code runs against the REST
//! backend and the in-memory catalog used by the tests.

use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use maktaba_client::ApiError;
use maktaba_core::CurrencyCode;

pub mod catalog;
pub mod report;

/// Errors that end a command with exit status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("could not write output: {0}")]
    Io(#[from] io::Error),

    #[error("could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How records are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Tab-separated columns.
    Text,
    /// One JSON object per line.
    Json,
}

/// Line-oriented writer for command results.
pub struct Output<W> {
    writer: W,
    format: Format,
    currency: CurrencyCode,
}

impl<W: Write> Output<W> {
    pub const fn new(writer: W, format: Format, currency: CurrencyCode) -> Self {
        Self {
            writer,
            format,
            currency,
        }
    }

    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Print `record` as JSON, or `text` in text mode.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn record<T: Serialize>(&mut self, record: &T, text: &str) -> Result<(), CliError> {
        match self.format {
            Format::Text => writeln!(self.writer, "{text}")?,
            Format::Json => {
                serde_json::to_writer(&mut self.writer, record)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    /// A note for people reading text output; skipped in JSON mode.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn note(&mut self, text: &str) -> Result<(), CliError> {
        if self.format == Format::Text {
            writeln!(self.writer, "{text}")?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
