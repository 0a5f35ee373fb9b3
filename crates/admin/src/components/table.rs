//! Data table component types.

use maktaba_client::ResourceKind;
use maktaba_core::Artwork;

/// One record in a table.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub id: i32,
    /// Name used in confirmations ("Delete Notebook?").
    pub label: String,
    pub artwork: Option<Artwork>,
    pub cells: Vec<String>,
}

impl TableRow {
    #[must_use]
    pub fn new(id: impl Into<i32>, label: &str) -> Self {
        Self {
            id: id.into(),
            label: label.to_string(),
            artwork: None,
            cells: Vec::new(),
        }
    }

    /// Artwork for the leading column; rows without it show a blank cell.
    #[must_use]
    pub fn artwork(mut self, artwork: Artwork) -> Self {
        self.artwork = Some(artwork);
        self
    }

    #[must_use]
    pub fn cell(mut self, value: impl Into<String>) -> Self {
        self.cells.push(value.into());
        self
    }
}

/// A resource list as rendered on its screen and in refresh fragments.
#[derive(Debug, Clone)]
pub struct Table {
    pub kind: ResourceKind,
    pub columns: &'static [&'static str],
    pub rows: Vec<TableRow>,
}

impl Table {
    /// DOM id shared by the page and its out-of-band refreshes.
    #[must_use]
    pub fn dom_id(&self) -> String {
        format!("table-{}", self.kind)
    }

    /// Base path for this table's row actions.
    #[must_use]
    pub fn base_path(&self) -> String {
        format!("/admin/{}", self.kind)
    }

    /// Shown instead of an empty table.
    #[must_use]
    pub fn empty_message(&self) -> String {
        format!("No {} yet", self.kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
