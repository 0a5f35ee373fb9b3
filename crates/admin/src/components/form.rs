//! Modal form component types.

use maktaba_client::ResourceKind;

/// How a field is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    /// Decimal amount.
    Price,
    TextArea,
    /// One of a fixed list of values.
    Select(Vec<String>),
    /// Typed URL or glyph, or an uploaded image (`{name}_file`).
    Artwork,
}

/// One input in a create/edit form.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
    pub value: String,
    pub required: bool,
}

impl FormField {
    /// Create a required text field.
    #[must_use]
    pub fn text(name: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            name,
            label,
            input: FieldInput::Text,
            value: value.to_string(),
            required: true,
        }
    }

    #[must_use]
    pub fn price(name: &'static str, label: &'static str, value: String) -> Self {
        Self {
            input: FieldInput::Price,
            value,
            ..Self::text(name, label, "")
        }
    }

    #[must_use]
    pub fn textarea(name: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            input: FieldInput::TextArea,
            ..Self::text(name, label, value)
        }
    }

    #[must_use]
    pub fn select(
        name: &'static str,
        label: &'static str,
        options: Vec<String>,
        value: &str,
    ) -> Self {
        Self {
            input: FieldInput::Select(options),
            ..Self::text(name, label, value)
        }
    }

    /// Artwork is never required: empty falls back to a glyph.
    #[must_use]
    pub fn artwork(name: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            input: FieldInput::Artwork,
            required: false,
            ..Self::text(name, label, value)
        }
    }

    #[must_use]
    pub fn is_textarea(&self) -> bool {
        self.input == FieldInput::TextArea
    }

    #[must_use]
    pub fn is_artwork(&self) -> bool {
        self.input == FieldInput::Artwork
    }

    /// Choices for a select; `None` for every other input.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        match &self.input {
            FieldInput::Select(options) => Some(options),
            _ => None,
        }
    }

    /// `type` attribute for plain inputs.
    #[must_use]
    pub const fn input_type(&self) -> &'static str {
        match self.input {
            FieldInput::Price => "number",
            _ => "text",
        }
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}_file", self.name)
    }
}

/// A create or edit modal.
#[derive(Debug, Clone)]
pub struct FormView {
    pub kind: ResourceKind,
    /// `None` when creating.
    pub id: Option<i32>,
    pub fields: Vec<FormField>,
}

impl FormView {
    #[must_use]
    pub fn title(&self) -> String {
        let noun = self.kind.noun();
        match self.id {
            Some(_) => format!("Edit {noun}"),
            None => format!("New {noun}"),
        }
    }

    /// Where the form posts.
    #[must_use]
    pub fn action(&self) -> String {
        match self.id {
            Some(id) => format!("/admin/{}/{id}", self.kind),
            None => format!("/admin/{}", self.kind),
        }
    }
}
