//! Reusable view components for the admin screens.
//!
//! Every resource renders through the same table and the same modal form;
//! the per-resource differences are data, built in [`crate::resources`].

pub mod form;
pub mod table;

pub use form::{FieldInput, FormField, FormView};
pub use table::{Table, TableRow};
