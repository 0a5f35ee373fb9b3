//! Generic list/create/update/delete handlers, one set per collection.
//!
//! Mutation responses carry the re-fetched tables and toasts out of band.
//! The main swap target is the modal: it is emptied when the mutation went
//! through and left alone (`HX-Reswap: none`) when it did not, so the
//! typed input survives a rejected submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    response::{AppendHeaders, IntoResponse, Response},
};
use tracing::instrument;

use maktaba_client::ResourceKind;
use maktaba_core::{CurrencyCode, Notice};

use crate::components::{FormView, Table};
use crate::console::{self, ConsoleUpdate};
use crate::forms::FormData;
use crate::middleware::RequireAdminFlag;
use crate::resources::Editable;
use crate::state::AppState;

/// Collection list page template.
#[derive(Template, WebTemplate)]
#[template(path = "resource.html")]
pub struct ResourceTemplate {
    pub username: String,
    pub current_path: String,
    pub kind: ResourceKind,
    /// `None` when the list could not be fetched.
    pub table: Option<Table>,
    pub notices: Vec<Notice>,
    pub oob: bool,
}

/// Create/edit modal fragment.
#[derive(Template, WebTemplate)]
#[template(path = "fragments/modal.html")]
pub struct ModalFragment {
    pub form: FormView,
    pub notices: Vec<Notice>,
}

/// Result of a mutation: refreshed tables and toasts.
#[derive(Template, WebTemplate)]
#[template(path = "fragments/update.html")]
pub struct UpdateFragment {
    pub tables: Vec<Table>,
    pub notices: Vec<Notice>,
    pub oob: bool,
}

impl UpdateFragment {
    /// Render a console update; keep the modal open unless it saved.
    pub fn respond(update: ConsoleUpdate, currency: CurrencyCode) -> Response {
        let saved = update.saved;
        let fragment = Self {
            tables: update
                .listings
                .iter()
                .map(|listing| listing.table(currency))
                .collect(),
            notices: update.notices,
            oob: true,
        };
        if saved {
            fragment.into_response()
        } else {
            (AppendHeaders([("HX-Reswap", "none")]), fragment).into_response()
        }
    }

    /// Toasts only, leaving the page as it is.
    pub fn notice(notice: Notice) -> Response {
        Self::respond(
            ConsoleUpdate {
                notices: vec![notice],
                ..ConsoleUpdate::default()
            },
            CurrencyCode::default(),
        )
    }
}

/// Collection list page handler.
#[instrument(skip_all, fields(kind = %R::KIND))]
pub async fn index<R: Editable>(
    RequireAdminFlag(flag): RequireAdminFlag,
    State(state): State<AppState>,
) -> ResourceTemplate {
    let update = console::open::<_, R>(state.api()).await;
    ResourceTemplate {
        username: flag.username,
        current_path: format!("/admin/{}", R::KIND),
        kind: R::KIND,
        table: update
            .listing(R::KIND)
            .map(|listing| listing.table(state.config().currency)),
        notices: update.notices,
        oob: false,
    }
}

/// New record modal handler.
#[instrument(skip_all, fields(kind = %R::KIND))]
pub async fn new_form<R: Editable>(
    RequireAdminFlag(_flag): RequireAdminFlag,
    State(state): State<AppState>,
) -> ModalFragment {
    let mut notices = Vec::new();
    let categories = if R::NEEDS_CATEGORIES {
        console::category_choices(state.api(), &mut notices).await
    } else {
        Vec::new()
    };

    ModalFragment {
        form: FormView {
            kind: R::KIND,
            id: None,
            fields: R::form_fields(None, &categories),
        },
        notices,
    }
}

/// Edit modal handler. The record is looked up in a fresh listing.
#[instrument(skip_all, fields(kind = %R::KIND, id = id))]
pub async fn edit_form<R: Editable>(
    RequireAdminFlag(_flag): RequireAdminFlag,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let record = match console::find::<_, R>(state.api(), R::Id::from(id)).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return UpdateFragment::notice(Notice::error(format!(
                "That {} no longer exists",
                R::KIND.noun()
            )));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load record for editing");
            return UpdateFragment::notice(Notice::error(
                e.user_message(&format!("Could not load {}", R::KIND)),
            ));
        }
    };

    let mut notices = Vec::new();
    let categories = if R::NEEDS_CATEGORIES {
        console::category_choices(state.api(), &mut notices).await
    } else {
        Vec::new()
    };

    ModalFragment {
        form: FormView {
            kind: R::KIND,
            id: Some(id),
            fields: R::form_fields(Some(&record), &categories),
        },
        notices,
    }
    .into_response()
}

/// Create handler.
#[instrument(skip_all, fields(kind = %R::KIND))]
pub async fn create<R: Editable>(
    RequireAdminFlag(_flag): RequireAdminFlag,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let update = match read_fields::<R>(multipart).await {
        Ok(fields) => console::create::<_, R>(state.api(), &fields).await,
        Err(rejected) => rejected,
    };
    UpdateFragment::respond(update, state.config().currency)
}

/// Update handler.
#[instrument(skip_all, fields(kind = %R::KIND, id = id))]
pub async fn update<R: Editable>(
    RequireAdminFlag(_flag): RequireAdminFlag,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Response {
    let update = match read_fields::<R>(multipart).await {
        Ok(fields) => console::update::<_, R>(state.api(), R::Id::from(id), &fields).await,
        Err(rejected) => rejected,
    };
    UpdateFragment::respond(update, state.config().currency)
}

/// Delete handler.
#[instrument(skip_all, fields(kind = %R::KIND, id = id))]
pub async fn delete<R: Editable>(
    RequireAdminFlag(_flag): RequireAdminFlag,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let update = console::delete::<_, R>(state.api(), R::Id::from(id)).await;
    UpdateFragment::respond(update, state.config().currency)
}

/// Decode and validate a submission; a rejection is reported without any
/// API call.
async fn read_fields<R: Editable>(multipart: Multipart) -> Result<R::Fields, ConsoleUpdate> {
    let form = FormData::from_multipart(multipart)
        .await
        .map_err(|e| ConsoleUpdate::rejected(&e))?;
    R::parse_form(&form).map_err(|e| {
        tracing::debug!(error = %e, "Form rejected");
        ConsoleUpdate::rejected(&e)
    })
}
