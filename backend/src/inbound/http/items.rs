//! HTML item screens.
//!
//! ```text
//! GET  /validation/items
//! GET  /validation/items/{item_id}[?status=true]
//! GET  /validation/items/add
//! POST /validation/items/add
//! GET  /validation/items/{item_id}/edit
//! POST /validation/items/{item_id}/edit
//! ```
//!
//! A rejected submission re-renders its form with status 200. A stored item
//! answers with `303 See Other` pointing at the item page.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::validation::{ErrorCollection, RuleSet};
use crate::domain::{ApiResult, ITEM_OBJECT, ItemCandidate, ItemId, WriteOutcome};
use crate::inbound::http::binding::{Binding, ItemForm};
use crate::inbound::http::locale::RequestLocale;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, FormErrors, FormMode, FormValues};

/// Query string of the item page.
#[derive(Debug, Default, Deserialize)]
pub struct ItemPageQuery {
    /// Set after a successful create to show the "Saved" banner.
    #[serde(default)]
    pub status: bool,
}

/// Location of an item page.
///
/// # Examples
/// ```
/// use item_catalogue::domain::ItemId;
/// use item_catalogue::inbound::http::items::item_location;
///
/// assert_eq!(item_location(ItemId::new(3), true), "/validation/items/3?status=true");
/// assert_eq!(item_location(ItemId::new(3), false), "/validation/items/3");
/// ```
pub fn item_location(id: ItemId, saved: bool) -> String {
    if saved {
        format!("/validation/items/{id}?status=true")
    } else {
        format!("/validation/items/{id}")
    }
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn form_page(
    state: &HttpState,
    mode: FormMode,
    candidate: &ItemCandidate,
    errors: &ErrorCollection,
    locale: &RequestLocale,
) -> HttpResponse {
    let values = FormValues::from_binding(candidate, errors);
    let messages = FormErrors::resolve(errors, &state.messages, locale.as_deref());
    html(views::item_form(mode, &values, &messages))
}

/// List every item.
#[get("/items")]
pub async fn list_items(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let items = state.items.list().await?;
    Ok(html(views::item_list(&items)))
}

/// Show one item.
#[get("/items/{item_id}")]
pub async fn show_item(
    state: web::Data<HttpState>,
    path: web::Path<ItemId>,
    query: web::Query<ItemPageQuery>,
) -> ApiResult<HttpResponse> {
    let item = state.items.get(path.into_inner()).await?;
    Ok(html(views::item_detail(&item, query.status)))
}

/// Empty add form.
#[get("/items/add")]
pub async fn add_form() -> HttpResponse {
    html(views::item_form(
        FormMode::Add,
        &FormValues::default(),
        &FormErrors::default(),
    ))
}

/// Create an item from a form post.
#[post("/items/add")]
pub async fn add_item(
    state: web::Data<HttpState>,
    locale: RequestLocale,
    form: web::Form<ItemForm>,
) -> ApiResult<HttpResponse> {
    let Binding { candidate, errors } = form.bind(RuleSet::Save);
    match state.items.create(&candidate, errors).await? {
        WriteOutcome::Persisted(item) => Ok(see_other(item_location(item.id(), true))),
        WriteOutcome::Rejected(errors) => Ok(form_page(
            &state,
            FormMode::Add,
            &candidate,
            &errors,
            &locale,
        )),
    }
}

/// Edit form pre-filled from the stored item.
#[get("/items/{item_id}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    locale: RequestLocale,
    path: web::Path<ItemId>,
) -> ApiResult<HttpResponse> {
    let item = state.items.get(path.into_inner()).await?;
    Ok(form_page(
        &state,
        FormMode::Edit(item.id()),
        &ItemCandidate::from_item(&item),
        &ErrorCollection::new(ITEM_OBJECT),
        &locale,
    ))
}

/// Update an item from a form post.
#[post("/items/{item_id}/edit")]
pub async fn edit_item(
    state: web::Data<HttpState>,
    locale: RequestLocale,
    path: web::Path<ItemId>,
    form: web::Form<ItemForm>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let Binding { candidate, errors } = form.bind(RuleSet::Update);
    match state.items.update(id, &candidate, errors).await? {
        WriteOutcome::Persisted(item) => Ok(see_other(item_location(item.id(), false))),
        WriteOutcome::Rejected(errors) => Ok(form_page(
            &state,
            FormMode::Edit(id),
            &candidate,
            &errors,
            &locale,
        )),
    }
}
