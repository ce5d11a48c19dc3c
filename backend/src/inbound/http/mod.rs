//! HTTP inbound adapter: HTML item screens, the JSON item API and health
//! probes.

pub mod binding;
pub mod error;
pub mod health;
pub mod items;
pub mod items_api;
pub mod locale;
pub mod schemas;
pub mod state;
pub mod views;

use actix_web::web;

pub use crate::domain::ApiResult;

/// Register the `/validation` routes.
///
/// Literal segments such as `/items/add` are registered before the
/// `/items/{item_id}` patterns they would otherwise match.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let api = web::scope("/api")
        .app_data(items_api::json_config())
        .service(items_api::list_items)
        .service(items_api::add_item)
        .service(items_api::get_item);

    cfg.service(
        web::scope("/validation")
            .service(api)
            .service(items::list_items)
            .service(items::add_form)
            .service(items::add_item)
            .service(items::show_item)
            .service(items::edit_form)
            .service(items::edit_item),
    );
}
