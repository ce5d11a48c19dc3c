//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] covers the JSON item API and the health probes. The HTML
//! screens are not described. Schemas for domain errors come from wrapper
//! types in [`crate::inbound::http::schemas`] so the domain stays free of
//! utoipa.
//!
//! The document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use crate::inbound::http::binding::ItemPayload;
use crate::inbound::http::items_api::{AddItemResponse, ItemDto, ValidationErrorDto};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the item API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Item catalogue API",
        description = "JSON access to the item catalogue with localised validation errors."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::items_api::list_items,
        crate::inbound::http::items_api::get_item,
        crate::inbound::http::items_api::add_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ItemDto,
        ItemPayload,
        ValidationErrorDto,
        AddItemResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "items", description = "Item catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema fields.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/validation/api/items")]
    #[case("/validation/api/items/{item_id}")]
    #[case("/validation/api/items/add")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documented_paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn html_screens_are_not_documented() {
        let doc = ApiDoc::openapi();
        assert!(!doc.paths.paths.contains_key("/validation/items"));
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "message")]
    #[case("ItemDto", "itemName")]
    #[case("ValidationErrorDto", "objectName")]
    #[case("ValidationErrorDto", "codes")]
    #[case("ItemPayload", "itemName")]
    fn schemas_expose_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }
}
