//! OpenAPI document and interactive explorer, the Rust-idiomatic
//! replacement for the original's `swaggo`/`gin-swagger` pair (spec.md
//! §1 names "the Swagger surface" among the original's features).

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use kv_common::contracts::{
    AddDictionaryCacheValueContract, AddListCacheValueContract, CacheKeysContract,
    DictionaryCacheValueContract, DictionaryKeyValueContract, ListCacheValueContract,
    NewDictionaryCacheValuesContract, NewListCacheValuesContract, NewStringCacheValueContract,
    StringCacheValueContract, UpdateDictionaryCacheValueContract, UpdateListCacheValueContract,
    UpdateStringCacheValueContract,
};
use kv_common::error::ErrorContract;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        CacheKeysContract,
        NewStringCacheValueContract,
        UpdateStringCacheValueContract,
        StringCacheValueContract,
        NewListCacheValuesContract,
        AddListCacheValueContract,
        UpdateListCacheValueContract,
        ListCacheValueContract,
        DictionaryKeyValueContract,
        NewDictionaryCacheValuesContract,
        AddDictionaryCacheValueContract,
        UpdateDictionaryCacheValueContract,
        DictionaryCacheValueContract,
        ErrorContract,
    )),
    tags(
        (name = "string", description = "String-valued cache entries"),
        (name = "list", description = "List-valued cache entries"),
        (name = "dictionary", description = "Dictionary-valued cache entries"),
    )
)]
struct ApiDoc;

/// Mounts `/api/openapi.json` and `/swagger-ui` onto `router`.
pub fn mount(router: Router) -> Router {
    router.merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
}
