//! # Wire Contracts
//!
//! Purpose: the serde/`utoipa` DTOs exchanged over `/api`, one struct per
//! request or response body named in the HTTP surface table. Field names
//! match the external API exactly; they are intentionally flatter than the
//! internal `CacheEntryData`/`Entry` types in `kv-engine`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use crate::error::ErrorContract;

/// `GET /string|/list|/dictionary` response: `{"keys": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CacheKeysContract {
    pub keys: Vec<String>,
}

// ---------------------------------------------------------------- string --

/// `POST /string` request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewStringCacheValueContract {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub ttl: Option<String>,
}

/// `PUT /string/{key}` request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStringCacheValueContract {
    pub value: String,
    pub original: String,
}

/// `GET /string/{key}` response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StringCacheValueContract {
    pub key: String,
    pub value: String,
}

// ------------------------------------------------------------------ list --

/// `POST /list` request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewListCacheValuesContract {
    pub key: String,
    pub values: Vec<String>,
    #[serde(default)]
    pub ttl: Option<String>,
}

/// `POST /list/{key}` request body: appends one value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddListCacheValueContract {
    pub value: String,
}

/// `PUT /list/{key}/{value}` request body: replaces every occurrence of
/// the path's `{value}` with the body's `value`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateListCacheValueContract {
    pub value: String,
}

/// `GET /list/{key}` response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListCacheValueContract {
    pub key: String,
    pub values: Vec<String>,
}

// ------------------------------------------------------------ dictionary --

/// One subkey/value pair as exchanged over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DictionaryKeyValueContract {
    pub key: String,
    pub value: String,
}

/// `POST /dictionary` request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewDictionaryCacheValuesContract {
    pub key: String,
    pub values: Vec<DictionaryKeyValueContract>,
    #[serde(default)]
    pub ttl: Option<String>,
}

/// `POST /dictionary/{key}` request body: adds one subkey (never
/// overwrites an existing one).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddDictionaryCacheValueContract {
    pub value: DictionaryKeyValueContract,
}

/// `PUT /dictionary/{key}/{subkey}` request body: CAS update on the
/// subkey's value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateDictionaryCacheValueContract {
    pub value: String,
    pub original: String,
}

/// `GET /dictionary/{key}` response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DictionaryCacheValueContract {
    pub key: String,
    pub values: Vec<DictionaryKeyValueContract>,
}
