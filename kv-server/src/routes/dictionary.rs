//! Dictionary shape HTTP handlers. Grounded in
//! `original_source/api/controllers/dictionary.go`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kv_common::contracts::{
    AddDictionaryCacheValueContract, CacheKeysContract, DictionaryCacheValueContract,
    DictionaryKeyValueContract, NewDictionaryCacheValuesContract, UpdateDictionaryCacheValueContract,
};
use kv_common::{ttl, ApiError};
use kv_engine::shapes::{DictionaryCommand, DictionaryReply};

use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

fn to_contract_pairs(values: Vec<(String, String)>) -> Vec<DictionaryKeyValueContract> {
    values
        .into_iter()
        .map(|(key, value)| DictionaryKeyValueContract { key, value })
        .collect()
}

pub async fn list_keys(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CacheKeysContract>, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let (keys, errors) = state.dictionaries.enumerate_keys().await;
    state.metrics.record_request_end(start.elapsed());

    if !errors.is_empty() {
        state.metrics.record_error();
        return Err(ApiError::Internal(format!("{} shard(s) failed to report their keys", errors.len())).into());
    }
    Ok(Json(CacheKeysContract { keys }))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<DictionaryCacheValueContract>, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .dictionaries
        .route(&key)
        .send_command(DictionaryCommand::Get { key: key.clone() })
        .await;
    let reply = match reply {
        Ok(reply) => reply,
        Err(_) => {
            state.metrics.record_request_failure(start.elapsed());
            return Err(ApiError::Internal("shard did not respond in time".into()).into());
        }
    };
    state.metrics.record_request_end(start.elapsed());

    match reply {
        DictionaryReply::Values(Some(values)) => Ok(Json(DictionaryCacheValueContract {
            key,
            values: to_contract_pairs(values),
        })),
        DictionaryReply::Values(None) => {
            state.metrics.record_error();
            Err(ApiError::NotFound(key).into())
        }
        _ => unreachable!("Get command always returns Values"),
    }
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<NewDictionaryCacheValuesContract>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let ttl_secs = body.ttl.as_deref().map(ttl::parse_ttl).unwrap_or(0);
    let values = body.values.into_iter().map(|pair| (pair.key, pair.value)).collect();
    let reply = state
        .dictionaries
        .route(&body.key)
        .send_command(DictionaryCommand::Add {
            key: body.key.clone(),
            values,
            ttl_secs,
        })
        .await;
    let reply = match reply {
        Ok(reply) => reply,
        Err(_) => {
            state.metrics.record_request_failure(start.elapsed());
            return Err(ApiError::Internal("shard did not respond in time".into()).into());
        }
    };
    state.metrics.record_request_end(start.elapsed());

    match reply {
        DictionaryReply::Added(true) => Ok(StatusCode::CREATED),
        DictionaryReply::Added(false) => {
            state.metrics.record_error();
            Err(ApiError::BadRequest(format!("key '{}' was already used", body.key)).into())
        }
        _ => unreachable!("Add command always returns Added"),
    }
}

pub async fn add_value(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    ValidatedJson(body): ValidatedJson<AddDictionaryCacheValueContract>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .dictionaries
        .route(&key)
        .send_command(DictionaryCommand::AddValue {
            key: key.clone(),
            subkey: body.value.key.clone(),
            value: body.value.value,
        })
        .await;
    let reply = match reply {
        Ok(reply) => reply,
        Err(_) => {
            state.metrics.record_request_failure(start.elapsed());
            return Err(ApiError::Internal("shard did not respond in time".into()).into());
        }
    };
    state.metrics.record_request_end(start.elapsed());

    match reply {
        DictionaryReply::ValueAdded(true) => Ok(StatusCode::CREATED),
        DictionaryReply::ValueAdded(false) => {
            state.metrics.record_error();
            Err(ApiError::BadRequest(format!(
                "dictionary subkey '{}' of key '{key}' was already used or key was never created",
                body.value.key
            ))
            .into())
        }
        _ => unreachable!("AddValue command always returns ValueAdded"),
    }
}

pub async fn update_value(
    State(state): State<Arc<AppState>>,
    Path((key, subkey)): Path<(String, String)>,
    ValidatedJson(body): ValidatedJson<UpdateDictionaryCacheValueContract>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .dictionaries
        .route(&key)
        .send_command(DictionaryCommand::UpdateValue {
            key: key.clone(),
            subkey: subkey.clone(),
            new_value: body.value,
            original: body.original,
        })
        .await;
    let reply = match reply {
        Ok(reply) => reply,
        Err(_) => {
            state.metrics.record_request_failure(start.elapsed());
            return Err(ApiError::Internal("shard did not respond in time".into()).into());
        }
    };
    state.metrics.record_request_end(start.elapsed());

    match reply {
        DictionaryReply::ValueUpdated(true, _) => Ok(StatusCode::NO_CONTENT),
        DictionaryReply::ValueUpdated(false, _) => {
            state.metrics.record_error();
            Err(ApiError::BadRequest(format!(
                "dictionary subkey '{subkey}' of key '{key}' was already changed or never existed"
            ))
            .into())
        }
        _ => unreachable!("UpdateValue command always returns ValueUpdated"),
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .dictionaries
        .route(&key)
        .send_command(DictionaryCommand::Delete { key: key.clone() })
        .await;
    let reply = match reply {
        Ok(reply) => reply,
        Err(_) => {
            state.metrics.record_request_failure(start.elapsed());
            return Err(ApiError::Internal("shard did not respond in time".into()).into());
        }
    };
    state.metrics.record_request_end(start.elapsed());

    match reply {
        DictionaryReply::Deleted(Some(_)) => Ok(StatusCode::NO_CONTENT),
        DictionaryReply::Deleted(None) => {
            state.metrics.record_error();
            Err(ApiError::NotFound(key).into())
        }
        _ => unreachable!("Delete command always returns Deleted"),
    }
}

pub async fn delete_value(
    State(state): State<Arc<AppState>>,
    Path((key, subkey)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .dictionaries
        .route(&key)
        .send_command(DictionaryCommand::DeleteValue {
            key: key.clone(),
            subkey: subkey.clone(),
        })
        .await;
    let reply = match reply {
        Ok(reply) => reply,
        Err(_) => {
            state.metrics.record_request_failure(start.elapsed());
            return Err(ApiError::Internal("shard did not respond in time".into()).into());
        }
    };
    state.metrics.record_request_end(start.elapsed());

    match reply {
        DictionaryReply::ValueDeleted(Some(_)) => Ok(StatusCode::NO_CONTENT),
        DictionaryReply::ValueDeleted(None) => {
            state.metrics.record_error();
            Err(ApiError::BadRequest(format!(
                "dictionary value '{subkey}' of key '{key}' was already deleted or never existed"
            ))
            .into())
        }
        _ => unreachable!("DeleteValue command always returns ValueDeleted"),
    }
}
