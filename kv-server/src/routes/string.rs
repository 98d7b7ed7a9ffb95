//! String shape HTTP handlers. Grounded in
//! `original_source/api/controllers/string.go`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kv_common::contracts::{
    CacheKeysContract, NewStringCacheValueContract, StringCacheValueContract,
    UpdateStringCacheValueContract,
};
use kv_common::{ttl, ApiError};
use kv_engine::shapes::{StringCommand, StringReply};

use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

pub async fn list_keys(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CacheKeysContract>, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let (keys, errors) = state.strings.enumerate_keys().await;
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
) -> Result<Json<StringCacheValueContract>, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .strings
        .route(&key)
        .send_command(StringCommand::Get { key: key.clone() })
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
        StringReply::Value(Some(value)) => Ok(Json(StringCacheValueContract { key, value })),
        StringReply::Value(None) => {
            state.metrics.record_error();
            Err(ApiError::NotFound(key).into())
        }
        _ => unreachable!("Get command always returns Value"),
    }
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<NewStringCacheValueContract>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let ttl_secs = body.ttl.as_deref().map(ttl::parse_ttl).unwrap_or(0);
    let reply = state
        .strings
        .route(&body.key)
        .send_command(StringCommand::Add {
            key: body.key.clone(),
            value: body.value,
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
        StringReply::Added(true) => Ok(StatusCode::CREATED),
        StringReply::Added(false) => {
            state.metrics.record_error();
            Err(ApiError::BadRequest(format!("key '{}' was already used", body.key)).into())
        }
        _ => unreachable!("Add command always returns Added"),
    }
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateStringCacheValueContract>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .strings
        .route(&key)
        .send_command(StringCommand::Update {
            key: key.clone(),
            value: body.value,
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
        StringReply::Updated(true, _) => Ok(StatusCode::NO_CONTENT),
        StringReply::Updated(false, observed) => {
            state.metrics.record_error();
            Err(ApiError::BadRequest(format!("key '{key}' was already changed to '{observed}'")).into())
        }
        _ => unreachable!("Update command always returns Updated"),
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .strings
        .route(&key)
        .send_command(StringCommand::Delete { key: key.clone() })
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
        StringReply::Deleted(Some(_)) => Ok(StatusCode::NO_CONTENT),
        StringReply::Deleted(None) => {
            state.metrics.record_error();
            Err(ApiError::NotFound(key).into())
        }
        _ => unreachable!("Delete command always returns Deleted"),
    }
}
