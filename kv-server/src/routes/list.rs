//! List shape HTTP handlers. Grounded in the list-cache counterpart of
//! `original_source/api/controllers/string.go` (the original repo's
//! `list.go` controller follows the identical shape).

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kv_common::contracts::{
    AddListCacheValueContract, CacheKeysContract, ListCacheValueContract,
    NewListCacheValuesContract, UpdateListCacheValueContract,
};
use kv_common::{ttl, ApiError};
use kv_engine::shapes::{ListCommand, ListReply};

use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

pub async fn list_keys(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CacheKeysContract>, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let (keys, errors) = state.lists.enumerate_keys().await;
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
) -> Result<Json<ListCacheValueContract>, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .lists
        .route(&key)
        .send_command(ListCommand::Get { key: key.clone() })
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
        ListReply::Values(Some(values)) => Ok(Json(ListCacheValueContract { key, values })),
        ListReply::Values(None) => {
            state.metrics.record_error();
            Err(ApiError::NotFound(key).into())
        }
        _ => unreachable!("Get command always returns Values"),
    }
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<NewListCacheValuesContract>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let ttl_secs = body.ttl.as_deref().map(ttl::parse_ttl).unwrap_or(0);
    let reply = state
        .lists
        .route(&body.key)
        .send_command(ListCommand::Add {
            key: body.key.clone(),
            values: body.values,
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
        ListReply::Added(true) => Ok(StatusCode::CREATED),
        ListReply::Added(false) => {
            state.metrics.record_error();
            Err(ApiError::BadRequest(format!("key '{}' was already used", body.key)).into())
        }
        _ => unreachable!("Add command always returns Added"),
    }
}

pub async fn add_value(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    ValidatedJson(body): ValidatedJson<AddListCacheValueContract>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .lists
        .route(&key)
        .send_command(ListCommand::AddValue {
            key: key.clone(),
            value: body.value,
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
        ListReply::ValueAdded(true) => Ok(StatusCode::CREATED),
        ListReply::ValueAdded(false) => {
            state.metrics.record_error();
            Err(ApiError::BadRequest(format!("key '{key}' was not found")).into())
        }
        _ => unreachable!("AddValue command always returns ValueAdded"),
    }
}

pub async fn update_value(
    State(state): State<Arc<AppState>>,
    Path((key, value)): Path<(String, String)>,
    ValidatedJson(body): ValidatedJson<UpdateListCacheValueContract>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .lists
        .route(&key)
        .send_command(ListCommand::UpdateValue {
            key: key.clone(),
            new_value: body.value,
            original: value.clone(),
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
        ListReply::ValueUpdated(true) => Ok(StatusCode::NO_CONTENT),
        ListReply::ValueUpdated(false) => {
            state.metrics.record_error();
            Err(ApiError::BadRequest(format!(
                "list value '{value}' of key '{key}' was already changed or never existed"
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
        .lists
        .route(&key)
        .send_command(ListCommand::Delete { key: key.clone() })
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
        ListReply::Deleted(Some(_)) => Ok(StatusCode::NO_CONTENT),
        ListReply::Deleted(None) => {
            state.metrics.record_error();
            Err(ApiError::NotFound(key).into())
        }
        _ => unreachable!("Delete command always returns Deleted"),
    }
}

pub async fn delete_value(
    State(state): State<Arc<AppState>>,
    Path((key, value)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let start = Instant::now();
    state.metrics.record_request_start();
    let reply = state
        .lists
        .route(&key)
        .send_command(ListCommand::DeleteValue {
            key: key.clone(),
            value: value.clone(),
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
        ListReply::ValueDeleted(true) => Ok(StatusCode::NO_CONTENT),
        ListReply::ValueDeleted(false) => {
            state.metrics.record_error();
            Err(ApiError::BadRequest(format!(
                "list value '{value}' of key '{key}' was already deleted or never existed"
            ))
            .into())
        }
        _ => unreachable!("DeleteValue command always returns ValueDeleted"),
    }
}
