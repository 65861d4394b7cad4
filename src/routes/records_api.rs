use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{error, web, HttpResponse, ResponseError};
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use super::Backend;
use crate::entities;
use crate::ports::RecordsRepository;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found.")]
    NotFound,
    #[error("{0}")]
    Malformed(String),
    #[error("invalid fields")]
    Invalid(BTreeMap<&'static str, Vec<String>>),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Malformed(_) | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::NotFound | ApiError::Malformed(_) => {
                serde_json::json!({ "detail": self.to_string() })
            }
            ApiError::Invalid(errors) => serde_json::json!(errors),
            ApiError::Internal(e) => {
                log::error!("{:?}", e);
                serde_json::json!({ "detail": "A server error occurred." })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = format!("JSON parse error - {}", err);
        error::Error::from(ApiError::Malformed(detail))
    })
}

/// Ids that do not parse as integers cannot name a record.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        log::debug!("{} {}: {}", req.method(), req.path(), err);
        error::Error::from(ApiError::NotFound)
    })
}

/// Request body for create and update. `id` and `create_at` are read-only
/// and ignored when present.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPayload {
    #[serde(default)]
    msec: Option<i64>,
}

fn invalid_msec(message: String) -> ApiError {
    ApiError::Invalid(BTreeMap::from([("msec", vec![message])]))
}

impl RecordPayload {
    fn msec(&self) -> Result<Option<entities::Msec>, ApiError> {
        self.msec
            .map(entities::Msec::try_from)
            .transpose()
            .map_err(|e| invalid_msec(e.to_string()))
    }

    fn required_msec(&self) -> Result<entities::Msec, ApiError> {
        self.msec()?
            .ok_or_else(|| invalid_msec("This field is required.".to_string()))
    }
}

pub async fn list<B: Backend>(backend: web::Data<B>) -> Result<HttpResponse, ApiError> {
    let records = backend.records().list().await?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn create<B: Backend>(
    backend: web::Data<B>,
    payload: web::Json<RecordPayload>,
) -> Result<HttpResponse, ApiError> {
    let msec = payload.required_msec()?;
    let record = backend.records().create(Utc::now(), msec).await?;
    log::info!("record {} created", record.id);
    Ok(HttpResponse::Created().json(record))
}

pub async fn retrieve<B: Backend>(
    backend: web::Data<B>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let record = backend
        .records()
        .get(entities::RecordId::from(path.into_inner()))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(record))
}

async fn apply_update<B: Backend>(
    backend: &B,
    id: entities::RecordId,
    msec: Option<entities::Msec>,
) -> Result<HttpResponse, ApiError> {
    let mut records = backend.records();
    let record = match msec {
        Some(msec) => records.update(id, msec).await?,
        None => records.get(id).await?,
    };
    record
        .map(|record| HttpResponse::Ok().json(record))
        .ok_or(ApiError::NotFound)
}

pub async fn update<B: Backend>(
    backend: web::Data<B>,
    path: web::Path<i64>,
    payload: web::Json<RecordPayload>,
) -> Result<HttpResponse, ApiError> {
    let id = entities::RecordId::from(path.into_inner());
    // 存在しないidには検証より先に404を返す
    if backend.records().get(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    apply_update(backend.get_ref(), id, Some(payload.required_msec()?)).await
}

pub async fn partial_update<B: Backend>(
    backend: web::Data<B>,
    path: web::Path<i64>,
    payload: web::Json<RecordPayload>,
) -> Result<HttpResponse, ApiError> {
    let id = entities::RecordId::from(path.into_inner());
    if backend.records().get(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    apply_update(backend.get_ref(), id, payload.msec()?).await
}

pub async fn destroy<B: Backend>(
    backend: web::Data<B>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let deleted = backend
        .records()
        .delete(entities::RecordId::from(path.into_inner()))
        .await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    Ok(HttpResponse::NoContent().finish())
}
