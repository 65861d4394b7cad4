use actix_multipart::form::MultipartFormConfig;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use sqlx::PgPool;

use crate::adapters::{CertificationsRepositoryImpl, RecordsRepositoryImpl, StorageImpl};
use crate::app_error::AppError;
use crate::{ports, views};

mod pages;
mod records_api;

/// Hands out the port implementations a request works with.
pub trait Backend: 'static {
    type Records: ports::RecordsRepository<Error = anyhow::Error>;
    type Certifications: ports::CertificationsRepository<Error = anyhow::Error>;
    type Storage: ports::Storage<Error = anyhow::Error>;

    fn records(&self) -> Self::Records;

    fn certifications(&self) -> Self::Certifications;

    fn storage(&self) -> Self::Storage;
}

#[derive(Debug, Clone)]
pub struct PgBackend {
    pool: PgPool,
    storage: StorageImpl,
}

impl PgBackend {
    pub fn new(pool: PgPool, storage: StorageImpl) -> Self {
        Self { pool, storage }
    }
}

impl Backend for PgBackend {
    type Records = RecordsRepositoryImpl<PgPool>;
    type Certifications = CertificationsRepositoryImpl<PgPool>;
    type Storage = StorageImpl;

    fn records(&self) -> Self::Records {
        RecordsRepositoryImpl::new(self.pool.clone())
    }

    fn certifications(&self) -> Self::Certifications {
        CertificationsRepositoryImpl::new(self.pool.clone())
    }

    fn storage(&self) -> Self::Storage {
        self.storage.clone()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound => views::not_found(),
            AppError::Internal(e) => {
                log::error!("{:?}", e);
                views::internal_error()
            }
        };
        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(body)
    }
}

/// Registers every page and API route. `max_request_size` bounds upload bodies.
pub fn configure<B: Backend>(max_request_size: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(
            MultipartFormConfig::default()
                .total_limit(max_request_size)
                .memory_limit(max_request_size),
        )
        .app_data(pages::path_config())
        .service(web::resource("/").route(web::get().to(pages::index::<B>)))
        .service(
            web::resource("/stop")
                .route(web::get().to(pages::stop_tracking::<B>))
                .route(web::post().to(pages::stop_tracking::<B>)),
        )
        .service(
            web::resource("/upload/{record_id}")
                .route(web::get().to(pages::show_upload::<B>))
                .route(web::post().to(pages::submit_upload::<B>)),
        )
        .service(
            web::resource("/upload/{record_id}/success")
                .route(web::get().to(pages::upload_success::<B>)),
        )
        .service(
            web::scope("/api/records")
                .app_data(records_api::json_config())
                .app_data(records_api::path_config())
                .service(
                    web::resource("/")
                        .route(web::get().to(records_api::list::<B>))
                        .route(web::post().to(records_api::create::<B>)),
                )
                .service(
                    web::resource("/{id}/")
                        .route(web::get().to(records_api::retrieve::<B>))
                        .route(web::put().to(records_api::update::<B>))
                        .route(web::patch().to(records_api::partial_update::<B>))
                        .route(web::delete().to(records_api::destroy::<B>)),
                ),
        );
    }
}
