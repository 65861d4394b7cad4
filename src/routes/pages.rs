use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::Utc;

use super::Backend;
use crate::app_error::AppError;
use crate::entities;
use crate::forms::{CertificationSubmission, UploadedImage};
use crate::views;
use crate::walk_session::{self, UploadOutcome};

#[derive(MultipartForm)]
pub struct CertificationUpload {
    image: Option<Bytes>,
    description: Option<Text<String>>,
}

impl From<CertificationUpload> for CertificationSubmission {
    fn from(upload: CertificationUpload) -> Self {
        CertificationSubmission {
            image: upload.image.map(|image| UploadedImage {
                data: image.data.to_vec(),
                content_type: image.content_type.map(|mime| mime.essence_str().to_string()),
            }),
            description: upload.description.map(|text| text.0),
        }
    }
}

/// Page routes answer unparseable ids with the not-found page.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        log::debug!("{} {}: {}", req.method(), req.path(), err);
        actix_web::Error::from(AppError::NotFound)
    })
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub async fn index<B: Backend>(backend: web::Data<B>) -> Result<HttpResponse, AppError> {
    let status = walk_session::show_current_session(&mut backend.records()).await?;
    Ok(html(views::session_status(&status)))
}

pub async fn stop_tracking<B: Backend>(backend: web::Data<B>) -> Result<HttpResponse, AppError> {
    let record_id = walk_session::stop_tracking(&mut backend.records()).await?;
    Ok(redirect(views::upload_path(record_id)))
}

async fn upload<B: Backend>(
    backend: &B,
    record_id: i64,
    submission: Option<CertificationSubmission>,
) -> Result<HttpResponse, AppError> {
    let outcome = walk_session::upload_certification(
        &mut backend.records(),
        &mut backend.certifications(),
        &mut backend.storage(),
        Utc::now(),
        entities::RecordId::from(record_id),
        submission,
    )
    .await?;

    Ok(match outcome {
        UploadOutcome::Form(page) => html(views::upload_page(&page)),
        UploadOutcome::Saved(certification) => {
            redirect(views::success_path(certification.record_id))
        }
    })
}

pub async fn show_upload<B: Backend>(
    backend: web::Data<B>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    upload(backend.get_ref(), path.into_inner(), None).await
}

pub async fn submit_upload<B: Backend>(
    backend: web::Data<B>,
    path: web::Path<i64>,
    form: Result<MultipartForm<CertificationUpload>, actix_web::Error>,
) -> Result<HttpResponse, AppError> {
    // 読めない本文は未入力の送信として扱い、レコードの確認を先に行う
    let submission = match form {
        Ok(MultipartForm(form)) => form.into(),
        Err(e) => {
            log::debug!("unreadable certification upload: {}", e);
            CertificationSubmission::default()
        }
    };
    upload(backend.get_ref(), path.into_inner(), Some(submission)).await
}

pub async fn upload_success<B: Backend>(
    backend: web::Data<B>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let page = walk_session::upload_success(
        &mut backend.records(),
        &mut backend.certifications(),
        entities::RecordId::from(path.into_inner()),
    )
    .await?;
    Ok(html(views::success_page(&page)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use chrono::Duration;

    use crate::adapters::InMemoryStore;
    use crate::entities::MAX_IMAGE_SIZE;
    use crate::routes::configure;

    const BOUNDARY: &str = "----walkboundary";

    fn multipart_body(image: Option<(&str, &[u8])>, description: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some((content_type, data)) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"walk\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(description) = description {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\n{description}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(uri: &str, body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    macro_rules! app {
        ($store:expr) => {
            app!($store, 1024 * 1024)
        };
        ($store:expr, $max_request_size:expr) => {
            test::init_service(
                App::new()
                    .app_data(actix_web::web::Data::new($store.clone()))
                    .configure(configure::<InMemoryStore>($max_request_size)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_index_without_records_is_not_found() {
        let store = InMemoryStore::new();
        let app = app!(store);

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = test::call_service(&app, test::TestRequest::post().uri("/stop").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_index_and_stop() {
        let store = InMemoryStore::new();
        let now = chrono::Utc::now();
        store.insert_record(1000, now);
        store.insert_record(2000, now - Duration::minutes(1));
        let app = app!(store);

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains(r#"<span id="latest-record-id">1</span>"#));

        for req in [test::TestRequest::get(), test::TestRequest::post()] {
            let res = test::call_service(&app, req.uri("/stop").to_request()).await;
            assert_eq!(res.status(), StatusCode::FOUND);
            assert_eq!(res.headers().get("location").unwrap(), "/upload/2");
        }
    }

    #[actix_web::test]
    async fn test_upload_form_page() {
        let store = InMemoryStore::new();
        store.insert_record(3725000, chrono::Utc::now());
        let app = app!(store);

        let res = test::call_service(&app, test::TestRequest::get().uri("/upload/1").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("1 hours 2 minutes 5 seconds"));
        assert!(body.contains(r#"enctype="multipart/form-data""#));

        for uri in [
            "/upload/2",
            "/upload/abc",
            "/upload/2/success",
            "/upload/abc/success",
            "/upload/99999999999999999999/success",
        ] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", uri);
            assert_eq!(
                res.headers().get("content-type").unwrap(),
                "text/html; charset=utf-8"
            );
            let body = test::read_body(res).await;
            let body = std::str::from_utf8(&body).unwrap();
            assert!(body.contains("<h1>Not found</h1>"), "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_upload_flow() {
        let store = InMemoryStore::new();
        for _ in 0..7 {
            store.insert_record(3725000, chrono::Utc::now());
        }
        let app = app!(store);

        let png: &[u8] = b"\x89PNG\r\n\x1a\n\0\0";
        let body = multipart_body(Some(("image/png", png)), Some("sunset walk"));
        let res = test::call_service(&app, multipart_request("/upload/7", body).to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get("location").unwrap(), "/upload/7/success");

        let certifications = store.certifications();
        assert_eq!(certifications.len(), 1);
        assert_eq!(i64::from(certifications[0].record_id), 7);
        assert_eq!(certifications[0].description.as_str(), "sunset walk");

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/upload/7/success").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("Total: 1:2:5"));
        assert!(body.contains("<li>sunset walk</li>"));
    }

    #[actix_web::test]
    async fn test_upload_without_image_rerenders_form() {
        let store = InMemoryStore::new();
        store.insert_record(3725000, chrono::Utc::now());
        let app = app!(store);

        let body = multipart_body(None, Some("no photo"));
        let res = test::call_service(&app, multipart_request("/upload/1", body).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("This field is required."));
        assert!(body.contains(">no photo</textarea>"));
        assert!(store.certifications().is_empty());
    }

    #[actix_web::test]
    async fn test_non_multipart_upload() {
        let store = InMemoryStore::new();
        store.insert_record(3725000, chrono::Utc::now());
        let app = app!(store);

        let form_post = |uri: &str| {
            test::TestRequest::post()
                .uri(uri)
                .insert_header(("content-type", "application/x-www-form-urlencoded"))
                .set_payload("description=x")
                .to_request()
        };

        let res = test::call_service(&app, form_post("/upload/5")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = test::read_body(res).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("<h1>Not found</h1>"));

        let res = test::call_service(&app, form_post("/upload/abc")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = test::call_service(&app, form_post("/upload/1")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains(r#"<ul class="errorlist" id="image-errors">"#));
        assert!(body.contains(r#"<ul class="errorlist" id="description-errors">"#));
        assert!(store.certifications().is_empty());
    }

    #[actix_web::test]
    async fn test_oversized_image_reaches_the_form() {
        let store = InMemoryStore::new();
        store.insert_record(3725000, chrono::Utc::now());
        let app = app!(store, MAX_IMAGE_SIZE + 1024 * 1024);

        let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
        png.resize(MAX_IMAGE_SIZE + 1, 0);
        let body = multipart_body(Some(("image/png", png.as_slice())), Some("long walk"));
        let res = test::call_service(&app, multipart_request("/upload/1", body).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains(&format!(
            "Image size exceeds maximum limit of {} bytes",
            MAX_IMAGE_SIZE
        )));
        assert!(body.contains(">long walk</textarea>"));
        assert!(store.certifications().is_empty());
        assert_eq!(store.image_count(), 0);
    }
}
