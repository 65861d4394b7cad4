//! Handlers behind the walking-session pages, independent of HTTP.

use chrono::{DateTime, Utc};

use crate::app_error::AppError;
use crate::commands::certifications_command;
use crate::entities;
use crate::forms::{self, CertificationForm, CertificationSubmission};
use crate::ports;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStatus {
    pub latest_record_id: entities::RecordId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadPage {
    pub record: entities::Record,
    pub elapsed: entities::ElapsedTime,
    pub form: CertificationForm,
}

impl UploadPage {
    fn new(record: entities::Record, form: CertificationForm) -> Self {
        Self {
            elapsed: record.elapsed_time(),
            record,
            form,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Form(UploadPage),
    Saved(entities::Certification),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuccessPage {
    pub record: entities::Record,
    pub elapsed: entities::ElapsedTime,
    pub certifications: Vec<entities::Certification>,
}

async fn load_record<R>(
    records: &mut R,
    record_id: entities::RecordId,
) -> Result<entities::Record, AppError>
where
    R: ports::RecordsRepository<Error = anyhow::Error>,
{
    records.get(record_id).await?.ok_or(AppError::NotFound)
}

/// The session page points at the most recently created record.
pub async fn show_current_session<R>(records: &mut R) -> Result<SessionStatus, AppError>
where
    R: ports::RecordsRepository<Error = anyhow::Error>,
{
    let record = records
        .latest(entities::RecordOrdering::CreateAt)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(SessionStatus {
        latest_record_id: record.id,
    })
}

/// Returns the record the upload flow continues with: the one with the highest id.
pub async fn stop_tracking<R>(records: &mut R) -> Result<entities::RecordId, AppError>
where
    R: ports::RecordsRepository<Error = anyhow::Error>,
{
    let record = records
        .latest(entities::RecordOrdering::Id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(record.id)
}

/// `None` shows the empty form. A submission is validated and, when valid,
/// persisted against the record named by `record_id`.
pub async fn upload_certification<R, C, S>(
    records: &mut R,
    certifications: &mut C,
    storage: &mut S,
    now: DateTime<Utc>,
    record_id: entities::RecordId,
    submission: Option<CertificationSubmission>,
) -> Result<UploadOutcome, AppError>
where
    R: ports::RecordsRepository<Error = anyhow::Error>,
    C: ports::CertificationsRepository<Error = anyhow::Error>,
    S: ports::Storage<Error = anyhow::Error>,
{
    let record = load_record(records, record_id).await?;

    let Some(submission) = submission else {
        return Ok(UploadOutcome::Form(UploadPage::new(
            record,
            CertificationForm::empty(),
        )));
    };

    let description = submission.description.clone();
    match forms::validate(submission) {
        Ok(validated) => {
            let certification =
                certifications_command::persist(certifications, storage, now, validated, &record)
                    .await?;
            log::info!(
                "certification {} saved for record {}",
                certification.id,
                record.id
            );
            Ok(UploadOutcome::Saved(certification))
        }
        Err(errors) => {
            log::debug!("certification for record {} rejected: {}", record.id, errors);
            let form = CertificationForm::with_errors(description, errors);
            Ok(UploadOutcome::Form(UploadPage::new(record, form)))
        }
    }
}

pub async fn upload_success<R, C>(
    records: &mut R,
    certifications: &mut C,
    record_id: entities::RecordId,
) -> Result<SuccessPage, AppError>
where
    R: ports::RecordsRepository<Error = anyhow::Error>,
    C: ports::CertificationsRepository<Error = anyhow::Error>,
{
    let record = load_record(records, record_id).await?;
    let certifications = certifications.get_by_record(record.id).await?;

    Ok(SuccessPage {
        elapsed: record.elapsed_time(),
        record,
        certifications,
    })
}
