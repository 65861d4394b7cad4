use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::entities;

/// A file part as received from the client.
#[derive(Clone, Debug, Default)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

/// Raw values of a certification upload, before any checks.
#[derive(Clone, Debug, Default)]
pub struct CertificationSubmission {
    pub image: Option<UploadedImage>,
    pub description: Option<String>,
}

/// Output of [`validate`]. Not yet tied to a record.
#[derive(Clone, Debug)]
pub struct ValidatedCertification {
    pub image: Vec<u8>,
    pub mime_type: entities::MimeType,
    pub description: entities::Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Image,
    Description,
}

impl FormField {
    pub fn name(self) -> &'static str {
        match self {
            FormField::Image => "image",
            FormField::Description => "description",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,
    #[error("Upload a valid image. {0}")]
    UnsupportedType(#[from] entities::MimeTypeTryFromError),
    #[error("Upload a valid image. The file you uploaded was either not an image or a corrupted image.")]
    InvalidImage,
    #[error(transparent)]
    Size(#[from] entities::ImageSizeTryFromError),
}

#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FormField, Vec<FieldError>>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields().map(FormField::name).collect::<Vec<_>>();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl ValidationErrors {
    pub fn add(&mut self, field: FormField, error: FieldError) {
        self.errors.entry(field).or_default().push(error);
    }

    pub fn get(&self, field: FormField) -> &[FieldError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.errors.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// State of the form shown on the upload page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CertificationForm {
    pub description: String,
    pub errors: ValidationErrors,
}

impl CertificationForm {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_errors(description: Option<String>, errors: ValidationErrors) -> Self {
        Self {
            description: description.unwrap_or_default(),
            errors,
        }
    }
}

fn validate_image(
    image: Option<UploadedImage>,
) -> Result<(Vec<u8>, entities::MimeType), FieldError> {
    // ファイル未選択のブラウザは空のパートを送ってくる
    let image = match image {
        Some(image) if !image.data.is_empty() => image,
        _ => return Err(FieldError::Required),
    };

    let mime_type = match image.content_type {
        Some(content_type) => {
            let mime_type = entities::MimeType::try_from(content_type)?;
            if !mime_type.matches_signature(&image.data) {
                return Err(FieldError::InvalidImage);
            }
            mime_type
        }
        None => entities::MimeType::sniff(&image.data).ok_or(FieldError::InvalidImage)?,
    };
    entities::ImageSize::try_from(image.data.len())?;

    Ok((image.data, mime_type))
}

fn validate_description(description: Option<String>) -> Result<entities::Description, FieldError> {
    description
        .ok_or(FieldError::Required)
        .and_then(|value| entities::Description::try_from(value).map_err(|_| FieldError::Required))
}

/// Checks a submission field by field. Every failing field is reported.
pub fn validate(
    submission: CertificationSubmission,
) -> Result<ValidatedCertification, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let image = validate_image(submission.image)
        .map_err(|e| errors.add(FormField::Image, e))
        .ok();
    let description = validate_description(submission.description)
        .map_err(|e| errors.add(FormField::Description, e))
        .ok();

    match (image, description) {
        (Some((image, mime_type)), Some(description)) => Ok(ValidatedCertification {
            image,
            mime_type,
            description,
        }),
        _ => Err(errors),
    }
}
