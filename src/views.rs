//! HTML for the walking-session pages.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::entities;
use crate::forms::{CertificationForm, FormField};
use crate::walk_session::{SessionStatus, SuccessPage, UploadPage};

pub fn upload_path(record_id: entities::RecordId) -> String {
    format!("/upload/{}", record_id)
}

pub fn success_path(record_id: entities::RecordId) -> String {
    format!("/upload/{}/success", record_id)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">

<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{}</title>
</head>

<body>
{}
</body>

</html>
"#,
        encode_text(title),
        body
    )
}

fn elapsed_time(elapsed: &entities::ElapsedTime) -> String {
    format!(
        r#"<p class="elapsed">{} hours {} minutes {} seconds</p>"#,
        elapsed.hours, elapsed.minutes, elapsed.seconds
    )
}

fn field_errors(form: &CertificationForm, field: FormField) -> String {
    let errors = form.errors.get(field);
    if errors.is_empty() {
        return String::new();
    }
    let items = errors
        .iter()
        .map(|e| format!("<li>{}</li>", encode_text(&e.to_string())))
        .collect::<String>();
    format!(r#"<ul class="errorlist" id="{}-errors">{}</ul>"#, field, items)
}

pub fn session_status(status: &SessionStatus) -> String {
    let body = format!(
        r#"<h1>Walking</h1>
<p>Current record: <span id="latest-record-id">{id}</span></p>
<form method="post" action="/stop">
<button type="submit">Stop</button>
</form>"#,
        id = status.latest_record_id
    );
    layout("Walking", &body)
}

pub fn upload_page(page: &UploadPage) -> String {
    let body = format!(
        r#"<h1>Upload certification</h1>
<p>Record {id}</p>
{elapsed}
<form method="post" action="{action}" enctype="multipart/form-data">
<p>
<label for="id_image">Image</label>
{image_errors}
<input type="file" name="image" id="id_image" accept="image/*" required>
</p>
<p>
<label for="id_description">Description</label>
{description_errors}
<textarea name="description" id="id_description" required>{description}</textarea>
</p>
<button type="submit">Upload</button>
</form>"#,
        id = page.record.id,
        elapsed = elapsed_time(&page.elapsed),
        action = encode_double_quoted_attribute(&upload_path(page.record.id)),
        image_errors = field_errors(&page.form, FormField::Image),
        description_errors = field_errors(&page.form, FormField::Description),
        description = encode_text(&page.form.description),
    );
    layout("Upload certification", &body)
}

pub fn success_page(page: &SuccessPage) -> String {
    let certifications = page
        .certifications
        .iter()
        .map(|c| format!("<li>{}</li>", encode_text(c.description.as_str())))
        .collect::<String>();
    let body = format!(
        r#"<h1>Upload complete</h1>
<p>Record {id}, started {create_at}</p>
{elapsed}
<p>Total: {total}</p>
<ul class="certifications">{certifications}</ul>"#,
        id = page.record.id,
        create_at = page.record.create_at.to_rfc3339(),
        elapsed = elapsed_time(&page.elapsed),
        total = page.elapsed,
        certifications = certifications,
    );
    layout("Upload complete", &body)
}

pub fn not_found() -> String {
    layout("Not found", "<h1>Not found</h1>")
}

pub fn internal_error() -> String {
    layout("Server error", "<h1>Server error</h1>")
}
