//! Form bindings and the submit path.
//!
//! A [`Form`] is a named set of field values. A [`PayloadBuilder`] is a pure
//! function from a field snapshot to a [`Capture`]; the built-in builders
//! mirror the capture page's forms (url, note, code, file). The
//! [`FormSubmitter`] ties a form to its builder and runs the submit path:
//! snapshot, status `Sending…`, POST, then success or error handling.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::error;

use crate::client::StashClient;
use crate::payload::{Capture, CodeCapture, FileCapture, NoteCapture, UrlCapture};
use crate::status::{StatusSink, Tone};

/// Snapshot of a form's field values at submit time. Later edits to the form
/// do not affect a snapshot already taken.
#[derive(Debug, Clone, Default)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Field lookup with blank-as-absent coercion: a missing field and an
    /// empty one both read as `None`.
    pub fn get_nonempty(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
    }

    /// Parse the `tags` field as a comma-separated list; `None` when the
    /// field is absent or yields no tags.
    pub fn tags(&self) -> Option<Vec<String>> {
        let raw = self.get("tags")?;
        let tags: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        if tags.is_empty() {
            None
        } else {
            Some(tags)
        }
    }
}

/// A mutable form: named field values, cleared only on successful submit.
#[derive(Debug, Clone, Default)]
pub struct Form {
    id: String,
    fields: HashMap<String, String>,
}

impl Form {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            fields: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Snapshot the current field values.
    pub fn values(&self) -> FieldValues {
        FieldValues {
            values: self.fields.clone(),
        }
    }

    /// Clear all field values.
    pub fn reset(&mut self) {
        self.fields.clear();
    }
}

/// Pure mapping from one form's snapshot to a capture payload.
pub type PayloadBuilder = fn(&FieldValues) -> Capture;

/// Builder for the URL form: `url` required, `title` and `selection`
/// optional.
pub fn url_capture(fields: &FieldValues) -> Capture {
    Capture::Url(UrlCapture {
        url: fields.get_nonempty("url").unwrap_or_default(),
        title: fields.get_nonempty("title"),
        selection: fields.get_nonempty("selection"),
        tags: fields.tags(),
    })
}

/// Builder for the note form: `body` required, `title` optional.
pub fn note_capture(fields: &FieldValues) -> Capture {
    Capture::Note(NoteCapture {
        title: fields.get_nonempty("title"),
        body: fields.get_nonempty("body").unwrap_or_default(),
        tags: fields.tags(),
    })
}

/// Builder for the code form: `code` required, `title` and `lang` optional.
pub fn code_capture(fields: &FieldValues) -> Capture {
    Capture::Code(CodeCapture {
        title: fields.get_nonempty("title"),
        lang: fields.get_nonempty("lang"),
        code: fields.get_nonempty("code").unwrap_or_default(),
        tags: fields.tags(),
    })
}

/// Builder for the file form: `name` and `content_b64` required.
pub fn file_capture(fields: &FieldValues) -> Capture {
    Capture::File(FileCapture {
        name: fields.get_nonempty("name").unwrap_or_default(),
        content_b64: fields.get_nonempty("content_b64").unwrap_or_default(),
        tags: fields.tags(),
    })
}

/// One bound form: the form and the builder that maps it to a payload.
/// Binding the same form twice submits it twice.
#[derive(Debug)]
pub struct FormBinding {
    form: Form,
    builder: PayloadBuilder,
}

impl FormBinding {
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }
}

/// Runs the submit path for bound forms and reflects the outcome into the
/// status sink. Submissions on different bindings may run concurrently; each
/// owns its own status update, so the last one to settle wins the display.
pub struct FormSubmitter {
    client: StashClient,
    status: Arc<dyn StatusSink>,
}

impl FormSubmitter {
    pub fn new(client: StashClient, status: Arc<dyn StatusSink>) -> Self {
        Self { client, status }
    }

    /// Associate a form with its payload builder.
    pub fn bind(&self, form: Form, builder: PayloadBuilder) -> FormBinding {
        FormBinding { form, builder }
    }

    /// Submit one bound form. Returns `true` when the server confirmed the
    /// save. Every failure is caught here: the message lands in the status
    /// sink with tone `error`, the form keeps its values, and nothing
    /// propagates further.
    pub async fn submit(&self, binding: &mut FormBinding) -> bool {
        let snapshot = binding.form.values();
        self.status.set_status("Sending…", Tone::Info);

        let capture = (binding.builder)(&snapshot);
        match self.client.submit(&capture).await {
            Ok(saved) => {
                self.status
                    .set_status(&format!("Saved to {}", saved.path), Tone::Success);
                binding.form.reset();
                true
            }
            Err(err) => {
                error!("capture submission for form '{}' failed: {}", binding.form.id(), err);
                self.status.set_status(&err.to_string(), Tone::Error);
                false
            }
        }
    }
}
