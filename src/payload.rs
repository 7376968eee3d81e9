//! Capture payload types for the quickstash REST API
//!
//! One struct per capture endpoint. Optional fields are omitted from the
//! JSON body entirely when absent; the server distinguishes a missing field
//! from an empty one, so `None` must never serialize as `null` or `""`.

use serde::Serialize;

/// Request body for `POST /url`
#[derive(Debug, Clone, Serialize)]
pub struct UrlCapture {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Request body for `POST /note`
#[derive(Debug, Clone, Serialize)]
pub struct NoteCapture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Request body for `POST /code`
#[derive(Debug, Clone, Serialize)]
pub struct CodeCapture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Request body for `POST /file` (content pre-encoded as base64)
#[derive(Debug, Clone, Serialize)]
pub struct FileCapture {
    pub name: String,
    pub content_b64: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// One capture ready to submit: the JSON body plus its target endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Capture {
    Url(UrlCapture),
    Note(NoteCapture),
    Code(CodeCapture),
    File(FileCapture),
}

impl Capture {
    /// Endpoint path on the capture server for this payload kind.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Capture::Url(_) => "/url",
            Capture::Note(_) => "/note",
            Capture::Code(_) => "/code",
            Capture::File(_) => "/file",
        }
    }
}
