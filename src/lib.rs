//! Quickstash - a thin client for a personal capture server.
//!
//! The server side of quickstash stores captured items as files in a synced
//! folder; this crate is the submission side. It maps captured content (a
//! URL, a note, a code snippet or a file) to the server's JSON capture
//! endpoints, reports each submission's outcome through a single status
//! surface, and clears the originating form only once the server confirmed
//! the save.
//!
//! The core pieces:
//! - [`Form`] / [`FormSubmitter`] - field values, payload builders and the
//!   submit path
//! - [`StashClient`] - the HTTP client over the capture API
//! - [`StatusSink`] - the status display, passed in as a handle

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod payload;
pub mod status;

pub use client::{Health, SavedItem, StashClient};
pub use config::Config;
pub use error::{Result, StashError};
pub use form::{
    code_capture, file_capture, note_capture, url_capture, FieldValues, Form, FormBinding,
    FormSubmitter, PayloadBuilder,
};
pub use payload::{Capture, CodeCapture, FileCapture, NoteCapture, UrlCapture};
pub use status::{ConsoleStatus, MemoryStatus, StatusSink, Tone};
