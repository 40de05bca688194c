//! speakeval-report — HTML rendering for speakeval.

pub mod html;

pub use html::{annotation_html, generate_html, write_html_report};
