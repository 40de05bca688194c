//! speakeval-core — answer scoring and word-level correction.
//!
//! Given a transcribed answer and the acceptable reference sentences for an
//! exercise, [`compare_answers`] picks the closest reference and
//! [`highlight_differences`] marks what was said wrong, said extra, or left
//! out. Both are pure functions; everything else in this crate (exercise
//! loading, feedback policy, batch evaluation, reports) is built around them.

pub mod annotate;
pub mod compare;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod statistics;

pub use annotate::{highlight_differences, AnnotatedSegment, Annotation, SegmentKind};
pub use compare::{compare_answers, ComparisonResult};
pub use normalize::normalize;
