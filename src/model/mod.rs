//! Data model for extraction runs.
//!
//! A backend yields [`TextToken`]s per page; the pipeline folds them into
//! [`PageSection`]s of a [`Transcript`].

mod token;
mod transcript;

pub use token::{join_tokens, TextToken};
pub use transcript::{PageSection, Transcript};
