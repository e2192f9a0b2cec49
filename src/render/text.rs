//! Plain text rendering of transcripts.

use crate::model::Transcript;

use super::RenderOptions;

/// Render a transcript as page-delimited text.
///
/// Each page becomes its marker line, its text, and a blank line, in page
/// order. Page text is written as-is, so a page never bleeds into another
/// page's section.
pub fn to_text(transcript: &Transcript, options: &RenderOptions) -> String {
    let capacity = transcript
        .iter()
        .map(|section| section.text.len() + options.marker_template.len() + 8)
        .sum();
    let mut output = String::with_capacity(capacity);

    for section in transcript {
        output.push_str(&options.marker(section.number));
        output.push('\n');
        output.push_str(&section.text);
        output.push_str("\n\n");
    }

    output
}
