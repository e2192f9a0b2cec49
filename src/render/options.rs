//! Rendering options and configuration.

/// Placeholder replaced by the page number in a marker template.
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Default page marker template.
pub const DEFAULT_MARKER_TEMPLATE: &str = "--- Page {page} ---";

/// Options for rendering a transcript as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Template of the page marker line; `{page}` is the 1-based page number
    pub marker_template: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page marker template.
    ///
    /// A template without `{page}` gets the page number appended, so every
    /// marker still identifies its page.
    pub fn with_marker_template(mut self, template: impl Into<String>) -> Self {
        let mut template = template.into();
        if !template.contains(PAGE_PLACEHOLDER) {
            template.push(' ');
            template.push_str(PAGE_PLACEHOLDER);
        }
        self.marker_template = template;
        self
    }

    /// The marker line for a page.
    pub fn marker(&self, page: u32) -> String {
        self.marker_template.replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            marker_template: DEFAULT_MARKER_TEMPLATE.to_string(),
        }
    }
}
