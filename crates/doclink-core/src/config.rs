use serde::Deserialize;

/// Switches that change how comments are rendered.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Unwrap `{@internal ...}` tags instead of dropping them.
    pub show_internal: bool,
    /// Run the rendered HTML through the sanitizer allow-list.
    pub sanitize: bool,
}
