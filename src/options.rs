use crate::classify::CharClasses;

/// Knobs for a single parse call.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Treat `_` runs as emphasis delimiters in addition to `*`.
    pub underscore_emphasis: bool,
    pub classes: CharClasses,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            underscore_emphasis: true,
            classes: CharClasses::default(),
        }
    }
}

impl ParseOptions {
    pub(crate) fn is_emphasis_marker(&self, c: char) -> bool {
        c == '*' || (c == '_' && self.underscore_emphasis)
    }
}
