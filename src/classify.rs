/// Character classification used to decide delimiter flanking.
///
/// The exact Unicode policy is left to the caller; the default treats
/// anything that is not alphanumeric, whitespace or a control character as
/// punctuation, which covers both the ASCII punctuation set and the Unicode
/// `P*`/`S*` categories closely enough for flanking decisions.
#[derive(Debug, Clone, Copy)]
pub struct CharClasses {
    pub is_whitespace: fn(char) -> bool,
    pub is_punctuation: fn(char) -> bool,
}

impl Default for CharClasses {
    fn default() -> Self {
        Self {
            is_whitespace: char::is_whitespace,
            is_punctuation: is_unicode_punctuation,
        }
    }
}

fn is_unicode_punctuation(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_punctuation()
    } else {
        !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flanking {
    pub left: bool,
    pub right: bool,
}

impl CharClasses {
    /// Classify a delimiter run by the characters around it. `None` means
    /// the run touches the edge of the inline span, which counts as
    /// whitespace.
    pub fn flanking(&self, before: Option<char>, after: Option<char>) -> Flanking {
        let ws = |c: Option<char>| c.is_none_or(self.is_whitespace);
        let punct = |c: Option<char>| c.is_some_and(self.is_punctuation);

        let left = !ws(after) && (!punct(after) || ws(before) || punct(before));
        let right = !ws(before) && (!punct(before) || ws(after) || punct(after));
        Flanking { left, right }
    }

    /// Opening and closing eligibility for a run of `marker`.
    pub fn can_open_close(
        &self,
        marker: char,
        before: Option<char>,
        after: Option<char>,
    ) -> (bool, bool) {
        let Flanking { left, right } = self.flanking(before, after);
        if marker == '_' {
            let punct = |c: Option<char>| c.is_some_and(self.is_punctuation);
            (
                left && (!right || punct(before)),
                right && (!left || punct(after)),
            )
        } else {
            (left, right)
        }
    }
}
