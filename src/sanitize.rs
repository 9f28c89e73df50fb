use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// CSI-style terminal sequences: ESC or the C1 CSI introducer, optional
/// parameter bytes, one final command byte
static ANSI_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x1b\x{9b}][\[()#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqry=><]")
        .expect("ANSI pattern is valid")
});

/// Remove terminal color and control sequences from a message
///
/// Borrows the input when there is nothing to strip.
pub fn strip_ansi(message: &str) -> Cow<'_, str> {
    ANSI_SEQUENCE.replace_all(message, "")
}
