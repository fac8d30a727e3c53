//! Single-character classification helpers used by scalar analysis and the
//! low-level writers.

/// `0-9`, `A-Z`, `a-z`, `_`, `-`. Used by [`crate::emitter::write_tag_content`]
/// to decide which bytes of a tag URI can be written verbatim.
pub(crate) fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Strict alphanumeric check used by anchor and `%TAG` handle validation.
/// Unlike [`is_alpha`], `_` and `-` are not accepted here.
pub(crate) fn is_alnum_strict(ch: char) -> bool {
    ch.is_alphanumeric()
}

pub(crate) fn is_ascii(ch: char) -> bool {
    ch.is_ascii()
}

pub(crate) fn is_printable(ch: char) -> bool {
    match ch {
        '\u{feff}' | '\u{fffe}' | '\u{ffff}' => false,
        '\x0a'
        | '\x20'..='\x7e'
        | '\u{00a0}'..='\u{00bf}'
        | '\u{00c0}'..='\u{cfff}'
        | '\u{d000}'..='\u{d7ff}'
        | '\u{e000}'..='\u{efff}'
        | '\u{f000}'..='\u{fffd}'
        | '\u{10000}'..='\u{10ffff}' => true,
        _ => false,
    }
}

pub(crate) fn is_bom(ch: char) -> bool {
    ch == '\u{feff}'
}

pub(crate) fn is_space(ch: impl Into<Option<char>>) -> bool {
    ch.into() == Some(' ')
}

pub(crate) fn is_tab(ch: impl Into<Option<char>>) -> bool {
    ch.into() == Some('\t')
}

pub(crate) fn is_blank(ch: impl Into<Option<char>>) -> bool {
    let ch = ch.into();
    is_space(ch) || is_tab(ch)
}

pub(crate) fn is_break(ch: impl Into<Option<char>>) -> bool {
    matches!(
        ch.into(),
        Some('\r' | '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}')
    )
}

pub(crate) fn is_breakz(ch: impl Into<Option<char>>) -> bool {
    let ch = ch.into();
    ch.is_none() || is_break(ch)
}

pub(crate) fn is_blankz(ch: impl Into<Option<char>>) -> bool {
    let ch = ch.into();
    is_blank(ch) || is_breakz(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_vs_strict() {
        assert!(is_alpha('_'));
        assert!(is_alpha('-'));
        assert!(!is_alnum_strict('_'));
        assert!(!is_alnum_strict('-'));
        assert!(is_alnum_strict('a'));
        assert!(is_alpha('a'));
    }

    #[test]
    fn printable_excludes_boms_and_surrogbr_noncharacters() {
        assert!(!is_printable('\u{feff}'));
        assert!(!is_printable('\u{ffff}'));
        assert!(is_printable('\n'));
        assert!(is_printable('a'));
    }

    #[test]
    fn blankz_is_blank_or_end_or_break() {
        assert!(is_blankz(None::<char>));
        assert!(is_blankz(Some(' ')));
        assert!(is_blankz(Some('\n')));
        assert!(!is_blankz(Some('a')));
    }
}
