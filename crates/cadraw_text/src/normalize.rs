//! Text normalization before measuring and shaping

/// Entity kind selecting the normalization rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEntity {
    #[default]
    Text,
    Attrib,
    MText,
}

impl TextEntity {
    /// Rule for an entity type name; unknown types use the `TEXT` rule
    pub fn from_dxftype(dxftype: &str) -> TextEntity {
        match dxftype {
            "ATTRIB" => TextEntity::Attrib,
            "MTEXT" => TextEntity::MText,
            _ => TextEntity::Text,
        }
    }
}

const MTEXT_TAB: &str = "        ";
const MTEXT_PLACEHOLDER: char = '\u{25AF}';

fn is_non_printable(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') || (c.is_whitespace() && c != ' ')
}

/// Replace characters the outline source cannot draw.
///
/// `TEXT` and `ATTRIB`: tabs and non-printables become `?`.
/// `MTEXT`: a tab becomes eight spaces, other non-printables become `▯`.
pub fn prepare_string_for_rendering(text: &str, entity: TextEntity) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_non_printable(c) {
            out.push(c);
            continue;
        }
        match entity {
            TextEntity::Text | TextEntity::Attrib => out.push('?'),
            TextEntity::MText if c == '\t' => out.push_str(MTEXT_TAB),
            TextEntity::MText => out.push(MTEXT_PLACEHOLDER),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_rule() {
        assert_eq!(
            prepare_string_for_rendering("a\tb\u{7}c", TextEntity::Text),
            "a?b?c"
        );
        assert_eq!(
            prepare_string_for_rendering("x\ny", TextEntity::Attrib),
            "x?y"
        );
        assert_eq!(prepare_string_for_rendering("a b", TextEntity::Text), "a b");
    }

    #[test]
    fn test_mtext_rule() {
        assert_eq!(
            prepare_string_for_rendering("a\tb\u{2029}", TextEntity::MText),
            "a        b\u{25AF}"
        );
    }

    #[test]
    fn test_unknown_entity_uses_text_rule() {
        assert_eq!(TextEntity::from_dxftype("LINE"), TextEntity::Text);
        assert_eq!(TextEntity::from_dxftype("MTEXT"), TextEntity::MText);
    }
}
