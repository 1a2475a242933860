//! Parsing and formatting of inline declaration lists (`color: red; margin: 0`).

use indexmap::IndexMap;

/// Property name to value, in declaration order.
pub type StyleMap = IndexMap<String, String>;

/// Separator written between declarations by [`format_style`].
const DECLARATION_SEPARATOR: &str = "; ";

/// Parse a `style` attribute value into an ordered map.
///
/// Declarations are split on `;` only outside parentheses, so
/// `background: url(data:image/png;base64,abc)` stays a single entry. Each
/// declaration is split on its first `:`; pieces without a colon are
/// dropped. Names and values are trimmed. A repeated property keeps its
/// first position and takes the later value.
#[must_use]
pub fn parse_style(input: &str) -> StyleMap {
    let mut styles = StyleMap::new();
    if input.is_empty() {
        return styles;
    }

    // A stray `)` drives the depth negative, which suppresses splitting
    // until a later `(` balances it.
    let mut depth: isize = 0;
    let mut start = 0;
    for (index, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ';' if depth == 0 => {
                push_declaration(&mut styles, &input[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    push_declaration(&mut styles, &input[start..]);

    styles
}

/// Split one `name: value` piece and store it.
fn push_declaration(styles: &mut StyleMap, piece: &str) {
    let piece = piece.trim();
    if let Some((name, value)) = piece.split_once(':') {
        let _ = styles.insert(name.trim().to_string(), value.trim().to_string());
    }
}

/// Serialize a map back into attribute text, preserving insertion order.
#[must_use]
pub fn format_style(styles: &StyleMap) -> String {
    styles
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join(DECLARATION_SEPARATOR)
}
