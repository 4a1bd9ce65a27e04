//! Literal value escaping for single-row statements.

use schemaport_schema::Dialect;

/// Escape a string for use inside a single-quoted SQL literal.
///
/// NUL, LF, CR, backslash, both quote characters and SUB (0x1A) become a
/// backslash followed by `0`, `n`, `r`, `\`, `'`, `"` and `Z` respectively.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 2);
    for c in value.chars() {
        let escaped = match c {
            '\0' => '0',
            '\n' => 'n',
            '\r' => 'r',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            '\x1a' => 'Z',
            _ => {
                out.push(c);
                continue;
            }
        };
        out.push('\\');
        out.push(escaped);
    }
    out
}

/// Reverse [`escape_value`].
///
/// Unknown escape sequences and a trailing lone backslash are kept verbatim.
pub fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('\0'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('Z') => out.push('\x1a'),
            Some(q @ ('\\' | '\'' | '"')) => out.push(q),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Render a value as a quoted, escaped SQL literal for `dialect`.
///
/// Postgres literals use the `E'...'` form so backslash escapes are honored
/// regardless of `standard_conforming_strings`. SUB has no single-letter
/// escape there and is written as `\x1a`.
pub fn quote_value(dialect: Dialect, value: &str) -> String {
    match dialect {
        Dialect::MySql => format!("'{}'", escape_value(value)),
        Dialect::Postgres => {
            let escaped = value
                .split('\x1a')
                .map(escape_value)
                .collect::<Vec<_>>()
                .join("\\x1a");
            format!("E'{}'", escaped)
        }
    }
}
