//! Shell assignment rendering.
//!
//! Formats the active key as a line a shell can `eval` to export it.

/// Target shell syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    /// `export NAME='value'` (sh, bash, zsh).
    #[default]
    Posix,
    /// `set -gx NAME 'value'`.
    Fish,
}

/// Render an assignment of `value` to `name`.
///
/// `name` must already be a valid variable name.
pub fn render_export(syntax: Syntax, name: &str, value: &str) -> String {
    match syntax {
        Syntax::Posix => format!("export {}={}", name, quote_posix(value)),
        Syntax::Fish => format!("set -gx {} {}", name, quote_fish(value)),
    }
}

/// Single-quote for POSIX shells. `'` becomes `'\''`.
fn quote_posix(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Single-quote for fish, where `\` and `'` are escaped inside quotes.
fn quote_fish(value: &str) -> String {
    format!("'{}'", value.replace('\\', r"\\").replace('\'', r"\'"))
}
