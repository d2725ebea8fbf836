//! Styled status strings.

use console::style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// `=== text ===`, bold cyan.
#[must_use]
pub fn header(text: &str) -> String {
    let plain = format!("=== {text} ===");
    if is_color_disabled() {
        plain
    } else {
        style(plain).bold().cyan().to_string()
    }
}

#[must_use]
pub fn success(text: &str) -> String {
    tagged("[OK]", text, false)
}

#[must_use]
pub fn error(text: &str) -> String {
    tagged("[ERROR]", text, true)
}

fn tagged(tag: &str, text: &str, failed: bool) -> String {
    if is_color_disabled() {
        return format!("{tag} {text}");
    }
    let tag = if failed {
        style(tag).red().bold()
    } else {
        style(tag).green().bold()
    };
    format!("{tag} {text}")
}
