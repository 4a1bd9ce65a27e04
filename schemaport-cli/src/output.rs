//! Styled terminal output utilities.
//!
//! Status lines go to stderr so stdout only carries SQL or JSON artifacts.

use owo_colors::OwoColorize;

/// Print a header/title
pub fn header(text: &str) {
    eprintln!();
    eprintln!("{}", text.bold().cyan());
    eprintln!("{}", "─".repeat(text.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    eprintln!("  {}: {}", key.dimmed(), value);
}

/// Print a success message
pub fn success(text: &str) {
    eprintln!("{} {}", "✔".green().bold(), text.green());
}

/// Print an info message
pub fn info(text: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), text);
}

/// Print a warning message
pub fn warn(text: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), text.yellow());
}

/// Print an error message
pub fn error(text: &str) {
    eprintln!("{} {}", "✖".red().bold(), text.red());
}

/// Print a list item
pub fn list_item(text: &str) {
    eprintln!("  {} {}", "•".dimmed(), text);
}

/// Print a newline
pub fn newline() {
    eprintln!();
}

/// Write an artifact to stdout
pub fn artifact(text: &str) {
    print!("{}", text);
    if !text.is_empty() && !text.ends_with('\n') {
        println!();
    }
}
