//! Terminal UI utilities

use console::style;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("ℹ").blue().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), message);
}

/// Print a section header
pub fn header(text: &str) {
    println!("\n{}", style(text).bold().underlined());
}

/// Print a key-value pair
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).cyan(), value);
}

/// Print a separator line
pub fn separator() {
    println!("{}", style("─".repeat(60)).dim());
}

/// Print JSON prettily
pub fn json(value: &serde_json::Value) {
    if let Ok(pretty) = serde_json::to_string_pretty(value) {
        println!("{}", pretty);
    }
}
