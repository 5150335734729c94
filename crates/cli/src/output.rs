//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a hint below an error
    pub fn hint(message: &str) {
        eprintln!("  {} {}", "→".dimmed(), message.dimmed());
    }

    /// Print a section banner framed by rules
    pub fn header(message: &str) {
        println!();
        for (i, line) in banner_lines(message).iter().enumerate() {
            if i == 1 {
                println!("{}", line.green().bold());
            } else {
                println!("{}", line.green());
            }
        }
        println!();
    }
}

const BANNER_WIDTH: usize = 60;

/// Plain banner text: rule, indented title, rule.
///
/// The rule grows with titles wider than the default width.
pub fn banner_lines(title: &str) -> [String; 3] {
    let width = BANNER_WIDTH.max(title.chars().count() + 4);
    let rule = "━".repeat(width);
    [rule.clone(), format!("  {}", title), rule]
}

/// Format a distance in kilometers with one decimal
pub fn format_km(distance_km: f64) -> String {
    if distance_km.is_finite() {
        format!("{:.1} km", distance_km)
    } else {
        "n/a".to_string()
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
