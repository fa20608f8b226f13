//! Diagnostics on stderr
//!
//! stdout is reserved for keys and signatures, so everything here goes to
//! stderr.

use colored::Colorize;

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".bright_red(), msg.red());
}

pub fn print_success(msg: &str) {
    eprintln!("{} {}", "✓".bright_green(), msg.bright_green());
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "⚠".bright_yellow(), msg.yellow());
}
