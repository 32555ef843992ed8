//! Colored terminal messages. Data (tree, JSON, TOML) goes to stdout
//! uncolored; diagnostics go to stderr.
//!
//! `colored` honors NO_COLOR, CLICOLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{} {msg}", "error:".red().bold());
}

pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{} {msg}", "warning:".yellow().bold());
}

/// Completed package write, e.g. `✓ 12 records (14 files) -> deploy_pkg`.
pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {msg}", "✓".green());
}

/// Single file written, e.g. `Wrote: taxonomy.json`.
pub fn action(label: &str, target: &(impl Display + ?Sized)) {
    println!("{}: {target}", label.green().bold());
}

pub fn header(title: &(impl Display + ?Sized)) {
    println!("{}", title.to_string().cyan().bold());
}

/// Two-space indented line under a header.
pub fn detail(line: &(impl Display + ?Sized)) {
    println!("  {line}");
}

/// Raw data for piping.
pub fn info(data: &(impl Display + ?Sized)) {
    println!("{data}");
}
