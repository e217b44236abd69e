//! Terminal output helpers.
//!
//! Colors (disabled by `NO_COLOR`):
//! - green for success and the checked out stack
//! - red for errors, yellow for warnings
//! - cyan for paths, keys and hints
//! - dimmed for secondary info

use colored::Colorize;
use std::fmt::Display;

fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// `✓ exported 3 keys to .env`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", "✓".green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// `✗ STACK_NOT_FOUND: ...`, on stderr.
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "✗".red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// `⚠ PORT is not defined in stack dev`
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", "⚠".yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// `→ run: ymir init`
pub fn hint(msg: &str) {
    if colors_enabled() {
        println!("{} {}", "→".cyan(), msg.cyan());
    } else {
        println!("→ {}", msg);
    }
}

pub fn header(title: &str) {
    if colors_enabled() {
        println!("{}", title.bold());
    } else {
        println!("{}", title);
    }
}

/// Label dimmed, value bold.
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", label.dimmed(), value.to_string().bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// A list item marked as selected, e.g. the checked out stack.
pub fn current_item(item: &str) {
    if colors_enabled() {
        println!("  {} {}", "*".green(), item.green().bold());
    } else {
        println!("  * {}", item);
    }
}

pub fn path(p: impl Display) -> String {
    if colors_enabled() {
        p.to_string().cyan().to_string()
    } else {
        p.to_string()
    }
}

pub fn cmd(c: &str) -> String {
    if colors_enabled() {
        c.green().to_string()
    } else {
        c.to_string()
    }
}

pub fn key(k: &str) -> String {
    if colors_enabled() {
        k.cyan().to_string()
    } else {
        k.to_string()
    }
}

pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", msg.dimmed());
    } else {
        println!("{}", msg);
    }
}
