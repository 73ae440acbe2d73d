use owo_colors::OwoColorize;
use std::env;
use std::path::{Path, PathBuf};

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print one change as `old -> new`, relative to the working directory.
/// Scripts may parse this line, so it carries no prefix.
pub fn report_change(old: &Path, new: &Path) {
    let line = format_change(old, new);
    if is_tty() {
        let (from, to) = line.split_once(" -> ").unwrap_or((line.as_str(), ""));
        println!("{} {} {}", from, "->".dimmed(), to.bold());
    } else {
        println!("{line}");
    }
}

/// `old -> new` with both sides relativized to the current directory.
pub fn format_change(old: &Path, new: &Path) -> String {
    let cwd = env::current_dir().ok();
    format!(
        "{} -> {}",
        relativize(old, cwd.as_deref()).display(),
        relativize(new, cwd.as_deref()).display()
    )
}

/// Strip `cwd` (or its canonical form) from `path` when it is a prefix.
pub fn relativize(path: &Path, cwd: Option<&Path>) -> PathBuf {
    let Some(cwd) = cwd else {
        return path.to_path_buf();
    };
    if let Ok(rel) = path.strip_prefix(cwd) {
        return rel.to_path_buf();
    }
    if let Ok(real) = dunce::canonicalize(cwd)
        && let Ok(rel) = path.strip_prefix(&real)
    {
        return rel.to_path_buf();
    }
    path.to_path_buf()
}
