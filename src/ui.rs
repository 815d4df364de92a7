//! Output written by the command line tool.
//!
//! Success is exactly one line on stdout; failure is exactly one line on
//! stderr prefixed with the program name.

/// Program name used to prefix error lines
pub const PROGRAM_NAME: &str = "findversion";

/// Format an error line, collapsing embedded line breaks so it stays one line
pub fn format_error(message: &str) -> String {
    let message = message.replace(['\r', '\n'], " ");
    format!("{}: {}", PROGRAM_NAME, message.trim_end())
}

/// Print the resolved version on stdout
pub fn display_version(version: &str) {
    println!("{}", version);
}

/// Print a fatal error on stderr
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print tool version metadata on stdout
pub fn display_tool_version() {
    println!("{} version {}", PROGRAM_NAME, env!("CARGO_PKG_VERSION"));
}
