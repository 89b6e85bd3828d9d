//! Opening URLs in the user's web browser.
//!
//! The `BROWSER` environment variable wins when set (its first
//! whitespace-separated word is the program, the rest are leading
//! arguments). Otherwise the platform opener is used: `open` on macOS,
//! `cmd /C start` on Windows and `xdg-open` everywhere else.

use std::io;
use std::process::{Command, Stdio};
use tracing::debug;

/// Open `url` in a browser and wait for the launcher to exit.
///
/// # Errors
///
/// Fails when the launcher cannot be spawned or exits unsuccessfully.
pub fn open(url: &str) -> io::Result<()> {
    let browser = std::env::var("BROWSER").ok();
    let mut command = opener_command(url, browser.as_deref());
    debug!(program = ?command.get_program(), url, "opening browser");

    let status = command.stdin(Stdio::null()).stdout(Stdio::null()).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "browser command {:?} exited with {status}",
            command.get_program()
        )))
    }
}

fn opener_command(url: &str, browser: Option<&str>) -> Command {
    if let Some(mut words) = browser.map(str::split_whitespace) {
        if let Some(program) = words.next() {
            let mut command = Command::new(program);
            command.args(words).arg(url);
            return command;
        }
    }

    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(url);
        command
    } else if cfg!(windows) {
        let mut command = Command::new("cmd");
        // Empty window title, otherwise `start` treats a quoted URL as one.
        command.args(["/C", "start", ""]).arg(url);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    }
}
