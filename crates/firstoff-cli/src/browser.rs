//! Opens the served game in the system browser.

use std::time::Duration;

use tokio::process::Command;

/// Tracing target for browser launch.
const TRACING_TARGET: &str = "firstoff_cli::browser";

/// Delay between binding the listener and opening the browser.
const OPEN_DELAY: Duration = Duration::from_secs(1);

/// Opens `url` in the system browser after a short delay.
///
/// Runs as a detached task. Failures are logged and never reach the server.
pub fn open_after_delay(url: String) {
    tokio::spawn(async move {
        tokio::time::sleep(OPEN_DELAY).await;

        match open_command(&url).status().await {
            Ok(status) if status.success() => {
                tracing::info!(target: TRACING_TARGET, url = %url, "opened game in browser");
            }
            Ok(status) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    url = %url,
                    status = %status,
                    "browser launcher exited with failure"
                );
            }
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    url = %url,
                    error = %err,
                    "could not open browser, open the URL manually"
                );
            }
        }
    });
}

/// Builds the platform command that opens `url`.
fn open_command(url: &str) -> Command {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    command.arg(url);
    command
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn command_receives_url() {
        let command = open_command("http://127.0.0.1:8080");
        let args: Vec<_> = command.as_std().get_args().collect();
        assert_eq!(args.last().copied(), Some(OsStr::new("http://127.0.0.1:8080")));
    }
}
