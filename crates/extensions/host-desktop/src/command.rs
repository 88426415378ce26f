//! Command lines for the platform notification and URL-opening tools.

use std::process::Stdio;

use tokio::process::Command;
use url::Url;

use pushgate_protocols::HostError;

/// A program invocation, kept as data until it is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl DesktopCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Command showing a desktop notification, or `None` where the platform
    /// has no supported notifier.
    pub fn notification(title: &str, body: &str, icon: Option<&str>) -> Option<Self> {
        if cfg!(target_os = "macos") {
            let script = format!(
                r#"display notification "{}" with title "{}""#,
                escape_applescript(body),
                escape_applescript(title)
            );
            Some(Self::new("osascript").arg("-e").arg(script))
        } else if cfg!(target_os = "linux") {
            let mut cmd = Self::new("notify-send");
            if let Some(icon) = icon {
                cmd = cmd.arg("--icon").arg(icon);
            }
            // Payload text must never be parsed as options.
            Some(cmd.arg("--").arg(title).arg(body))
        } else {
            None
        }
    }

    /// Command opening `url` in the user's browser.
    ///
    /// `opener` overrides the platform default; it may carry its own
    /// arguments, split on whitespace.
    pub fn open_url(url: &str, opener: Option<&str>) -> Option<Self> {
        if let Some(opener) = opener {
            let mut parts = opener.split_whitespace();
            let program = parts.next()?;
            let cmd = parts.fold(Self::new(program), |cmd, part| cmd.arg(part));
            return Some(cmd.arg(url));
        }

        if cfg!(target_os = "macos") {
            Some(Self::new("open").arg(url))
        } else if cfg!(target_os = "linux") {
            Some(Self::new("xdg-open").arg(url))
        } else if cfg!(target_os = "windows") {
            Some(Self::new("cmd").arg("/C").arg("start").arg("").arg(url))
        } else {
            None
        }
    }

    /// Run to completion.
    ///
    /// A program that cannot be spawned is a [`HostError::Io`]; a non-zero
    /// exit is reported through `on_exit`.
    pub async fn run(&self, on_exit: fn(String) -> HostError) -> Result<(), HostError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(on_exit(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

/// Resolve a click action against the application origin.
///
/// Absolute URLs pass through unchanged.
pub fn resolve_url(origin: &str, target: &str) -> Result<Url, HostError> {
    if let Ok(url) = Url::parse(target) {
        return Ok(url);
    }
    let base = Url::parse(origin)
        .map_err(|e| HostError::OpenFailed(format!("invalid origin {}: {}", origin, e)))?;
    base.join(target)
        .map_err(|e| HostError::OpenFailed(format!("invalid target {}: {}", target, e)))
}

fn escape_applescript(s: &str) -> String {
    s.replace('\\', r"\\").replace('"', r#"\""#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let url = resolve_url("http://localhost:3000", "/chat/42").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/chat/42");
    }

    #[test]
    fn test_resolve_root() {
        let url = resolve_url("http://localhost:3000", "/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_resolve_keeps_query() {
        let url = resolve_url("https://app.example.com/base/", "/feed?tab=unread").unwrap();
        assert_eq!(url.as_str(), "https://app.example.com/feed?tab=unread");
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let url = resolve_url("http://localhost:3000", "https://other.example.com/x").unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/x");
    }

    #[test]
    fn test_resolve_invalid_origin() {
        let err = resolve_url("not a url", "/x").unwrap_err();
        assert!(matches!(err, HostError::OpenFailed(_)));
    }

    #[test]
    fn test_open_url_custom_opener() {
        let cmd = DesktopCommand::open_url("http://localhost:3000/", Some("firefox --new-tab")).unwrap();
        assert_eq!(cmd.program, "firefox");
        assert_eq!(cmd.args, vec!["--new-tab", "http://localhost:3000/"]);
    }

    #[test]
    fn test_open_url_blank_opener() {
        assert!(DesktopCommand::open_url("http://localhost:3000/", Some("   ")).is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_notification_command() {
        let cmd = DesktopCommand::notification("T", "B", Some("/logo192.png")).unwrap();
        assert_eq!(cmd.program, "notify-send");
        assert_eq!(cmd.args, vec!["--icon", "/logo192.png", "--", "T", "B"]);

        let cmd = DesktopCommand::open_url("http://localhost:3000/", None).unwrap();
        assert_eq!(cmd.program, "xdg-open");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_option_like_title_stays_positional() {
        let cmd = DesktopCommand::notification("--version", "--app-name=x", None).unwrap();
        assert_eq!(cmd.args, vec!["--", "--version", "--app-name=x"]);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_macos_notification_escapes_quotes() {
        let cmd = DesktopCommand::notification(r#"Say "hi""#, "B", None).unwrap();
        assert_eq!(cmd.program, "osascript");
        assert!(cmd.args[1].contains(r#"with title "Say \"hi\"""#));
    }

    #[test]
    fn test_escape_applescript_backslash() {
        assert_eq!(escape_applescript(r#"a\b"c"#), r#"a\\b\"c"#);
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let err = DesktopCommand::new("pushgate-no-such-program")
            .run(HostError::DisplayFailed)
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::Io(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_nonzero_exit_uses_on_exit() {
        let err = DesktopCommand::new("false")
            .run(HostError::DisplayFailed)
            .await
            .unwrap_err();
        match err {
            HostError::DisplayFailed(message) => assert!(message.starts_with("false exited")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
