//! Method 3: open the document in a desktop browser and send it the OS
//! print command.
//!
//! The steps are written to a throwaway shell script:
//!
//! ```text
//! #!/bin/sh
//! open -a 'Safari' '/path/to/doc.html'
//! sleep 3
//! osascript -e 'tell application "Safari" to print the front document'
//! ```
//!
//! The script file is held as a [`TempPath`], so it is deleted when this
//! function returns on any path, including a panic in the runner. The
//! explicit `close()` on the happy path only exists to surface a failed
//! delete as an error.
//!
//! The print dialog saves wherever the browser is configured to save,
//! usually the downloads folder, not the requested output path.

use crate::error::Html2PdfError;
use crate::runner::{CommandRunner, CommandStatus};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::{debug, info};

/// Caveat attached to a successful fallback outcome.
pub const DOWNLOADS_NOTE: &str =
    "the browser print dialog saves to its default location (usually Downloads), not the requested output path";

/// Result of a completed fallback run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackRun {
    /// Where the script lived; already deleted.
    pub script_path: PathBuf,
    pub status: CommandStatus,
}

/// Build the print script for `html` in `browser`.
pub fn build_print_script(browser: &str, html: &Path, delay_secs: u64) -> String {
    format!(
        "#!/bin/sh\n\
         open -a {app} {html}\n\
         sleep {delay_secs}\n\
         osascript -e 'tell application \"{browser}\" to print the front document'\n",
        app = shell_quote(browser),
        html = shell_quote(&html.to_string_lossy()),
    )
}

/// Write, run and delete the print script.
///
/// A non-zero script status is an error: it is the last method and the
/// caller has nothing else to try.
pub fn run_print_fallback(
    runner: &dyn CommandRunner,
    browser: &str,
    html: &Path,
    delay_secs: u64,
) -> Result<FallbackRun, Html2PdfError> {
    let script = build_print_script(browser, html, delay_secs);
    let script_path = write_script(&script)?;
    let path = script_path.to_path_buf();
    debug!("Wrote print script to {}", path.display());

    info!("Printing via {} (waiting {}s for the page to load)", browser, delay_secs);
    let result = runner.run(&path, &[]);

    script_path
        .close()
        .map_err(|e| Html2PdfError::ScriptCleanupFailed {
            path: path.clone(),
            source: e,
        })?;

    let status = result.map_err(|e| Html2PdfError::ScriptLaunchFailed {
        path: path.clone(),
        source: e,
    })?;

    if !status.success() {
        return Err(Html2PdfError::ScriptFailed { code: status.code });
    }

    Ok(FallbackRun {
        script_path: path,
        status,
    })
}

/// Create a uniquely named `.sh` file holding `script`, mode 0755.
///
/// The write handle is closed before returning; Linux refuses to exec a
/// file that is still open for writing.
fn write_script(script: &str) -> Result<TempPath, Html2PdfError> {
    let mut file = tempfile::Builder::new()
        .prefix("html2pdf-print-")
        .suffix(".sh")
        .tempfile()
        .map_err(|e| Html2PdfError::ScriptWriteFailed { source: e })?;

    file.write_all(script.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| Html2PdfError::ScriptWriteFailed { source: e })?;

    let path = file.into_temp_path();
    make_executable(&path).map_err(|e| Html2PdfError::ScriptWriteFailed { source: e })?;
    Ok(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Single-quote `s` for POSIX sh.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::io;
    use std::sync::Mutex;

    /// Records what the script looked like at the moment it was run.
    struct ScriptSpy {
        exit: Option<i32>,
        seen: Mutex<Vec<(PathBuf, String, bool)>>,
    }

    impl ScriptSpy {
        fn new(exit: Option<i32>) -> Self {
            Self {
                exit,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for ScriptSpy {
        fn locate(&self, _program: &str) -> io::Result<Option<PathBuf>> {
            Ok(None)
        }

        fn run(&self, program: &Path, _args: &[OsString]) -> io::Result<CommandStatus> {
            let body = std::fs::read_to_string(program)?;
            self.seen
                .lock()
                .unwrap()
                .push((program.to_path_buf(), body, is_executable(program)));
            match self.exit {
                Some(code) => Ok(CommandStatus::exited(code)),
                None => Err(io::Error::new(io::ErrorKind::Other, "exec format error")),
            }
        }
    }

    #[cfg(unix)]
    fn is_executable(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(_path: &Path) -> bool {
        true
    }

    #[test]
    fn script_opens_waits_and_prints() {
        let script = build_print_script("Safari", Path::new("/docs/a.html"), 3);
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(
            lines,
            vec![
                "#!/bin/sh",
                "open -a 'Safari' '/docs/a.html'",
                "sleep 3",
                "osascript -e 'tell application \"Safari\" to print the front document'",
            ]
        );
    }

    #[test]
    fn script_quotes_awkward_paths() {
        let script = build_print_script("Safari", Path::new("/docs/it's here.html"), 3);
        assert!(script.contains(r"'/docs/it'\''s here.html'"), "got: {script}");
    }

    #[test]
    fn script_is_executable_and_removed_after_success() {
        let spy = ScriptSpy::new(Some(0));
        let run = run_print_fallback(&spy, "Safari", Path::new("/docs/a.html"), 3).unwrap();

        let seen = spy.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (path, body, executable) = &seen[0];
        assert_eq!(path, &run.script_path);
        assert!(body.contains("open -a 'Safari'"));
        assert!(*executable, "script should be chmod +x before running");
        assert!(path.extension().is_some_and(|e| e == "sh"));
        assert!(!path.exists(), "script should be deleted");
    }

    #[test]
    fn script_removed_when_it_fails() {
        let spy = ScriptSpy::new(Some(1));
        let err = run_print_fallback(&spy, "Safari", Path::new("/docs/a.html"), 0).unwrap_err();
        assert!(matches!(err, Html2PdfError::ScriptFailed { code: Some(1) }));

        let seen = spy.seen.lock().unwrap();
        assert!(!seen[0].0.exists());
    }

    #[test]
    fn script_removed_when_launch_fails() {
        let spy = ScriptSpy::new(None);
        let err = run_print_fallback(&spy, "Safari", Path::new("/docs/a.html"), 0).unwrap_err();
        assert!(matches!(err, Html2PdfError::ScriptLaunchFailed { .. }));

        let seen = spy.seen.lock().unwrap();
        assert!(!seen[0].0.exists());
    }

    #[test]
    fn each_run_gets_a_fresh_script() {
        let spy = ScriptSpy::new(Some(0));
        let a = run_print_fallback(&spy, "Safari", Path::new("/a.html"), 0).unwrap();
        let b = run_print_fallback(&spy, "Safari", Path::new("/b.html"), 0).unwrap();
        assert_ne!(a.script_path, b.script_path);
    }
}
