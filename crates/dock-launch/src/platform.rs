//! Host platform detection and launch command construction.

use crate::error::LaunchError;

/// Host platform families with distinct launch conventions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Android,
    /// Anything else; launching is rejected explicitly rather than guessed.
    Other,
}

/// Detect the platform this process is running on.
pub fn detect_platform() -> Platform {
    match std::env::consts::OS {
        "windows" => Platform::Windows,
        "macos" => Platform::MacOs,
        "linux" => Platform::Linux,
        "android" => Platform::Android,
        _ => Platform::Other,
    }
}

/// Build the shell invocation that launches `path` with `args`.
///
/// Pure string assembly, no I/O. No escaping is applied beyond quoting the
/// executable path on Windows and macOS; both values come from the local
/// registry and are trusted by contract.
pub fn build_launch_command(
    path: &str,
    args: Option<&str>,
    platform: Platform,
) -> Result<String, LaunchError> {
    let args = args.unwrap_or("").trim();

    match platform {
        Platform::Windows => Ok(format!("\"{path}\" {args}")),
        Platform::MacOs => Ok(format!("open -a \"{path}\" {args}")),
        Platform::Linux => Ok(format!("{path} {args}")),
        // `path` is a package/activity component identifier here.
        Platform::Android => Ok(format!("adb shell am start -n {path}")),
        Platform::Other => Err(LaunchError::UnsupportedPlatform),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_is_a_bare_invocation() {
        let cmd = build_launch_command("/usr/bin/x", Some("--flag"), Platform::Linux).unwrap();
        assert_eq!(cmd, "/usr/bin/x --flag");
    }

    #[test]
    fn windows_quotes_the_path_and_keeps_the_separator() {
        let cmd = build_launch_command("C:\\x.exe", Some(""), Platform::Windows).unwrap();
        assert_eq!(cmd, "\"C:\\x.exe\" ");
    }

    #[test]
    fn macos_uses_the_application_opener() {
        let cmd =
            build_launch_command("Safari", Some("https://example.com"), Platform::MacOs).unwrap();
        assert_eq!(cmd, "open -a \"Safari\" https://example.com");
    }

    #[test]
    fn android_addresses_a_component() {
        let cmd = build_launch_command("com.app/.Main", None, Platform::Android).unwrap();
        assert_eq!(cmd, "adb shell am start -n com.app/.Main");
    }

    #[test]
    fn args_are_trimmed_and_default_to_empty() {
        let cmd = build_launch_command("/usr/bin/x", Some("  --flag  "), Platform::Linux).unwrap();
        assert_eq!(cmd, "/usr/bin/x --flag");
        let cmd = build_launch_command("/usr/bin/x", None, Platform::Linux).unwrap();
        assert_eq!(cmd, "/usr/bin/x ");
    }

    #[test]
    fn other_platform_is_rejected() {
        assert!(matches!(
            build_launch_command("/usr/bin/x", None, Platform::Other),
            Err(LaunchError::UnsupportedPlatform)
        ));
    }
}
