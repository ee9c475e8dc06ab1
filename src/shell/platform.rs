//! Platform queries: privileges and CI detection.

use std::env;

use super::Invocation;

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`.
pub fn is_ci() -> bool {
    env::var("CI").is_ok()
        || env::var("GITHUB_ACTIONS").is_ok()
        || env::var("GITLAB_CI").is_ok()
        || env::var("JENKINS_URL").is_ok()
}

/// Check if running as root.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}

/// Wrap an invocation in `sudo` when `use_sudo` is set.
pub fn elevate(invocation: Invocation, use_sudo: bool) -> Invocation {
    if !use_sudo || invocation.is_elevated() {
        return invocation;
    }

    let mut wrapped = Invocation::new("sudo")
        .arg(invocation.program)
        .args(invocation.args);
    wrapped.cwd = invocation.cwd;
    wrapped.env = invocation.env;
    wrapped.inherit_stdio = invocation.inherit_stdio;
    wrapped
}
