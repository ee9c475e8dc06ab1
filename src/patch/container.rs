//! Resource container (`app.asar`) handling through the `asar` tool.

use std::path::Path;

use crate::error::{RepackError, Result};
use crate::shell::{Invocation, ProcessRunner};

/// Name of the container tool on `PATH`.
pub const ASAR: &str = "asar";

/// Unpack `archive` into `dest`.
pub fn extract(runner: &dyn ProcessRunner, archive: &Path, dest: &Path) -> Result<()> {
    let invocation = Invocation::new(ASAR)
        .arg("e")
        .path_arg(archive)
        .path_arg(dest);

    let output = runner.run(&invocation)?;
    if output.success() {
        Ok(())
    } else {
        Err(RepackError::Unpack {
            archive: archive.to_path_buf(),
            code: output.exit_code,
        })
    }
}

/// Pack `dir` into `archive`.
pub fn pack(runner: &dyn ProcessRunner, dir: &Path, archive: &Path) -> Result<()> {
    let invocation = Invocation::new(ASAR).arg("p").path_arg(dir).path_arg(archive);
    runner.run_checked(&invocation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockRunner, ProcessOutput};

    #[test]
    fn extract_builds_command() {
        let runner = MockRunner::new();
        extract(&runner, Path::new("/b/app.asar"), Path::new("/b/app")).unwrap();

        let calls = runner.calls_to(ASAR);
        assert_eq!(calls[0].args, vec!["e", "/b/app.asar", "/b/app"]);
    }

    #[test]
    fn extract_failure_is_unpack_error() {
        let runner = MockRunner::new();
        runner.respond(ASAR, ProcessOutput::failed(1, "bad header"));

        let err = extract(&runner, Path::new("/b/app.asar"), Path::new("/b/app")).unwrap_err();
        assert!(matches!(err, RepackError::Unpack { code: Some(1), .. }));
    }

    #[test]
    fn pack_failure_is_tool_error() {
        let runner = MockRunner::new();
        runner.respond(ASAR, ProcessOutput::failed(3, "disk full"));

        let err = pack(&runner, Path::new("/b/app"), Path::new("/b/app.asar")).unwrap_err();
        match err {
            RepackError::ToolInvocation { command, code, stderr } => {
                assert_eq!(command, "asar p /b/app /b/app.asar");
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "disk full");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
