//! Thin wrappers around the system `git` command.

use std::path::Path;
use std::process::{Child, Command, Stdio};

use crate::error::Error;

/// Clone the default branch (or `branch`) of a repository into `target_dir`.
///
/// `target_dir` may already exist as long as it is empty. This uses the
/// system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
pub fn clone_single_branch(
    url: &str,
    branch: Option<&str>,
    target_dir: &Path,
) -> Result<(), Error> {
    let mut command = Command::new("git");
    command.args(["clone", "--single-branch"]);
    if let Some(branch) = branch {
        command.args(["--branch", branch]);
    }
    command.arg(url).arg(target_dir);

    let output = command.output().map_err(|e| Error::GitClone {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let message = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            format!(
                "Authentication failed. Make sure you have access to the repository.\n\
                For private repos, ensure you have:\n\
                - SSH key added to ssh-agent\n\
                - Git credentials configured\n\
                - Personal access token set up\n\
                Error: {}",
                stderr.trim()
            )
        } else {
            stderr.trim().to_string()
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            message,
        });
    }

    Ok(())
}

/// Check whether `dir` is inside a git work tree.
///
/// A failing `git rev-parse` (not a repository) is reported as `Ok(false)`;
/// only a missing or unrunnable `git` binary is an error.
pub fn is_inside_work_tree(dir: &Path) -> Result<bool, Error> {
    let output = Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: "rev-parse --is-inside-work-tree".to_string(),
            dir: dir.to_path_buf(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Ok(false);
    }

    Ok(String::from_utf8_lossy(&output.stdout).contains("true"))
}

/// Start `git log` in `dir` with stdout and stderr piped.
///
/// The caller owns the child and is responsible for draining stdout and
/// reaping the process (see [`crate::history::LogLines`]).
pub fn spawn_log(dir: &Path, extra_args: &[&str]) -> Result<Child, Error> {
    Command::new("git")
        .arg("log")
        .args(extra_args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::SourceUnavailable {
            location: dir.to_path_buf(),
            message: format!("failed to run git log: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_is_inside_work_tree_false_for_plain_directory() {
        if !git_available() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        // GIT_CEILING_DIRECTORIES is not set here, so only assert when the
        // temp dir is not itself nested in a checkout.
        let parent_is_repo = is_inside_work_tree(temp_dir.path().parent().unwrap()).unwrap();
        if !parent_is_repo {
            assert!(!is_inside_work_tree(temp_dir.path()).unwrap());
        }
    }

    #[test]
    fn test_is_inside_work_tree_true_after_init() {
        if !git_available() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let status = Command::new("git")
            .args(["init", "--quiet"])
            .current_dir(temp_dir.path())
            .status()
            .unwrap();
        assert!(status.success());

        assert!(is_inside_work_tree(temp_dir.path()).unwrap());
    }

    #[test]
    fn test_is_inside_work_tree_missing_directory_is_error() {
        let result = is_inside_work_tree(Path::new("/nonexistent/git-anchor/dir"));
        assert!(matches!(result, Err(Error::GitCommand { .. })));
    }

    #[test]
    fn test_clone_single_branch_reports_bad_source() {
        if !git_available() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no-such-repo");
        let target = temp_dir.path().join("clone");

        let result = clone_single_branch(missing.to_str().unwrap(), None, &target);
        match result {
            Err(Error::GitClone { url, message }) => {
                assert!(url.contains("no-such-repo"));
                assert!(!message.is_empty());
            }
            other => panic!("expected GitClone error, got {:?}", other),
        }
    }
}
