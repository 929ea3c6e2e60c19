//! # Error Suggestions
//!
//! Helpers that turn the common user mistakes into errors carrying `hint:`
//! lines, so the CLI says what went wrong and how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use git_anchor::suggestions;
//!
//! if !manifest_path.exists() {
//!     return Err(suggestions::manifest_not_found(&manifest_path));
//! }
//! ```

use std::path::Path;

use crate::error::Error;

/// Generate an error for when the dependency manifest is not found.
pub fn manifest_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Manifest not found: {path}\n\n\
         hint: Run 'git-anchor example > deps.json' to start from an example\n\
         hint: Pass the manifest path as an argument\n\
         hint: Set the GIT_ANCHOR_MANIFEST environment variable",
        path = path.display()
    )
}

/// Generate an error for a directory that is not inside a git work tree.
pub fn not_a_work_tree(dir: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "{dir} is not inside a git work tree\n\n\
         hint: Run git-anchor from inside the repository that declares the dependencies\n\
         hint: Use --repo to point at the repository root",
        dir = dir.display()
    )
}

/// Generate an error for a manifest entry flagged as a squashed subtree that
/// the local history does not record.
pub fn not_a_subtree(directory: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "{directory} is not a git subtree\n\n\
         hint: Run 'git-anchor list' to see the subtrees recorded in the history\n\
         hint: Remove \"SquashedSubtree\" from the entry if it is tracked another way\n\
         hint: Pin the revision explicitly with \"Rev\""
    )
}

/// Generate an error for a dependency whose history shares nothing with ours.
pub fn no_common_ancestor(url: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "No common commit between the local history and {url}\n\n\
         hint: The remote history may have been rewritten\n\
         hint: Use --branch if the dependency is tracked from a non-default branch\n\
         hint: Pin the revision explicitly with \"Rev\""
    )
}

/// Adds hints to the library errors users can act on; everything else is
/// passed through unchanged.
pub fn explain(error: Error) -> anyhow::Error {
    match error {
        Error::NotAWorkTree { dir } => not_a_work_tree(&dir),
        Error::NotASubtree { directory } => not_a_subtree(&directory),
        Error::NoCommonAncestor { url } => no_common_ancestor(&url),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_manifest_not_found_has_hints() {
        let message = manifest_not_found(Path::new("deps.json")).to_string();
        assert!(message.contains("Manifest not found: deps.json"));
        assert!(message.contains("hint: Run 'git-anchor example"));
        assert!(message.contains("GIT_ANCHOR_MANIFEST"));
    }

    #[test]
    fn test_explain_not_a_subtree() {
        let message = explain(Error::NotASubtree {
            directory: "libs/foo".to_string(),
        })
        .to_string();
        assert!(message.starts_with("libs/foo is not a git subtree"));
        assert!(message.contains("git-anchor list"));
    }

    #[test]
    fn test_explain_not_a_work_tree() {
        let message = explain(Error::NotAWorkTree {
            dir: PathBuf::from("/tmp/x"),
        })
        .to_string();
        assert!(message.contains("/tmp/x is not inside a git work tree"));
        assert!(message.contains("--repo"));
    }

    #[test]
    fn test_explain_no_common_ancestor() {
        let message = explain(Error::NoCommonAncestor {
            url: "github.com/a/b".to_string(),
        })
        .to_string();
        assert!(message.contains("github.com/a/b"));
        assert!(message.contains("--branch"));
    }

    #[test]
    fn test_explain_passes_other_errors_through() {
        let message = explain(Error::UnsupportedLanguage {
            language: "fish".to_string(),
        })
        .to_string();
        assert_eq!(
            message,
            "Script generation for language fish is not implemented"
        );
    }
}
