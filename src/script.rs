//! # Verification Script Rendering
//!
//! Renders a [`ResolvedManifest`] into a shell script that, when run from the
//! repository root, checks every dependency directory:
//!
//! - a missing directory inside a git work tree is an error (the user should
//!   add the subtree); outside one it is cloned and checked out at the pinned
//!   revision;
//! - a nested clone is compared against its `HEAD`;
//! - a subtree is compared against the newest `git-subtree-split` recorded
//!   for its directory.
//!
//! Rendering is a pure function of the manifest.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::manifest::ResolvedManifest;

/// Languages a verification script can be generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLanguage {
    Bash,
}

impl FromStr for ScriptLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bash" => Ok(ScriptLanguage::Bash),
            _ => Err(Error::UnsupportedLanguage {
                language: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScriptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptLanguage::Bash => f.write_str("bash"),
        }
    }
}

/// Shell functions shared by every generated bash script.
const BASH_PRELUDE: &str = r#"#!/bin/bash
# Generated by git-anchor. Run from the repository root to verify that every
# dependency is present at its pinned revision.

function subtreerev {
	git log | grep -E "(git-subtree-dir: $1\$|git-subtree-split)" | grep -A 1 "git-subtree-dir: $1\$" | grep git-subtree-split | head -1 | tr -d ' ' | cut -d ":" -f2
}

function subtrees {
	git log | grep git-subtree-dir | tr -d ' ' | cut -d ":" -f2 | sort | uniq | xargs -I {} bash -c 'if [ -d "$(git rev-parse --show-toplevel)/{}" ] ; then echo {}; fi'
}

function clonerev {
	(cd "$1" && git rev-parse HEAD)
}

function checkdep {
	dir=$1
	repo=$2
	rev=$3
	echo "checking dependency $dir $repo $rev"
	if [ ! -d "$dir" ]; then
		if git rev-parse --is-inside-work-tree > /dev/null 2>&1
		then
			echo "ERROR: This is a git repo, but $dir does not exist."
			echo "       You could add a subtree like so:"
			echo "       $ git subtree add --prefix=$dir $repo master"
			exit 1
		else
			mkdir -p "$dir"
			git clone "$repo" "$dir"
			(cd "$dir" && git checkout "$rev")
		fi
	else
		if [ -e "$dir/.git" ]; then
			echo "found git repo at $dir"
			crev=$(clonerev "$dir")
			if [ "$crev" == "$rev" ]; then
				echo "git clone $dir is the correct revision"
			else
				echo "WARNING: git clone $dir is revision $crev, but correct version is $rev"
			fi
		else
			ss=$(subtrees)
			if [[ $ss == *"$dir"* ]]; then
				echo "found subtree at $dir"
				srev=$(subtreerev "$dir")
				if [ "$srev" == "$rev" ]; then
					echo "git subtree $dir is the correct revision"
				else
					echo "WARNING: git subtree (Please ignore this warning if your subtree is not squashed) $dir is revision $srev, but correct version is $rev."
				fi
			else
				echo "WARNING: $dir exists, but is not git repo or git subtree"
			fi
		fi
	fi
}
"#;

/// Renders the verification script for `manifest`.
pub fn render(language: ScriptLanguage, manifest: &ResolvedManifest) -> String {
    match language {
        ScriptLanguage::Bash => render_bash(manifest),
    }
}

fn render_bash(manifest: &ResolvedManifest) -> String {
    let mut script = String::from(BASH_PRELUDE);
    let dir = shell_quote(&manifest.dir);

    script.push('\n');
    script.push_str(&format!("if [ ! -d {} ]; then\n", dir));
    script.push_str(&format!(
        "\techo \"ERROR: \"{}\" does not exist, maybe you are running this script from the wrong folder.\"\n",
        dir
    ));
    script.push_str("\texit 1\nfi\n\n");

    for dep in &manifest.deps {
        script.push_str(&format!(
            "checkdep {} {} {}\n",
            shell_quote(&dep.directory),
            shell_quote(&dep.repository),
            shell_quote(dep.revision.as_str())
        ));
    }

    script.push_str("\nexit 0\n");
    script
}

/// Quotes `value` for a POSIX shell unless it only holds safe characters.
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_./:@%+=,-".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r#"'\''"#))
    }
}
