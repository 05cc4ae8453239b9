//! Git integration layer for hookgate
//!
//! Thin wrapper over git2 that extracts the text gates inspect: added lines
//! from the staged diff (pre-commit) and from outgoing ref ranges (pre-push).
//! Only additions count; deleting a flagged line must never trip a rule.

use anyhow::{Context, Result};
use git2::{Diff, DiffOptions, ErrorCode, Oid, Repository, Tree};
use std::path::Path;
use tracing::debug;

/// Added lines for one file touched by a diff.
#[derive(Debug, Clone, PartialEq)]
pub struct FileChange {
    /// Path of the file on the new side of the diff.
    pub path: String,

    /// Added lines, without their trailing newline.
    pub added: Vec<String>,
}

/// Git repository handle.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Discover and open the repository containing the current directory.
    pub fn discover() -> Result<Self> {
        let repo = Repository::discover(".").context("no git repository found")?;
        Ok(Self { repo })
    }

    /// Open the repository at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("failed to open git repository")?;
        Ok(Self { repo })
    }

    /// Added lines staged in the index, relative to HEAD. On an unborn
    /// branch every staged line counts as added.
    pub fn staged_changes(&self) -> Result<Vec<FileChange>> {
        let head_tree = match self.repo.head() {
            Ok(head) => Some(head.peel_to_tree().context("failed to resolve HEAD tree")?),
            Err(err) if err.code() == ErrorCode::UnbornBranch || err.code() == ErrorCode::NotFound => {
                None
            }
            Err(err) => return Err(err).context("failed to read HEAD"),
        };

        let index = self.repo.index().context("failed to read the index")?;
        let mut opts = DiffOptions::new();
        opts.context_lines(0);

        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), Some(&mut opts))
            .context("failed to diff HEAD against the index")?;

        collect_added(&diff)
    }

    /// Added lines in the range `old..new`. `old` is `None` for a ref the
    /// remote does not have yet; the whole tree then counts as added. Either
    /// end may be a commit or an annotated tag object.
    pub fn range_changes(&self, old: Option<Oid>, new: Oid) -> Result<Vec<FileChange>> {
        let new_tree = self.tree_of(new)?;
        let old_tree = old.map(|oid| self.tree_of(oid)).transpose()?;

        let mut opts = DiffOptions::new();
        opts.context_lines(0);

        let diff = self
            .repo
            .diff_tree_to_tree(old_tree.as_ref(), Some(&new_tree), Some(&mut opts))
            .with_context(|| format!("failed to diff commit range ending at {new}"))?;

        collect_added(&diff)
    }

    /// Annotated tag pushes hand the hook the tag object id, so peel
    /// through tags rather than insisting on a commit.
    fn tree_of(&self, oid: Oid) -> Result<Tree<'_>> {
        let object = self
            .repo
            .find_object(oid, None)
            .with_context(|| format!("object {oid} not found locally"))?;
        object
            .peel_to_tree()
            .with_context(|| format!("object {oid} does not resolve to a tree"))
    }
}

/// Flatten a diff into per-file added lines, in diff order.
fn collect_added(diff: &Diff) -> Result<Vec<FileChange>> {
    let mut changes: Vec<FileChange> = Vec::new();

    diff.foreach(
        &mut |_, _| true,
        None,
        None,
        Some(&mut |delta, _hunk, line| {
            if line.origin() != '+' {
                return true;
            }

            let path = delta
                .new_file()
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            let text = String::from_utf8_lossy(line.content())
                .trim_end_matches(['\r', '\n'])
                .to_string();

            match changes.iter_mut().find(|change| change.path == path) {
                Some(change) => change.added.push(text),
                None => changes.push(FileChange {
                    path,
                    added: vec![text],
                }),
            }
            true
        }),
    )
    .context("failed to walk the diff")?;

    debug!(files = changes.len(), "collected added lines");
    Ok(changes)
}
