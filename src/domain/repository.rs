use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Directory name for a clone of `remote_url`, following git's own
/// humanish rule: the last path segment without `/.git`, `.git` or
/// `.bundle`.
pub fn repository_dir_name(remote_url: &str) -> AppResult<String> {
    let mut trimmed = remote_url.trim().trim_end_matches('/');
    if let Some(stripped) = trimmed.strip_suffix("/.git") {
        trimmed = stripped.trim_end_matches('/');
    }
    let segment = match trimmed.rsplit_once('/') {
        Some((_, last)) => last,
        None => trimmed
            .rsplit_once(':')
            .map(|(_, last)| last)
            .unwrap_or(trimmed),
    };
    let name = segment
        .strip_suffix(".git")
        .or_else(|| segment.strip_suffix(".bundle"))
        .unwrap_or(segment);

    if name.is_empty() {
        return Err(AppError::Configuration(format!(
            "cannot derive a repository directory from remote URL '{remote_url}'"
        )));
    }
    Ok(name.to_string())
}

pub fn local_clone_path(parent_dir: &Path, remote_url: &str) -> AppResult<PathBuf> {
    Ok(parent_dir.join(repository_dir_name(remote_url)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_path_from_https_remote() {
        let path = local_clone_path(
            Path::new("/home/me/src"),
            "https://github.com/timjstewart/flint.git",
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/home/me/src/flint"));
    }

    #[test]
    fn keeps_name_without_git_suffix() {
        assert_eq!(
            repository_dir_name("https://github.com/timjstewart/flint").unwrap(),
            "flint"
        );
        assert_eq!(
            repository_dir_name("https://github.com/timjstewart/flint/").unwrap(),
            "flint"
        );
    }

    #[test]
    fn handles_scp_style_remotes() {
        assert_eq!(
            repository_dir_name("git@github.com:timjstewart/flint.git").unwrap(),
            "flint"
        );
        assert_eq!(repository_dir_name("git@host:flint.git").unwrap(), "flint");
    }

    #[test]
    fn strips_git_directory_and_bundle_suffixes() {
        assert_eq!(repository_dir_name("https://host/foo/.git").unwrap(), "foo");
        assert_eq!(repository_dir_name("/srv/repos/foo.git/.git").unwrap(), "foo");
        assert_eq!(repository_dir_name("/backups/foo.bundle").unwrap(), "foo");
    }

    #[test]
    fn rejects_remote_without_name() {
        assert!(matches!(
            repository_dir_name("git@host:.git"),
            Err(AppError::Configuration(_))
        ));
        assert!(repository_dir_name("").is_err());
        assert!(repository_dir_name("/").is_err());
    }
}
