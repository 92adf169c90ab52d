//! Command templates loaded from a directory of Markdown files.
//!
//! Each command `name` maps to `<dir>/<name>.md`. The file body is the
//! template; `$ARGUMENTS` substitution happens in the domain layer.

use async_trait::async_trait;
use relay_application::{CommandSource, CommandSourceError};
use relay_domain::CommandTemplate;
use std::path::PathBuf;
use tracing::debug;

pub struct FileCommandSource {
    dir: PathBuf,
}

impl FileCommandSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Command names are bare identifiers; anything that could walk the
    /// filesystem is treated as an unknown command.
    fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && !name.contains(['/', '\\'])
            && !name.contains("..")
    }
}

#[async_trait]
impl CommandSource for FileCommandSource {
    async fn load(&self, name: &str) -> Result<CommandTemplate, CommandSourceError> {
        if !Self::is_valid_name(name) {
            return Err(CommandSourceError::NotFound(name.to_string()));
        }

        let path = self.dir.join(format!("{}.md", name));
        debug!(path = %path.display(), "Loading command template");

        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(CommandTemplate::new(name, body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CommandSourceError::NotFound(name.to_string()))
            }
            Err(e) => Err(CommandSourceError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_template_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("review.md"), "Review: $ARGUMENTS").unwrap();

        let source = FileCommandSource::new(dir.path());
        let template = source.load("review").await.unwrap();
        assert_eq!(template.name(), "review");
        assert_eq!(template.render("lib.rs"), "Review: lib.rs");
    }

    #[tokio::test]
    async fn missing_template_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileCommandSource::new(dir.path());
        let err = source.load("missing").await.unwrap_err();
        assert!(matches!(err, CommandSourceError::NotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn path_traversal_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("safe.md"), "ok").unwrap();

        let source = FileCommandSource::new(dir.path());
        for name in ["../safe", "a/b", "a\\b", ""] {
            let err = source.load(name).await.unwrap_err();
            assert!(matches!(err, CommandSourceError::NotFound(_)), "{name:?}");
        }
    }
}
