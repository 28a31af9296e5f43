//! Final Markdown document and its atomic write to disk.
use chrono::{DateTime, Utc};
use log::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{
    NewsletterError, Result,
    generator::{GeneratedContent, ReleaseDigest},
};

/// Layout of the written file. The preview line is omitted when empty.
pub const NEWSLETTER_TEMPLATE: &str = r#"# {{ subject }}

{% if preview %}_{{ preview }}_

{% endif %}{{ body }}

---

*This newsletter covers {{ release_count }} release{{ release_count | pluralize }} across {{ repository_count }} repositor{{ repository_count | pluralize(singular="y", plural="ies") }} from the {{ organization }} organization in {{ year }}. Generated on {{ generated_at | date(format="%Y-%m-%d") }}.*
"#;

/// A complete newsletter ready to be rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Newsletter {
    pub subject: String,
    pub preview: String,
    pub body: String,
    pub organization: String,
    pub year: i32,
    pub repository_count: usize,
    pub release_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl Newsletter {
    pub fn new(
        content: GeneratedContent,
        digest: &ReleaseDigest,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject: content.subject,
            preview: content.preview,
            body: content.body,
            organization: digest.organization.clone(),
            year: digest.year,
            repository_count: digest.repository_count(),
            release_count: digest.release_count(),
            generated_at,
        }
    }

    pub fn render(&self) -> Result<String> {
        let context = tera::Context::from_serialize(self)?;
        let mut rendered =
            tera::Tera::one_off(NEWSLETTER_TEMPLATE, &context, false)?;

        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }

        Ok(rendered)
    }

    /// Render and write to `path`, replacing any existing file. The content
    /// goes to a sibling temporary file first and is renamed into place, so
    /// a failed write leaves an existing file untouched.
    pub async fn write(&self, path: &Path) -> Result<()> {
        let content = self.render()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| NewsletterError::write(path, e))?;
        }

        let tmp = temporary_path(path);

        if let Err(err) = fs::write(&tmp, content).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(NewsletterError::write(path, err));
        }

        if let Err(err) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(NewsletterError::write(path, err));
        }

        info!("newsletter written to {}", path.display());

        Ok(())
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "newsletter".to_string());

    path.with_file_name(format!(".{name}.tmp"))
}
