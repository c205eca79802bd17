use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::error::FetchError;
use crate::fetch::ContentSource;
use crate::parser::{self, ExtractOptions, RecordFields};
use crate::settings::Settings;

/// Fetch `path` and hand its text to `render`. On any fetch failure the
/// fallback is returned instead and `render` is never called.
pub async fn load_with<F>(source: &ContentSource, path: &str, fallback: &str, render: F) -> String
where
    F: FnOnce(&str) -> String,
{
    match source.fetch(path).await {
        Ok(md) => render(&md),
        Err(e) => {
            warn!("Not found: {}", e);
            fallback.to_string()
        }
    }
}

/// Fetch and translate one document.
pub async fn load_markdown(source: &ContentSource, path: &str, fallback: &str) -> String {
    load_with(source, path, fallback, parser::translate).await
}

/// Fetch a listing document and extract its records.
pub async fn load_projects(
    source: &ContentSource,
    path: &str,
    opts: &ExtractOptions,
) -> Result<Vec<RecordFields>, FetchError> {
    let md = source.fetch(path).await?;
    Ok(parser::extract_records(&md, opts))
}

/// Card markup for a listing document, or the fallback when it is missing.
pub async fn projects_region(source: &ContentSource, path: &str, settings: &Settings) -> String {
    let opts = settings.extract_options();
    load_with(source, path, &settings.not_found_fragment, |md| {
        parser::render_listing(md, &opts)
    })
    .await
}

/// Files written by [`build`].
pub struct BuildOutput {
    pub about: PathBuf,
    pub projects: PathBuf,
}

/// Load the about and projects regions concurrently and write each to `out_dir`.
pub async fn build(source: &ContentSource, settings: &Settings, out_dir: &Path) -> Result<BuildOutput> {
    let (about, projects) = tokio::join!(
        load_markdown(source, &settings.about, &settings.not_found_fragment),
        projects_region(source, &settings.projects, settings),
    );

    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let out = BuildOutput {
        about: out_dir.join("about.html"),
        projects: out_dir.join("projects.html"),
    };
    write_region(&out.about, &about).await?;
    write_region(&out.projects, &projects).await?;

    info!("Wrote {} and {}", out.about.display(), out.projects.display());
    Ok(out)
}

/// Fetch and translate many documents, at most `settings.concurrency` at a time.
/// Results come back in the order of `paths`.
pub async fn render_many(source: Arc<ContentSource>, paths: &[String], settings: &Settings) -> Vec<String> {
    let total = paths.len();
    let semaphore = Arc::new(Semaphore::new(settings.concurrency.max(1)));

    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len}") {
        pb.set_style(style.progress_chars("=> "));
    }

    // Workers send (index, html); results are slotted back by index
    let (tx, mut rx) = tokio::sync::mpsc::channel::<(usize, String)>(settings.concurrency.max(1) * 2);

    for (i, path) in paths.iter().cloned().enumerate() {
        let source = Arc::clone(&source);
        let sem = Arc::clone(&semaphore);
        let fallback = settings.not_found_fragment.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let Ok(_permit) = sem.acquire().await else {
                return;
            };
            let html = load_markdown(&source, &path, &fallback).await;
            let _ = tx.send((i, html)).await;
        });
    }

    drop(tx);

    let mut out = vec![String::new(); total];
    while let Some((i, html)) = rx.recv().await {
        out[i] = html;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Rendered {} documents", total);
    out
}

/// Output file for a rendered document: `<stem>.html` inside `out_dir`.
pub fn output_path(out_dir: &Path, doc_path: &str) -> PathBuf {
    let stem = Path::new(doc_path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index".to_string());
    out_dir.join(format!("{stem}.html"))
}

pub async fn write_region(path: &Path, html: &str) -> Result<()> {
    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fixtures() -> ContentSource {
        ContentSource::Dir(PathBuf::from("tests/fixtures"))
    }

    fn fixture_settings() -> Settings {
        Settings {
            about: "about.md".into(),
            projects: "projects.md".into(),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn missing_document_uses_fallback_without_rendering() {
        let called = Cell::new(false);
        let html = load_with(&fixtures(), "missing.md", "<p>Content not found.</p>", |md| {
            called.set(true);
            md.to_string()
        })
        .await;
        assert_eq!(html, "<p>Content not found.</p>");
        assert!(!called.get());
    }

    #[tokio::test]
    async fn http_404_uses_fallback_and_200_is_translated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/about.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("### Title\n\nsee [here](http://e.com)"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/gone.md"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = ContentSource::from_root(&server.uri(), Duration::from_secs(5)).unwrap();
        let fallback = Settings::default().not_found_fragment;

        assert_eq!(
            load_markdown(&source, "about.md", &fallback).await,
            r#"<h3>Title</h3><p>see <a href="http://e.com" target="_blank" rel="noopener">here</a></p>"#
        );
        assert_eq!(load_markdown(&source, "gone.md", &fallback).await, "<p>Content not found.</p>");
    }

    #[tokio::test]
    async fn load_markdown_translates() {
        let html = load_markdown(&fixtures(), "about.md", "fallback").await;
        assert!(html.starts_with("<h1>About me</h1>"));
    }

    #[tokio::test]
    async fn projects_missing_is_fallback_region() {
        let settings = Settings {
            projects: "gone.md".into(),
            ..fixture_settings()
        };
        let html = projects_region(&fixtures(), &settings.projects, &settings).await;
        assert_eq!(html, settings.not_found_fragment);
    }

    #[tokio::test]
    async fn load_projects_records() {
        let records = load_projects(&fixtures(), "projects.md", &ExtractOptions::default())
            .await
            .unwrap();
        assert_eq!(records.len(), 3);
        assert!(load_projects(&fixtures(), "gone.md", &ExtractOptions::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn build_writes_both_regions() {
        let dir = tempfile::tempdir().unwrap();
        let out = build(&fixtures(), &fixture_settings(), dir.path()).await.unwrap();

        let about = std::fs::read_to_string(&out.about).unwrap();
        let projects = std::fs::read_to_string(&out.projects).unwrap();
        assert!(about.contains("<h2>What I work on</h2>"));
        assert_eq!(projects.matches("project-card").count(), 3);
    }

    #[tokio::test]
    async fn render_many_keeps_input_order() {
        let paths = vec![
            "projects.md".to_string(),
            "missing.md".to_string(),
            "about.md".to_string(),
        ];
        let out = render_many(Arc::new(fixtures()), &paths, &fixture_settings()).await;
        assert_eq!(out.len(), 3);
        assert!(out[0].starts_with("<h1>Weather station</h1>"));
        assert_eq!(out[1], "<p>Content not found.</p>");
        assert!(out[2].starts_with("<h1>About me</h1>"));
    }

    #[test]
    fn output_path_from_stem() {
        let p = output_path(Path::new("public"), "content/about.md");
        assert_eq!(p, PathBuf::from("public/about.html"));
    }
}
