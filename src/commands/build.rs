//! Write every export to the public directory

use anyhow::{Context, Result};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::content::Collection;
use crate::export::{markdown, sitemap, urllist, Export};
use crate::Garden;

/// Directory under the public dir holding `<slug>.md` exports
pub const API_DIR: &str = "api";
pub const SITEMAP_MD: &str = "sitemap.md";
pub const SITEMAP_TXT: &str = "sitemap.txt";

/// Load the garden and write all exports
pub fn run(garden: &Garden) -> Result<()> {
    let start = std::time::Instant::now();

    let collection = garden.load()?;
    tracing::info!(
        "Loaded {} entries ({} drafts)",
        collection.len(),
        collection.draft_count()
    );

    let written = write_exports(garden, &collection)?;

    let duration = start.elapsed();
    tracing::info!("Wrote {} files in {:.2}s", written, duration.as_secs_f64());

    Ok(())
}

/// Write the markdown exports, both sitemaps, and prune exports of entries
/// that are no longer published. Returns the number of files written.
pub fn write_exports(garden: &Garden, collection: &Collection) -> Result<usize> {
    let config = &garden.config;
    let api_dir = garden.public_dir.join(API_DIR);
    fs::create_dir_all(&api_dir)
        .with_context(|| format!("Failed to create {}", api_dir.display()))?;

    let slugs = markdown::static_paths(collection);
    for slug in &slugs {
        let export = markdown::render(collection, config, slug);
        write_export(&api_dir.join(format!("{}.md", slug)), &export)?;
    }
    prune_stale(&api_dir, &slugs)?;

    write_export(
        &garden.public_dir.join(SITEMAP_MD),
        &sitemap::render(collection, config),
    )?;
    write_export(
        &garden.public_dir.join(SITEMAP_TXT),
        &urllist::render(collection, config),
    )?;

    Ok(slugs.len() + 2)
}

fn write_export(path: &Path, export: &Export) -> Result<()> {
    if export.status != 200 {
        anyhow::bail!("Refusing to write {} response to {}", export.status, path.display());
    }
    fs::write(path, &export.body).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Generated {}", path.display());
    Ok(())
}

/// Remove `<slug>.md` files whose slug is no longer published
fn prune_stale(api_dir: &Path, slugs: &[&str]) -> Result<()> {
    let keep: HashSet<&str> = slugs.iter().copied().collect();

    for entry in fs::read_dir(api_dir)? {
        let path = entry?.path();
        let is_md = path.extension().and_then(|e| e.to_str()) == Some("md");
        let stem = path.file_stem().and_then(|s| s.to_str());
        if let (true, Some(stem)) = (is_md, stem) {
            if !keep.contains(stem) {
                fs::remove_file(&path)?;
                tracing::info!("Deleted stale export: {:?}", path);
            }
        }
    }

    Ok(())
}

/// Watch the content directory, rebuilding after every debounced batch
pub async fn watch(garden: &Garden) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Collapse bursts of editor writes into one rebuild
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if garden.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&garden.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", garden.content_dir);
    }

    println!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let paths: Vec<PathBuf> = events.into_iter().map(|e| e.path).collect();
                rebuild_on_change(garden, &paths);
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Rebuild if any path in a debounced batch matters. A failed rebuild leaves
/// the previous exports untouched. Returns whether a rebuild succeeded.
pub fn rebuild_on_change(garden: &Garden, paths: &[PathBuf]) -> bool {
    let relevant: Vec<&PathBuf> = paths.iter().filter(|p| is_relevant(p)).collect();
    if relevant.is_empty() {
        return false;
    }

    for path in &relevant {
        tracing::info!("Changed: {}", path.display());
    }

    match run(garden) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Build failed: {:#}", e);
            false
        }
    }
}

/// Skip editor swap files and VCS noise
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn garden_with(files: &[(&str, &str)]) -> (TempDir, Garden) {
        let dir = TempDir::new().unwrap();
        let garden = Garden::new(dir.path()).unwrap();
        fs::create_dir_all(&garden.content_dir).unwrap();
        for (name, content) in files {
            fs::write(garden.content_dir.join(name), content).unwrap();
        }
        (dir, garden)
    }

    #[test]
    fn test_build_writes_published_exports_only() {
        let a = "---\ntitle: A\nplanted: 2024-01-01\n---\nA body\n";
        let (_dir, garden) = garden_with(&[
            ("a.md", a),
            ("b.md", "---\ntitle: B\nplanted: 2024-06-01\n---\n"),
            ("c.md", "---\ntitle: C\nplanted: 2024-03-01\ndraft: true\n---\n"),
        ]);

        run(&garden).unwrap();

        let api = garden.public_dir.join(API_DIR);
        assert_eq!(fs::read_to_string(api.join("a.md")).unwrap(), a);
        assert!(api.join("b.md").exists());
        assert!(!api.join("c.md").exists());

        let sitemap = fs::read_to_string(garden.public_dir.join(SITEMAP_MD)).unwrap();
        assert!(sitemap.find("[B]").unwrap() < sitemap.find("[A]").unwrap());
        assert!(!sitemap.contains("[C]"));

        let urls = fs::read_to_string(garden.public_dir.join(SITEMAP_TXT)).unwrap();
        assert!(urls.ends_with("/garden/a\nhttps://grimlock.ai/garden/b"));
    }

    #[test]
    fn test_rebuild_prunes_newly_drafted_entry() {
        let (_dir, garden) = garden_with(&[("a.md", "---\ntitle: A\nplanted: 2024-01-01\n---\n")]);
        run(&garden).unwrap();
        let exported = garden.public_dir.join(API_DIR).join("a.md");
        assert!(exported.exists());

        fs::write(
            garden.content_dir.join("a.md"),
            "---\ntitle: A\nplanted: 2024-01-01\ndraft: true\n---\n",
        )
        .unwrap();
        run(&garden).unwrap();
        assert!(!exported.exists());
    }

    #[test]
    fn test_invalid_entry_fails_build_without_output() {
        let (_dir, garden) = garden_with(&[
            ("a.md", "---\ntitle: A\nplanted: 2024-01-01\n---\n"),
            ("z.md", "---\ntitle: Z\nplanted: 2024-01-01\ngrowthStage: ancient\n---\n"),
        ]);

        assert!(run(&garden).is_err());
        assert!(!garden.public_dir.join(SITEMAP_MD).exists());
    }

    #[test]
    fn test_every_debounced_batch_rebuilds() {
        let (_dir, garden) = garden_with(&[("a.md", "---\ntitle: A\nplanted: 2024-01-01\n---\n")]);
        let changed = vec![garden.content_dir.join("a.md")];
        assert!(rebuild_on_change(&garden, &changed));

        // A second batch straight after the first is not swallowed
        fs::write(
            garden.content_dir.join("b.md"),
            "---\ntitle: B\nplanted: 2024-06-01\n---\n",
        )
        .unwrap();
        let changed = vec![garden.content_dir.join("b.md")];
        assert!(rebuild_on_change(&garden, &changed));
        assert!(garden.public_dir.join(API_DIR).join("b.md").exists());
    }

    #[test]
    fn test_irrelevant_changes_skip_rebuild() {
        let (_dir, garden) = garden_with(&[("a.md", "---\ntitle: A\nplanted: 2024-01-01\n---\n")]);
        let changed = vec![
            garden.content_dir.join(".a.md.swp"),
            garden.content_dir.join("a.md~"),
        ];

        assert!(!rebuild_on_change(&garden, &changed));
        assert!(!garden.public_dir.join(SITEMAP_MD).exists());
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_exports() {
        let (_dir, garden) = garden_with(&[("a.md", "---\ntitle: A\nplanted: 2024-01-01\n---\n")]);
        run(&garden).unwrap();

        fs::write(garden.content_dir.join("a.md"), "---\ntitle: A\n---\n").unwrap();
        let changed = vec![garden.content_dir.join("a.md")];
        assert!(!rebuild_on_change(&garden, &changed));
        assert!(garden.public_dir.join(API_DIR).join("a.md").exists());
    }
}
