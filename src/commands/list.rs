//! List garden entries

use anyhow::Result;

use crate::export::{sitemap, stage_emoji};
use crate::og::ImageRequest;
use crate::Garden;

/// Print entries newest first; drafts only when asked for
pub fn run(garden: &Garden, include_drafts: bool) -> Result<()> {
    let collection = garden.load()?;

    let published = sitemap::sorted_entries(&collection);
    println!("Entries ({}):", published.len());
    for entry in published {
        println!(
            "  {} {} {} - {}",
            entry.planted,
            stage_emoji(Some(entry.growth_stage)),
            entry.slug,
            entry.title
        );
        println!("      og: {}", ImageRequest::for_entry(entry).url(&garden.config));
    }

    if include_drafts {
        let drafts: Vec<_> = collection.all().iter().filter(|e| e.draft).collect();
        println!("Drafts ({}):", drafts.len());
        for entry in drafts {
            println!("  {} [draft] {} - {}", entry.planted, entry.slug, entry.title);
        }
    }

    Ok(())
}
