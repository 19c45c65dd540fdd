//! Feed and sitemap commands

use std::fs;
use std::path::Path;

use chrono::Utc;
use openmedicaid::feed::{self, ARTICLES};
use openmedicaid::output::{OperationResult, OutputMode, Render};

/// Print `xml` or write it to `output`
fn emit(xml: &str, output: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, xml)?;
            OperationResult {
                success: true,
                message: format!("Wrote {}", path.display()),
            }
            .render(mode);
        },
        None => print!("{xml}"),
    }
    Ok(())
}

/// Render the RSS feed
pub fn feed(site_url: &str, output: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let xml = feed::rss(site_url, ARTICLES, &feed::default_pub_date());
    emit(&xml, output, mode)
}

/// Render the sitemap
pub fn sitemap(
    data_dir: &Path,
    site_url: &str,
    output: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let data = super::load(data_dir)?;
    let xml = feed::sitemap(site_url, &data, &Utc::now())?;
    emit(&xml, output, mode)
}
