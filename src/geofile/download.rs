use anyhow::anyhow;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Local file name for a dataset URL: its last path segment, without query or fragment.
pub fn get_filename_for_url(url: &str) -> anyhow::Result<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let filename = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
        .ok_or_else(|| anyhow!("Cannot derive a file name from URL {}", url))?;
    Ok(filename.to_string())
}

pub fn download_dataset(url: &str) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("rain-garden-scenario")
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    response.text().or(Err(anyhow!("No response text")))
}

/// Fetch a static dataset into `output_dir` unless a file of the same name is already there.
pub fn sync_dataset_to_file(url: &str, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let filename = get_filename_for_url(url)?;
    let output_filepath = output_dir.join(filename);
    if output_filepath.exists() {
        log::info!("Local file exists for dataset: {:?}", output_filepath);
        return Ok(output_filepath);
    }

    log::info!("Downloading dataset from {}", url);
    let dataset = download_dataset(url)?;
    fs::create_dir_all(output_dir)?;
    fs::write(&output_filepath, dataset).or(Err(anyhow!("Could not write dataset to file")))?;
    Ok(output_filepath)
}
