use crate::cli::{Config, Escape};
use crate::error::{SyncError, SyncResult};
use crate::files;
use crate::markdown::{self, AltMap};
use crate::model::{Book, BookIndex};
use crate::reader;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

pub const ASSETS_FILE: &str = "assets.yml";
pub const CHAPTERS_DIR: &str = "chapters";
pub const CHAPTER_INDEX_FILE: &str = "index.md";

/// The part of a course's `assets.yml` this tool reads.
#[derive(Deserialize, Debug, Default)]
pub struct AssetManifest {
    #[serde(default)]
    pub images: Vec<String>,
}

/// Image tag counts for one course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseStats {
    pub name: String,
    pub total_images_tags: usize,
    pub updated_images_tag_with_alt: usize,
}

/// Add alt text from the book index to every course under `config.courses_dir`.
///
/// Each course must have an `assets.yml` and a book of the same name in the
/// index; either one missing aborts the run.
pub fn apply_alt_text(config: &Config) -> SyncResult<Vec<CourseStats>> {
    let index = reader::load_index(&config.index)?;
    let mut stats = Vec::new();

    for name in files::list_entries(&config.courses_dir)? {
        let course_dir = config.courses_dir.join(&name);
        if !course_dir.is_dir() {
            debug!("{} is not a course folder, skipping", course_dir.display());
            continue;
        }
        stats.push(apply_course(&course_dir, &name, &index, config.escape)?);
    }

    Ok(stats)
}

pub fn apply_course(
    course_dir: &Path,
    name: &str,
    index: &BookIndex,
    escape: Escape,
) -> SyncResult<CourseStats> {
    let manifest = load_manifest(&course_dir.join(ASSETS_FILE))?;
    let book = index
        .get(name)
        .ok_or_else(|| SyncError::UnknownBook(name.to_string()))?;
    let alt_map = course_alt_data(&manifest.images, book);

    let mut stats = CourseStats {
        name: name.to_string(),
        ..CourseStats::default()
    };

    for entry in files::glob_in(&course_dir.join(CHAPTERS_DIR), "*")? {
        let chapter_dir = entry.map_err(|e| SyncError::Read {
            path: e.path().to_path_buf(),
            source: e.into(),
        })?;
        let index_md = chapter_dir.join(CHAPTER_INDEX_FILE);
        if !chapter_dir.is_dir() || !index_md.is_file() {
            continue;
        }

        let content = files::read_to_string(&index_md)?;
        let rewrite = markdown::add_alt_to_image_tags(&content, &alt_map, escape);
        debug!(
            "{}: {} of {} image tags given alt text",
            index_md.display(),
            rewrite.updated,
            rewrite.image_tags
        );

        stats.total_images_tags += rewrite.image_tags;
        stats.updated_images_tag_with_alt += rewrite.updated;
        files::write_atomic(&index_md, &rewrite.content)?;
    }

    info!(
        "{}: {} of {} image tags updated",
        name, stats.updated_images_tag_with_alt, stats.total_images_tags
    );
    Ok(stats)
}

pub fn load_manifest(path: &Path) -> SyncResult<AssetManifest> {
    let yaml = files::read_to_string(path)?;
    if yaml.trim().is_empty() {
        return Ok(AssetManifest::default());
    }
    serde_yaml::from_str(&yaml).map_err(|source| SyncError::InvalidManifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Alt text for each image the course lists, looked up in its book.
pub fn course_alt_data(images: &[String], book: &Book) -> AltMap {
    images
        .iter()
        .map(|image| (image.clone(), book.alt_for(image).map(str::to_string)))
        .collect()
}
