use crate::error::ChapterError;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// The fields of a chapter's front matter that the index keeps.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct FrontMatter {
    pub id: Option<String>,
    pub title: Option<String>,
}

// `---` at the very start, lazily up to the next line that starts with `---`.
static RE_FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---(.*?)\n---").unwrap());

static RE_CHAPTER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:ch|CH)-\d{2}-").unwrap());

/// Parse the YAML front matter block at the top of a chapter.
///
/// `serde_yaml` only builds data, so tags in the block are never executed.
pub fn parse_front_matter(content: &str) -> Result<FrontMatter, ChapterError> {
    let block = RE_FRONT_MATTER
        .captures(content)
        .and_then(|caps| caps.get(1))
        .ok_or(ChapterError::MissingFrontMatter)?
        .as_str();

    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    Ok(serde_yaml::from_str(block)?)
}

/// Strip a leading `ch-NN-` / `CH-NN-` and a trailing `.md` from a chapter id.
pub fn clean_chapter_id(id: &str) -> String {
    let id = RE_CHAPTER_PREFIX.replace(id, "");
    id.strip_suffix(".md").unwrap_or(&*id).to_string()
}
