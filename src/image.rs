use crate::error::ImageError;
use crate::model::AltEntry;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::warn;

/// Bracket content that means "the real alt text is the quoted title".
pub const ALT_TEXT_MARKER: &str = "Alt text";

static RE_MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());

static RE_QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]*)""#).unwrap());

// Destination of a normal image: optional `<..>`, then an optional trailing
// `"title"` or `'title'` separated by whitespace. Spaces inside the path stay.
static RE_DESTINATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)^\s*<?(.*?)>?(?:\s+(?:"[^"]*"|'[^']*'))?\s*$"#).unwrap()
});

/// Collect `filename -> alt` entries from every `![..](..)` in a chapter, in order.
///
/// Images that cannot be read are logged and left out; duplicates are kept.
pub fn extract_image_info(markdown: &str) -> Vec<AltEntry> {
    RE_MARKDOWN_IMAGE
        .captures_iter(markdown)
        .filter_map(|caps| {
            let bracket = caps.get(1).map_or("", |m| m.as_str());
            let paren = caps.get(2).map_or("", |m| m.as_str());
            match parse_image(bracket, paren) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("skipping image: {}", e);
                    None
                }
            }
        })
        .collect()
}

/// Turn one markdown image into an alt entry.
///
/// `![A caption](img/foo.png)` gives `foo.png -> A caption`, while the marker
/// form `![Alt text](img/foo.png "A caption")` takes the alt from the quotes.
pub fn parse_image(bracket: &str, paren: &str) -> Result<AltEntry, ImageError> {
    if bracket == ALT_TEXT_MARKER {
        let path = paren
            .split_whitespace()
            .next()
            .ok_or_else(|| ImageError::MissingPath(paren.to_string()))?;
        let caption = RE_QUOTED
            .captures(paren)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| ImageError::MissingCaption(paren.to_string()))?;
        return Ok(AltEntry::new(clean_filename(path), caption.as_str()));
    }

    Ok(AltEntry::new(clean_filename(destination(paren)), bracket))
}

fn destination(paren: &str) -> &str {
    RE_DESTINATION
        .captures(paren)
        .and_then(|caps| caps.get(1))
        .map_or(paren, |m| m.as_str())
        .trim()
}

fn clean_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}
