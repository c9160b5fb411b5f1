use crate::cli::Escape;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Image filename to alt text, `None` when no book chapter describes it.
pub type AltMap = HashMap<String, Option<String>>;

// Only bare tags; `<image alt="..">` is never matched again.
static RE_IMAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<image>(.*?)</image>").unwrap());

/// Result of adding alt text to one course chapter.
#[derive(Debug, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// Every `<image>` tag found
    pub image_tags: usize,
    /// Tags whose filename had alt text
    pub updated: usize,
}

/// Filenames of every bare `<image>FILENAME</image>` tag, in order, duplicates included.
pub fn extract_image_tags(content: &str) -> Vec<&str> {
    RE_IMAGE_TAG
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Give every bare `<image>` tag with known alt text an `alt` attribute.
///
/// Each extracted tag counts once, so a filename tagged twice is counted twice
/// even though the first replacement already rewrote both.
pub fn add_alt_to_image_tags(content: &str, alt_map: &AltMap, escape: Escape) -> Rewrite {
    let images = extract_image_tags(content);
    let mut updated_content = content.to_string();
    let mut updated = 0;

    for image in &images {
        let Some(Some(alt)) = alt_map.get(*image) else {
            continue;
        };
        updated += 1;
        let tag = format!("<image>{}</image>", image);
        let with_alt = format!("<image alt=\"{}\">{}</image>", escape_alt(alt, escape), image);
        updated_content = updated_content.replace(&tag, &with_alt);
    }

    Rewrite {
        content: updated_content,
        image_tags: images.len(),
        updated,
    }
}

fn escape_alt(alt: &str, escape: Escape) -> String {
    match escape {
        Escape::None => alt.to_string(),
        Escape::Html => alt.replace('&', "&amp;").replace('"', "&quot;"),
    }
}
