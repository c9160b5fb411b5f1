use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Book key (folder name) to extracted book data.
pub type BookIndex = BTreeMap<String, Book>;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Book {
    /// Every chapter file attempted, including the ones that were skipped
    pub chapters_count: usize,
    pub chapters: Vec<Chapter>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Chapter {
    pub filename: String,
    pub id: String,
    pub title: Option<String>,
    pub images: ChapterImages,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ChapterImages {
    pub count: usize,
    pub alt_data: Vec<AltEntry>,
}

/// One image of a chapter, written as a single-key object `{ "<filename>": "<alt>" }`.
///
/// A `null` alt can only come from a hand-edited index and means the image
/// has no usable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltEntry {
    pub filename: String,
    pub alt: Option<String>,
}

impl AltEntry {
    pub fn new(filename: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            alt: Some(alt.into()),
        }
    }
}

impl Serialize for AltEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.filename, &self.alt)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for AltEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AltEntryVisitor;

        impl<'de> Visitor<'de> for AltEntryVisitor {
            type Value = AltEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with exactly one image filename key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<AltEntry, A::Error> {
                let (filename, alt) = map
                    .next_entry::<String, Option<String>>()?
                    .ok_or_else(|| <A::Error as de::Error>::invalid_length(0, &self))?;
                if map.next_key::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom(format!(
                        "alt entry for `{}` has more than one key",
                        filename
                    )));
                }
                Ok(AltEntry { filename, alt })
            }
        }

        deserializer.deserialize_map(AltEntryVisitor)
    }
}

impl Book {
    /// Alt text for `image` from the first entry naming it, chapters in stored order.
    ///
    /// The first matching entry wins even when its alt is `null`.
    pub fn alt_for(&self, image: &str) -> Option<&str> {
        self.chapters
            .iter()
            .flat_map(|chapter| chapter.images.alt_data.iter())
            .find(|entry| entry.filename == image)
            .and_then(|entry| entry.alt.as_deref())
    }
}
