use crate::error::{ChapterError, SyncError, SyncResult};
use crate::files;
use crate::image;
use crate::metadata;
use crate::model::{Book, BookIndex, Chapter, ChapterImages};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Folder inside each book that holds its chapter files.
pub const LESSONS_DIR: &str = "_lessons";

/// Build the index record for one chapter file.
pub fn extract_chapter_info(path: &Path) -> Result<Chapter, ChapterError> {
    let content = fs::read_to_string(path).map_err(|source| ChapterError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let front_matter = metadata::parse_front_matter(&content)?;
    let id = front_matter.id.ok_or(ChapterError::MissingId)?;
    let alt_data = image::extract_image_info(&content);

    Ok(Chapter {
        filename: path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default(),
        id: metadata::clean_chapter_id(&id),
        title: front_matter.title,
        images: ChapterImages {
            count: alt_data.len(),
            alt_data,
        },
    })
}

/// Walk `books_dir/<book>/_lessons/*.md` and collect every chapter's alt text.
///
/// Entries that are not directories are registered with an empty record;
/// books without a `_lessons` folder are left out entirely.
pub fn extract_books_data(books_dir: &Path) -> SyncResult<BookIndex> {
    let mut books = BookIndex::new();

    for name in files::list_entries(books_dir)? {
        let book_path = books_dir.join(&name);
        let mut book = Book::default();

        if book_path.is_dir() {
            let lessons = book_path.join(LESSONS_DIR);
            if !lessons.is_dir() {
                debug!("{} has no {} folder, skipping", name, LESSONS_DIR);
                continue;
            }
            book = extract_book(&lessons)?;
            info!(
                "{}: {} of {} chapters extracted",
                name,
                book.chapters.len(),
                book.chapters_count
            );
        }

        books.insert(name, book);
    }

    Ok(books)
}

fn extract_book(lessons: &Path) -> SyncResult<Book> {
    let mut book = Book::default();

    for entry in files::glob_in(lessons, "*.md")? {
        book.chapters_count += 1;

        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("skipping {}: {}", e.path().display(), e);
                continue;
            }
        };

        match extract_chapter_info(&path) {
            Ok(chapter) => book.chapters.push(chapter),
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
    }

    Ok(book)
}

/// Write the index as pretty JSON so it can be corrected by hand.
pub fn save_index(index: &BookIndex, path: &Path) -> SyncResult<()> {
    let mut json = serde_json::to_string_pretty(index).map_err(SyncError::SerializeIndex)?;
    json.push('\n');
    files::write_atomic(path, &json)
}

pub fn load_index(path: &Path) -> SyncResult<BookIndex> {
    let json = files::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|source| SyncError::InvalidIndex {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AltEntry;
    use tempfile::TempDir;

    const CHAPTER: &str = "---\n\
id: ch-02-shapes.md\n\
title: Shapes\n\
---\n\
\n\
![A triangle](../images/diagram.png)\n\
\n\
![Alt text](images/circle.png \"A circle\")\n";

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn extracts_a_chapter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ch-02-shapes.md");
        write(&path, CHAPTER);

        let chapter = extract_chapter_info(&path).unwrap();
        assert_eq!(chapter.filename, "ch-02-shapes.md");
        assert_eq!(chapter.id, "shapes");
        assert_eq!(chapter.title.as_deref(), Some("Shapes"));
        assert_eq!(chapter.images.count, 2);
        assert_eq!(
            chapter.images.alt_data,
            vec![
                AltEntry::new("diagram.png", "A triangle"),
                AltEntry::new("circle.png", "A circle"),
            ]
        );
    }

    #[test]
    fn chapter_without_front_matter_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.md");
        write(&path, "# No header\n![x](x.png)\n");

        assert!(matches!(
            extract_chapter_info(&path),
            Err(ChapterError::MissingFrontMatter)
        ));
    }

    #[test]
    fn chapter_without_id_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("noid.md");
        write(&path, "---\ntitle: No id\n---\n");

        assert!(matches!(
            extract_chapter_info(&path),
            Err(ChapterError::MissingId)
        ));
    }

    #[test]
    fn builds_index_for_books_with_lessons() {
        let dir = TempDir::new().unwrap();
        let books = dir.path();
        write(&books.join("math/_lessons/ch-02-shapes.md"), CHAPTER);
        write(&books.join("math/_lessons/broken.md"), "no front matter");
        write(&books.join("math/_lessons/notes.txt"), "ignored");
        write(&books.join("math/_lessons/nested/deep.md"), CHAPTER);
        write(&books.join("art/README.md"), "no lessons here");
        write(&books.join("stray.txt"), "not a book");

        let index = extract_books_data(books).unwrap();

        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["math", "stray.txt"]);
        let math = &index["math"];
        assert_eq!(math.chapters_count, 2);
        assert_eq!(math.chapters.len(), 1);
        assert_eq!(math.chapters[0].id, "shapes");
        assert_eq!(index["stray.txt"], Book::default());
    }

    #[test]
    fn missing_books_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(extract_books_data(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn saved_index_loads_back() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join("books/math/_lessons/ch-02-shapes.md"), CHAPTER);
        let index = extract_books_data(&dir.path().join("books")).unwrap();
        let path = dir.path().join("extracted_books_data.json");

        save_index(&index, &path).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains(r#""diagram.png": "A triangle""#));
        assert!(json.contains(r#""chapters_count": 1"#));
        assert_eq!(load_index(&path).unwrap(), index);
    }

    #[test]
    fn invalid_index_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_index(&path),
            Err(SyncError::InvalidIndex { .. })
        ));
        assert!(matches!(
            load_index(&dir.path().join("missing.json")),
            Err(SyncError::Read { .. })
        ));
    }
}
