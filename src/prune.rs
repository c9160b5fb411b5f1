use crate::files;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Delete every course folder with no book folder of the same name.
///
/// Returns the removed paths. When either root is not a directory nothing is
/// removed and the returned list is empty.
pub fn keep_courses_from_books_only(courses_dir: &Path, books_dir: &Path) -> Vec<PathBuf> {
    let (Some(courses), Some(books)) = (subdirectories(courses_dir), subdirectories(books_dir))
    else {
        return Vec::new();
    };

    let mut removed = Vec::new();
    for course in courses.iter().filter(|c| !books.contains(c)) {
        let path = courses_dir.join(course);
        match fs::remove_dir_all(&path) {
            Ok(()) => {
                info!("deleted course folder {}", path.display());
                removed.push(path);
            }
            Err(e) => error!("failed to delete {}: {}", path.display(), e),
        }
    }
    removed
}

fn subdirectories(dir: &Path) -> Option<Vec<String>> {
    if !dir.is_dir() {
        error!("{} is not a valid directory", dir.display());
        return None;
    }
    files::list_subdirectories(dir)
        .map_err(|e| error!("{}", e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(courses: &[&str], books: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for c in courses {
            fs::create_dir_all(dir.path().join("courses").join(c).join("chapters")).unwrap();
        }
        for b in books {
            fs::create_dir_all(dir.path().join("books").join(b)).unwrap();
        }
        dir
    }

    #[test]
    fn removes_courses_without_books() {
        let dir = setup(&["A", "B"], &["A"]);
        let courses = dir.path().join("courses");
        fs::write(courses.join("A/assets.yml"), "images: []\n").unwrap();

        let removed = keep_courses_from_books_only(&courses, &dir.path().join("books"));

        assert_eq!(removed, vec![courses.join("B")]);
        assert!(!courses.join("B").exists());
        assert!(courses.join("A/assets.yml").is_file());
        assert!(courses.join("A/chapters").is_dir());
    }

    #[test]
    fn loose_files_are_not_courses() {
        let dir = setup(&["A"], &["A"]);
        let courses = dir.path().join("courses");
        fs::write(courses.join("README.md"), "keep me").unwrap();

        assert!(keep_courses_from_books_only(&courses, &dir.path().join("books")).is_empty());
        assert!(courses.join("README.md").exists());
    }

    #[test]
    fn invalid_roots_remove_nothing() {
        let dir = setup(&["A", "B"], &[]);
        let courses = dir.path().join("courses");

        let removed = keep_courses_from_books_only(&courses, &dir.path().join("missing"));
        assert!(removed.is_empty());
        assert!(courses.join("A").exists());
        assert!(courses.join("B").exists());

        let removed = keep_courses_from_books_only(&dir.path().join("missing"), &courses);
        assert!(removed.is_empty());
    }
}
