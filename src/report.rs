use crate::converter::CourseStats;

/// Per-course lines followed by the grand totals.
pub fn format_report(stats: &[CourseStats]) -> String {
    let mut lines = Vec::new();

    for course in stats {
        lines.push("-------------------------------------".to_string());
        lines.push(format!("Course name: {}", course.name));
        lines.push(format!("- Total images tags : {}", course.total_images_tags));
        lines.push(format!(
            "- Updated images tags with alt: {}",
            course.updated_images_tag_with_alt
        ));
    }

    let total: usize = stats.iter().map(|s| s.total_images_tags).sum();
    let updated: usize = stats.iter().map(|s| s.updated_images_tag_with_alt).sum();
    lines.push("=================================".to_string());
    lines.push(format!("Total images tags: {}", total));
    lines.push(format!("Total images tags updated with alt: {}", updated));

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(name: &str, total: usize, updated: usize) -> CourseStats {
        CourseStats {
            name: name.to_string(),
            total_images_tags: total,
            updated_images_tag_with_alt: updated,
        }
    }

    #[test]
    fn reports_each_course_and_totals() {
        let report = format_report(&[stats("art", 4, 3), stats("math", 2, 0)]);
        assert_eq!(
            report,
            "-------------------------------------\n\
             Course name: art\n\
             - Total images tags : 4\n\
             - Updated images tags with alt: 3\n\
             -------------------------------------\n\
             Course name: math\n\
             - Total images tags : 2\n\
             - Updated images tags with alt: 0\n\
             =================================\n\
             Total images tags: 6\n\
             Total images tags updated with alt: 3\n"
        );
    }

    #[test]
    fn empty_run_still_has_totals() {
        let report = format_report(&[]);
        assert!(report.starts_with("================================="));
        assert!(report.contains("Total images tags: 0\n"));
    }
}
