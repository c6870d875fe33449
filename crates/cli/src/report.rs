use std::collections::HashMap;

/// Directories with at least this many hits collapse into a header.
pub(crate) const GROUP_THRESHOLD: usize = 5;
const GROUP_PREVIEW: usize = 3;

/// Newline-separated paths in rank order.
pub(crate) fn render_list(paths: &[String]) -> String {
    paths.join("\n")
}

/// Human view: paths grouped by parent directory, busy directories collapsed.
///
/// Directories appear in order of their best-ranked file; files keep rank order inside.
pub(crate) fn render_grouped(paths: &[String], threshold: usize) -> String {
    let mut order: Vec<&str> = Vec::new();
    let mut by_dir: HashMap<&str, Vec<&str>> = HashMap::new();
    for path in paths {
        let dir = path.rsplit_once('/').map_or(".", |(dir, _)| dir);
        by_dir
            .entry(dir)
            .or_insert_with(|| {
                order.push(dir);
                Vec::new()
            })
            .push(path);
    }

    let mut lines = Vec::new();
    for dir in order {
        let files = &by_dir[dir];
        if files.len() < threshold {
            lines.extend(files.iter().map(|f| f.to_string()));
            continue;
        }
        lines.push(format!("{dir}/ ({} files)", files.len()));
        for f in files.iter().take(GROUP_PREVIEW) {
            lines.push(format!("   {f}"));
        }
        if files.len() > GROUP_PREVIEW {
            lines.push(format!("   ... and {} more", files.len() - GROUP_PREVIEW));
        }
    }
    lines.join("\n")
}
