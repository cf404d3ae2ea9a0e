/// Convert a dataset name to a sanitized file stem
pub fn sanitize_filename(name: &str) -> String {
    // Replace path separators and characters that are invalid on common filesystems
    let mut name = name
        .trim()
        .replace(['/', '\\', ':', '?', '&', '=', '#', '%', '*', '"', '<', '>', '|'], "_");

    if name.is_empty() || name.chars().all(|c| c == '.') {
        name = "dataset".to_string();
    }

    // Limit filename length
    if name.len() > 100 {
        let mut end = 100;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    name
}
