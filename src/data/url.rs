use super::model::Table;

/// Return the trimmed URL if it is an absolute http(s) URL, else an empty string.
pub fn sanitize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        String::new()
    }
}

/// Blank every `image_url` that is not an absolute http(s) URL.
///
/// Returns the number of values that were cleared.
pub fn sanitize_urls(table: &mut Table) -> usize {
    let mut cleared = 0;
    for record in &mut table.records {
        let clean = sanitize_url(&record.image_url);
        if clean.is_empty() && !record.image_url.is_empty() {
            cleared += 1;
        }
        record.image_url = clean;
    }
    if cleared > 0 {
        log::debug!("cleared {cleared} invalid image URLs");
    }
    cleared
}
