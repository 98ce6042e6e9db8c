use url::Url;

/// Index of the slug among the path segments that follow the leading `/`.
const SLUG_SEGMENT_INDEX: usize = 2;

/// Derives a display title from the slug of a product page URL, e.g.
/// `https://www.bigbasket.com/pd/40012345/amul-butter-500g/` gives
/// `Amul Butter 500g`.
///
/// Returns `None` when the URL does not parse, the path has fewer than
/// three segments, or the slug has no letters or digits left after
/// cleaning. Callers substitute their fallback title.
pub fn extract_title(page_url: &str) -> Option<String> {
    let url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(page_url = %page_url, "Error parsing title: {}", e);
            return None;
        }
    };

    // "/a/b/c" splits into "", "a", "b", "c"; skip the empty head.
    let segments: Vec<&str> = url.path().split('/').skip(1).collect();
    let Some(raw_slug) = segments.get(SLUG_SEGMENT_INDEX) else {
        tracing::debug!(page_url = %page_url, segments = segments.len(), "path too short for a slug");
        return None;
    };

    let title = title_from_slug(raw_slug);
    if title.is_empty() {
        tracing::debug!(page_url = %page_url, slug = %raw_slug, "slug has no usable characters");
        return None;
    }
    Some(title)
}

/// Keeps ASCII letters, digits and hyphens, then turns `word-word` into
/// `Word Word`. Only the first character of each word is touched.
pub fn title_from_slug(raw_slug: &str) -> String {
    let cleaned: String = raw_slug
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();

    cleaned
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
