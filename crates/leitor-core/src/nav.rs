use crate::page::Page;

/// Resolves the page named by a navigation parameter. Accepts `7`,
/// `page=7` and `?page=7`; anything missing, non-numeric, or out of range is
/// page 1.
pub fn parse_page_param(param: Option<&str>) -> Page {
    let Some(raw) = param else {
        return Page::FIRST;
    };
    let raw = raw.trim().trim_start_matches('?');
    let value = raw
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .unwrap_or(raw);
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(Page::new)
        .unwrap_or(Page::FIRST)
}

/// Query string for a page, as shown in the reader footer.
pub fn page_query(page_number: i64) -> String {
    format!("?page={page_number}")
}
