use url::Url;

/// Neutralizes query-string characters that the directory sites double-encode
///
/// Department-index and pagination hrefs on these sites sometimes carry `&`,
/// `(` and `)` in a form that breaks a second round of encoding; replacing
/// them with `_` before resolution yields the URL the sites actually serve.
/// Profile hrefs are never cleaned - they are the records' merge keys.
///
/// # Arguments
///
/// * `href` - The raw href attribute value
///
/// # Returns
///
/// The cleaned href string
pub fn clean_href(href: &str) -> String {
    href.replace('&', "_").replace('(', "_").replace(')', "_")
}

/// Resolves an href against the page it was found on
///
/// Relative hrefs are joined onto `base`; absolute hrefs pass through the
/// same parser. Anything that fails to parse or resolves to a non-HTTP(S)
/// scheme (`javascript:`, `mailto:`, data URIs, ...) is dropped.
///
/// # Arguments
///
/// * `base` - The URL of the page the href was found on
/// * `href` - The href attribute value (cleaned or raw, per link class)
///
/// # Returns
///
/// * `Some(Url)` - The absolute URL
/// * `None` - The href is empty, unparseable, or not HTTP(S)
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
