//! Heuristic extraction of a faculty record from one profile page
//!
//! The directory sites share a family resemblance but not a template, so
//! every field is extracted through a cascade of independent strategies
//! tried in order; the first one that produces a value wins and the rest
//! are skipped. A field whose whole cascade comes up empty is set to the
//! `"N/A"` sentinel. Extraction is pure and total: no network, no shared
//! state, and no failure mode beyond sentinel values.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::profile::{ProfileRecord, NA};

/// One field-extraction rule; cascades are slices of these, tried in order
type Strategy = fn(&Html) -> Option<String>;

/// Name lookup cascade, most specific markup first
const NAME_CHAIN: &[Strategy] = &[
    name_from_heading_strong,
    name_from_heading,
    name_from_column_heading,
];

/// Department lookup cascade: labeled text first, then structural fallbacks
const DEPARTMENT_CHAIN: &[Strategy] = &[
    department_from_labeled_text,
    department_from_name_location_list,
    department_from_muted_block,
];

/// Image lookup cascade: known selectors, then keyword hints, then containers
const IMAGE_CHAIN: &[Strategy] = &[
    image_from_known_selectors,
    image_from_keyword_hint,
    image_from_profile_container,
];

/// Selectors commonly used for profile photos across the site family
const IMAGE_SELECTORS: &[&str] = &[
    ".profile-image img",
    ".faculty-image img",
    ".avatar img",
    ".user-image img",
    ".photo img",
    "img.profile-photo",
    "img.faculty-photo",
    ".profile-pic img",
    "#profile_image img",
    ".researcher-photo img",
];

/// Keywords that mark an `img`'s src/alt as a likely portrait
const IMAGE_HINT_KEYWORDS: &[&str] = &["profile", "faculty", "photo", "avatar", "user"];

/// Keywords that mark a container's class as profile-related
const CONTAINER_KEYWORDS: &[&str] = &["profile", "faculty", "photo", "member", "person"];

/// Extracts a faculty record from a profile page
///
/// # Arguments
///
/// * `html` - The page body as fetched
/// * `url` - The page's own URL; relative image links resolve against it
/// * `institution` - The institution code the record is attributed to
///
/// # Returns
///
/// A complete [`ProfileRecord`]; fields that could not be recovered hold
/// `"N/A"`. This function never fails.
///
/// # Example
///
/// ```
/// use irins_harvest::profile::extract_profile;
/// use url::Url;
///
/// let html = "<html><body><h1>Dr. Ada Lovelace</h1></body></html>";
/// let url = Url::parse("https://iitm.irins.org/profile/1").unwrap();
/// let record = extract_profile(html, &url, "IITM");
/// assert_eq!(record.name, "Ada Lovelace");
/// assert_eq!(record.department, "N/A");
/// ```
pub fn extract_profile(html: &str, url: &Url, institution: &str) -> ProfileRecord {
    let doc = Html::parse_document(html);

    let name = apply_chain(&doc, NAME_CHAIN)
        .map(|raw| clean_name(&raw))
        .unwrap_or_else(|| NA.to_string());

    let department = apply_chain(&doc, DEPARTMENT_CHAIN).unwrap_or_else(|| NA.to_string());

    let vidwan_id = vidwan_from_raw(html)
        .or_else(|| vidwan_from_link(&doc))
        .unwrap_or_else(|| NA.to_string());

    let expertise = expertise_after_heading(&doc).unwrap_or_else(|| NA.to_string());

    let image_url = apply_chain(&doc, IMAGE_CHAIN)
        .and_then(|src| url.join(src.trim()).ok())
        .map(|resolved| resolved.to_string())
        .filter(|resolved| !is_unusable_image(resolved))
        .unwrap_or_else(|| NA.to_string());

    ProfileRecord {
        institution: institution.to_string(),
        name,
        department,
        vidwan_id,
        profile_url: url.to_string(),
        image_url,
        expertise,
        raw_html: html.to_string(),
    }
}

/// Runs a cascade and returns the first strategy's match
fn apply_chain(doc: &Html, chain: &[Strategy]) -> Option<String> {
    chain.iter().find_map(|strategy| strategy(doc))
}

// ===== Name =====

fn name_from_heading_strong(doc: &Html) -> Option<String> {
    select_first_text(doc, "h1 strong")
}

fn name_from_heading(doc: &Html) -> Option<String> {
    select_first_text(doc, "h1")
}

fn name_from_column_heading(doc: &Html) -> Option<String> {
    select_first_text(doc, "div.col-md-9 h3")
}

/// Strips leading honorifics and parenthetical notes from a raw name
///
/// Honorifics are stripped repeatedly, so "Prof. Dr. A. Rao" comes out as
/// "A. Rao". An honorific must be delimited by a period or whitespace:
/// "Mrinalini Das" keeps her name.
fn clean_name(raw: &str) -> String {
    // Longer alternatives first: "Professor" before "Prof", "Mrs" before "Mr"
    let honorific = match Regex::new(r"^(?:Professor|Prof|Dr|Mrs|Ms|Mr)(?:\.\s*|\s+)") {
        Ok(re) => re,
        Err(_) => return raw.trim().to_string(),
    };

    let mut name = raw.trim().to_string();
    loop {
        let stripped = honorific.replace(&name, "").into_owned();
        if stripped == name {
            break;
        }
        name = stripped;
    }

    match Regex::new(r"\s*\([^)]*\)") {
        Ok(re) => re.replace_all(&name, "").trim().to_string(),
        Err(_) => name.trim().to_string(),
    }
}

// ===== Department =====

/// First `div|p|span|li` whose sole text content carries a department label
///
/// Requiring the element to have no element children keeps an outer layout
/// `div` from shadowing the actual `<p>Department of ...</p>` inside it.
fn department_from_labeled_text(doc: &Html) -> Option<String> {
    let label = Regex::new(r"(?i)Department of|School of").ok()?;
    let selector = Selector::parse("div, p, span, li").ok()?;

    doc.select(&selector)
        .filter(|el| has_no_element_children(*el))
        .map(element_text)
        .find(|text| label.is_match(text))
}

fn department_from_name_location_list(doc: &Html) -> Option<String> {
    select_first_text(doc, "ul.name-location li:nth-of-type(2)")
}

fn department_from_muted_block(doc: &Html) -> Option<String> {
    select_first_text(doc, r#"div[style*="color:#666"]"#)
}

// ===== Vidwan ID =====

/// Vidwan profile id found directly in the raw page text
fn vidwan_from_raw(html: &str) -> Option<String> {
    let pattern = Regex::new(r"vidwan\.irins\.org/profile/(\d+)").ok()?;
    pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

/// Vidwan profile id inside the href of a cross-link to the Vidwan system
fn vidwan_from_link(doc: &Html) -> Option<String> {
    let vidwan_href = Regex::new(r"(?i)vidwan.*profile").ok()?;
    let digits = Regex::new(r"\d+").ok()?;
    let selector = Selector::parse("a[href]").ok()?;

    doc.select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .find(|href| vidwan_href.is_match(href))
        .and_then(|href| digits.find(href).map(|m| m.as_str().to_string()))
}

// ===== Expertise =====

/// Text of the element following an "Expertise"/"Research Interests" heading
///
/// Sub-items of the sibling (list entries, spans) are joined with `", "`.
fn expertise_after_heading(doc: &Html) -> Option<String> {
    let label = Regex::new(r"(?i)Expertise|Research Interests").ok()?;
    let selector = Selector::parse("h2, h3, h4, strong").ok()?;

    let heading = doc
        .select(&selector)
        .filter(|el| has_no_element_children(*el))
        .find(|el| label.is_match(&element_text(*el)))?;

    let sibling = heading.next_siblings().find_map(ElementRef::wrap)?;

    Some(
        sibling
            .text()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

// ===== Image =====

fn image_from_known_selectors(doc: &Html) -> Option<String> {
    for selector in IMAGE_SELECTORS {
        let Ok(parsed) = Selector::parse(selector) else {
            continue;
        };
        let src = doc
            .select(&parsed)
            .next()
            .and_then(|el| el.value().attr("src"));
        if let Some(src) = src {
            if !src.trim().is_empty() {
                return Some(src.to_string());
            }
        }
    }
    None
}

fn image_from_keyword_hint(doc: &Html) -> Option<String> {
    let selector = Selector::parse("img").ok()?;

    for img in doc.select(&selector) {
        let src = img.value().attr("src").unwrap_or("");
        let alt = img.value().attr("alt").unwrap_or("");
        let src_lower = src.to_lowercase();
        let alt_lower = alt.to_lowercase();

        let hinted = IMAGE_HINT_KEYWORDS
            .iter()
            .any(|kw| src_lower.contains(kw) || alt_lower.contains(kw));

        if hinted && !src.trim().is_empty() {
            return Some(src.to_string());
        }
    }
    None
}

/// First image of the first profile-flavored container that yields a real src
///
/// Only the first `img` of each candidate container is considered; a
/// container whose first image is inline data or an icon is passed over.
fn image_from_profile_container(doc: &Html) -> Option<String> {
    let containers = Selector::parse("div, section").ok()?;
    let images = Selector::parse("img").ok()?;

    for container in doc.select(&containers) {
        let class_attr = container.value().attr("class").unwrap_or("").to_lowercase();
        if !CONTAINER_KEYWORDS.iter().any(|kw| class_attr.contains(kw)) {
            continue;
        }

        if let Some(img) = container.select(&images).next() {
            if let Some(src) = img.value().attr("src") {
                let src = src.trim();
                if !src.is_empty() && !src.starts_with("data:image") && !src.ends_with(".ico") {
                    return Some(src.to_string());
                }
            }
        }
    }
    None
}

/// Rejects resolved image URLs that cannot be a real portrait
fn is_unusable_image(resolved: &str) -> bool {
    let lower = resolved.to_lowercase();
    lower.contains("placeholder") || lower.starts_with("data:image") || lower.ends_with(".ico")
}

// ===== Shared helpers =====

/// Concatenated, fragment-stripped text of the first element matching `selector`
fn select_first_text(doc: &Html, selector: &str) -> Option<String> {
    let parsed = Selector::parse(selector).ok()?;
    doc.select(&parsed)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

fn element_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("")
}

fn has_no_element_children(el: ElementRef) -> bool {
    el.children().all(|child| !child.value().is_element())
}
