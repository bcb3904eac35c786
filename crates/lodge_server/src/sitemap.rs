//! Sitemap generation.

use lodge_core::{Page, PageTemplate};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::collections::HashSet;
use std::fmt::Write;

// Characters that may not appear raw in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode each segment of a site-relative path.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a sitemap `urlset` with one entry per distinct page location.
///
/// Path segments are percent-encoded. When several pages map to the same
/// location (`home` and `index` both map to the root) the first one wins.
///
/// # Examples
///
/// ```
/// use lodge_core::{PageBuilder, PageTemplate};
/// use lodge_server::render_sitemap;
///
/// let home = PageBuilder::default()
///     .slug("home")
///     .name("Home")
///     .template(PageTemplate::Home)
///     .build()
///     .unwrap();
///
/// let xml = render_sitemap("https://lodge.example/", &[home]);
/// assert!(xml.contains("<loc>https://lodge.example/</loc>"));
/// assert!(xml.contains("<priority>1.0</priority>"));
/// ```
pub fn render_sitemap(site_url: &str, pages: &[Page]) -> String {
    let origin = site_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    let mut seen = HashSet::new();
    for page in pages {
        let loc = format!("{}{}", origin, encode_path(&page.path()));
        if !seen.insert(loc.clone()) {
            continue;
        }
        let is_home = PageTemplate::default_for_slug(&page.slug) == PageTemplate::Home;
        let priority = if is_home { "1.0" } else { "0.8" };
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>weekly</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            escape_xml(&loc),
            page.created_at.format("%Y-%m-%d"),
            priority,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lodge_core::PageBuilder;

    fn page(slug: &str) -> Page {
        PageBuilder::default()
            .slug(slug)
            .name(slug)
            .created_at(Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn one_url_per_page() {
        let xml = render_sitemap("https://lodge.example", &[page("home"), page("suites")]);

        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://lodge.example/</loc>"));
        assert!(xml.contains("<loc>https://lodge.example/suites</loc>"));
        assert!(xml.contains("<lastmod>2024-05-17</lastmod>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn locations_are_escaped() {
        let xml = render_sitemap("https://lodge.example", &[page("tea&cake's")]);

        assert!(xml.contains("/tea&amp;cake&apos;s</loc>"));
    }

    #[test]
    fn locations_are_percent_encoded() {
        let xml = render_sitemap("https://lodge.example", &[page("our story"), page("café")]);

        assert!(xml.contains("<loc>https://lodge.example/our%20story</loc>"));
        assert!(xml.contains("<loc>https://lodge.example/caf%C3%A9</loc>"));
    }

    #[test]
    fn pages_sharing_the_root_are_listed_once() {
        let xml = render_sitemap("https://lodge.example", &[page("home"), page("index")]);

        assert_eq!(xml.matches("<url>").count(), 1);
        assert_eq!(xml.matches("<loc>https://lodge.example/</loc>").count(), 1);
    }

    #[test]
    fn empty_site_is_an_empty_urlset() {
        let xml = render_sitemap("https://lodge.example", &[]);

        assert!(!xml.contains("<url>"));
        assert!(xml.contains("<urlset"));
    }
}
