use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Attributes SPA frameworks use in place of `href`.
pub const NAV_ATTRIBUTES: &[&str] = &[
    "to",
    "data-href",
    "data-link",
    "data-url",
    "data-to",
    "data-route",
    "routerlink",
];

const LANDMARKS: &str = "nav, [role='navigation'], [role='menu'], [role='menubar'], \
     .nav, .navbar, .menu, .sidebar, header";

/// Quoted root-relative path inside an inline handler, e.g.
/// `onclick="location.href='/pricing'"` or `onclick="router.push(\"/docs\")"`.
static HANDLER_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["'`](/(?:[^/"'`\s][^"'`\s]*)?)["'`]"#).unwrap());

/// A rendered page captured at one instant: the parsed DOM plus whatever the
/// router probe found on the page's global scope.
pub struct PageSnapshot {
    pub url: String,
    pub document: Html,
    pub router_paths: Vec<String>,
}

impl PageSnapshot {
    pub fn parse(url: &str, html: &str, router_paths: Vec<String>) -> Self {
        Self {
            url: url.to_string(),
            document: Html::parse_document(html),
            router_paths,
        }
    }

    /// Base for resolving relative references: `<base href>` when the document
    /// declares one, otherwise the page's own URL.
    pub fn base_url(&self) -> String {
        selector("base[href]")
            .and_then(|s| self.document.select(&s).next())
            .and_then(|el| el.value().attr("href"))
            .and_then(|href| sitewalk_frontier::resolve(href, &self.url))
            .map(|u| u.to_string())
            .unwrap_or_else(|| self.url.clone())
    }
}

/// A link discovery strategy: raw, unresolved candidates from one snapshot.
pub type Strategy = fn(&PageSnapshot) -> Vec<String>;

fn selector(s: &str) -> Option<Selector> {
    Selector::parse(s).ok()
}

/// Router attributes share names with unrelated markup (`<animate to="10">`),
/// so only values shaped like a path or an absolute URL count.
fn looks_like_path(value: &str) -> bool {
    let value = value.trim();
    ["/", "./", "../", "#/", "http://", "https://"]
        .iter()
        .any(|prefix| value.starts_with(prefix))
}

fn router_attribute_values(el: &ElementRef, found: &mut Vec<String>) {
    for attr in NAV_ATTRIBUTES {
        if let Some(value) = el.value().attr(attr).filter(|v| looks_like_path(v)) {
            found.push(value.to_string());
        }
    }
}

fn nav_attribute_selector() -> Option<Selector> {
    let list = NAV_ATTRIBUTES
        .iter()
        .map(|a| format!("[{a}]"))
        .collect::<Vec<_>>()
        .join(", ");
    selector(&list)
}

/// `<a href>` and `<area href>`.
pub fn anchors(page: &PageSnapshot) -> Vec<String> {
    let Some(sel) = selector("a[href], area[href]") else {
        return vec![];
    };
    page.document
        .select(&sel)
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Router-style attributes and inline click handlers carrying a path.
pub fn spa_markers(page: &PageSnapshot) -> Vec<String> {
    let mut found = Vec::new();

    if let Some(sel) = nav_attribute_selector() {
        for el in page.document.select(&sel) {
            router_attribute_values(&el, &mut found);
        }
    }

    if let Some(sel) = selector("[onclick]") {
        for el in page.document.select(&sel) {
            let handler = el.value().attr("onclick").unwrap_or("");
            for cap in HANDLER_PATH_RE.captures_iter(handler) {
                found.push(cap[1].to_string());
            }
        }
    }

    found
}

/// Anything link-like inside navigation and menu landmarks, including
/// elements that only carry a router attribute.
pub fn nav_landmarks(page: &PageSnapshot) -> Vec<String> {
    let (Some(landmarks), Some(inner)) = (selector(LANDMARKS), selector("[href]")) else {
        return vec![];
    };
    let routed = nav_attribute_selector();

    let mut found = Vec::new();
    for landmark in page.document.select(&landmarks) {
        for el in landmark.select(&inner) {
            if let Some(href) = el.value().attr("href") {
                found.push(href.to_string());
            }
        }
        if let Some(routed) = &routed {
            for el in landmark.select(routed) {
                router_attribute_values(&el, &mut found);
            }
        }
    }
    found
}

/// Paths declared by a client-side router, minus parameterized patterns that
/// cannot be navigated to as-is.
pub fn router_config(page: &PageSnapshot) -> Vec<String> {
    page.router_paths
        .iter()
        .filter(|p| !is_route_pattern(p))
        .cloned()
        .collect()
}

fn is_route_pattern(path: &str) -> bool {
    path.contains(':')
        || path.contains('*')
        || path.contains('[')
        || path.contains('(')
        || path.starts_with("/_")
}
