//! In-page JavaScript for the Chrome session.
//!
//! Every script is a single expression. String arguments are embedded as JSON
//! literals so selectors and values never need manual escaping.

use sitewalk_core::Locator;

fn literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Arrow function: is this element rendered with a non-empty box.
const IS_VISIBLE: &str = r#"((el) => {
    const style = window.getComputedStyle(el);
    if (style.display === 'none' || style.visibility === 'hidden' || style.opacity === '0') return false;
    const rect = el.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
})"#;

/// First visible element of `candidates` (a JS array expression), else the
/// first element at all, else null.
fn prefer_visible(candidates: &str) -> String {
    format!(
        r#"((matches) => matches.find({IS_VISIBLE}) || matches[0] || null)({candidates})"#
    )
}

/// Expression evaluating to the element the locator addresses, or null.
/// When several elements match, a visible one wins over hidden duplicates
/// earlier in the document.
pub fn locate(locator: &Locator) -> String {
    match locator {
        Locator::Css(selector) => prefer_visible(&format!(
            "Array.from(document.querySelectorAll({}))",
            literal(selector)
        )),
        Locator::Text { scope, text } => prefer_visible(&format!(
            r#"Array.from(document.querySelectorAll({scope})).filter((el) => {{
                const want = {text};
                const inner = (el.textContent || '').trim().toLowerCase();
                const value = (typeof el.value === 'string' ? el.value : '').trim().toLowerCase();
                return inner === want || value === want;
            }})"#,
            scope = literal(scope),
            text = literal(&text.to_lowercase()),
        )),
    }
}

pub fn exists(locator: &Locator) -> String {
    format!("({}) !== null", locate(locator))
}

pub fn visible(locator: &Locator) -> String {
    format!("((el) => el !== null && {IS_VISIBLE}(el))({})", locate(locator))
}

pub fn click(locator: &Locator) -> String {
    format!(
        r#"((el) => {{
            if (!el) return false;
            el.scrollIntoView({{ block: 'center' }});
            el.click();
            return true;
        }})({})"#,
        locate(locator)
    )
}

/// Goes through the native value setter so framework-controlled inputs see
/// the change, then fires input and change.
pub fn fill(selector: &str, value: &str) -> String {
    format!(
        r#"((el, v) => {{
            if (!el) return false;
            el.focus();
            const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype;
            const desc = Object.getOwnPropertyDescriptor(proto, 'value');
            const native = el instanceof HTMLInputElement || el instanceof HTMLTextAreaElement;
            if (native && desc && desc.set) desc.set.call(el, v); else el.value = v;
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return true;
        }})(document.querySelector({}), {})"#,
        literal(selector),
        literal(value)
    )
}

/// Matches an option by value or by visible label.
pub fn select_option(selector: &str, value: &str) -> String {
    format!(
        r#"((el, v) => {{
            if (!el || !el.options) return false;
            const want = v.trim().toLowerCase();
            const opt = Array.from(el.options).find((o) => o.value.toLowerCase() === want || o.text.trim().toLowerCase() === want);
            if (!opt) return false;
            el.value = opt.value;
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return true;
        }})(document.querySelector({}), {})"#,
        literal(selector),
        literal(value)
    )
}

pub fn check(selector: &str) -> String {
    format!(
        r#"((el) => {{
            if (!el) return false;
            if (!el.checked) el.click();
            return true;
        }})(document.querySelector({}))"#,
        literal(selector)
    )
}

/// `[readyState, timeOrigin, resource entry count]` for the current document.
pub const LOAD_STATE: &str =
    "[document.readyState, performance.timeOrigin, performance.getEntriesByType('resource').length]";
