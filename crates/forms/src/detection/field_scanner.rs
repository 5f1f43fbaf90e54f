use scraper::{ElementRef, Html, Selector};

use sitewalk_core::{FieldKind, FormFieldMeta};

/// Read metadata for every fillable control in a rendered document, in
/// document order. Hidden, disabled and button-like controls are skipped.
pub fn scan_fields(html: &str) -> Vec<FormFieldMeta> {
    let document = Html::parse_document(html);
    let Ok(controls) = Selector::parse("input, select, textarea") else {
        return Vec::new();
    };

    document
        .select(&controls)
        .filter_map(|el| describe(&document, &el))
        .collect()
}

fn describe(document: &Html, el: &ElementRef) -> Option<FormFieldMeta> {
    let attrs = el.value();
    if attrs.attr("disabled").is_some() {
        return None;
    }

    let kind = match attrs.name() {
        "select" => FieldKind::Select,
        "textarea" => FieldKind::Textarea,
        _ => FieldKind::from_input_type(attrs.attr("type").unwrap_or("text"))?,
    };

    Some(FormFieldMeta {
        selector: stable_selector(el),
        kind,
        name: attrs.attr("name").unwrap_or("").to_string(),
        placeholder: attrs.attr("placeholder").unwrap_or("").to_string(),
        label: find_label(document, el).unwrap_or_default(),
        required: attrs.attr("required").is_some() || attrs.attr("aria-required") == Some("true"),
    })
}

/// Prefer the element id, then its name, then a positional path.
pub fn stable_selector(el: &ElementRef) -> String {
    let attrs = el.value();
    let tag = attrs.name();

    if let Some(id) = attrs.attr("id").filter(|id| !id.is_empty()) {
        return id_selector(tag, id);
    }
    if let Some(name) = attrs.attr("name").filter(|n| !n.is_empty()) {
        return format!("{}[name=\"{}\"]", tag, escape_quoted(name));
    }
    positional_path(el)
}

fn id_selector(tag: &str, id: &str) -> String {
    let plain = id
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false)
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if plain {
        format!("#{}", id)
    } else {
        format!("{}[id=\"{}\"]", tag, escape_quoted(id))
    }
}

fn escape_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `tag:nth-of-type(n)` steps up to the nearest ancestor with an id, or `html`.
fn positional_path(el: &ElementRef) -> String {
    let mut segments = Vec::new();
    let mut current = Some(*el);

    while let Some(node) = current {
        let tag = node.value().name();
        if tag == "html" {
            segments.push("html".to_string());
            break;
        }
        if let Some(id) = node.value().attr("id").filter(|id| !id.is_empty()) {
            segments.push(id_selector(tag, id));
            break;
        }

        let position = node
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|sib| sib.value().name() == tag)
            .count()
            + 1;
        segments.push(format!("{}:nth-of-type({})", tag, position));

        current = node.parent().and_then(ElementRef::wrap);
    }

    segments.reverse();
    segments.join(" > ")
}

/// `<label for=id>`, then an enclosing `<label>`, then `aria-label`.
fn find_label(document: &Html, el: &ElementRef) -> Option<String> {
    if let Some(id) = el.value().attr("id") {
        let for_label = Selector::parse(&format!("label[for=\"{}\"]", escape_quoted(id))).ok();
        if let Some(label) = for_label.and_then(|s| document.select(&s).next()) {
            return Some(collapse(&label.text().collect::<String>()));
        }
    }

    let wrapping = el
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "label");
    if let Some(label) = wrapping {
        return Some(collapse(&label.text().collect::<String>()));
    }

    el.value().attr("aria-label").map(collapse)
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
