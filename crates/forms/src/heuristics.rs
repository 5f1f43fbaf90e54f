//! Plausible values for form fields, chosen by a flat rule table.
//!
//! Each rule is a predicate over the field's declared kind and its lower-cased
//! name, label and placeholder. Rules are evaluated top to bottom and the
//! first match supplies the value; a field no rule matches is left alone.

use sitewalk_core::{CustomFormField, FieldKind, FormField, FormFieldMeta};

pub const PASSWORD: &str = "Str0ng!Passw0rd#2024";
pub const EMAIL: &str = "test.user@example.com";
pub const PERSON_NAME: &str = "John Doe";
pub const PHONE: &str = "+1-555-010-0199";
pub const NUMBER: &str = "25";
pub const COMPANY: &str = "Acme Corporation";
pub const STREET: &str = "123 Main Street";
pub const CITY: &str = "Springfield";
pub const COUNTRY: &str = "United States";
pub const CHECKED: &str = "on";
pub const GENERIC_TEXT: &str = "Test input";

/// What a rule gets to look at.
#[derive(Debug, Clone)]
pub struct FieldProbe {
    pub kind: FieldKind,
    pub required: bool,
    /// name, label and placeholder, lower-cased and space-joined.
    pub text: String,
}

impl FieldProbe {
    pub fn new(meta: &FormFieldMeta) -> Self {
        let text = [meta.name.as_str(), meta.label.as_str(), meta.placeholder.as_str()]
            .join(" ")
            .to_lowercase();
        Self {
            kind: meta.kind,
            required: meta.required,
            text,
        }
    }

    fn mentions(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    /// Controls that hold a typed or selected value. Checkboxes and radios
    /// only toggle, so the value rules never apply to them.
    fn takes_value(&self) -> bool {
        self.kind.is_text_like() || self.kind == FieldKind::Select
    }
}

pub struct Rule {
    pub category: &'static str,
    pub applies: fn(&FieldProbe) -> bool,
    pub value: &'static str,
}

pub const RULES: &[Rule] = &[
    Rule {
        category: "password",
        applies: |f| f.kind == FieldKind::Password,
        value: PASSWORD,
    },
    Rule {
        category: "email",
        applies: |f| f.takes_value() && (f.kind == FieldKind::Email || f.mentions("email")),
        value: EMAIL,
    },
    Rule {
        category: "name",
        applies: |f| f.takes_value() && f.mentions("name"),
        value: PERSON_NAME,
    },
    Rule {
        category: "phone",
        applies: |f| f.takes_value() && (f.mentions("phone") || f.mentions("tel")),
        value: PHONE,
    },
    Rule {
        category: "number",
        applies: |f| f.takes_value() && (f.kind == FieldKind::Number || f.mentions("age")),
        value: NUMBER,
    },
    Rule {
        category: "company",
        applies: |f| f.takes_value() && (f.mentions("company") || f.mentions("organization")),
        value: COMPANY,
    },
    Rule {
        category: "address",
        applies: |f| f.takes_value() && f.mentions("address"),
        value: STREET,
    },
    Rule {
        category: "city",
        applies: |f| f.takes_value() && f.mentions("city"),
        value: CITY,
    },
    Rule {
        category: "country",
        applies: |f| f.takes_value() && f.mentions("country"),
        value: COUNTRY,
    },
    Rule {
        category: "consent",
        applies: |f| f.required && matches!(f.kind, FieldKind::Checkbox | FieldKind::Radio),
        value: CHECKED,
    },
    Rule {
        category: "text",
        applies: |f| matches!(f.kind, FieldKind::Text | FieldKind::Textarea),
        value: GENERIC_TEXT,
    },
];

/// First matching rule for this field, if any.
pub fn classify(meta: &FormFieldMeta) -> Option<&'static Rule> {
    let probe = FieldProbe::new(meta);
    RULES.iter().find(|rule| (rule.applies)(&probe))
}

pub fn value_for(meta: &FormFieldMeta) -> Option<&'static str> {
    classify(meta).map(|rule| rule.value)
}

/// Fill instructions for every field a rule matches.
pub fn generate(fields: &[FormFieldMeta]) -> Vec<FormField> {
    fields
        .iter()
        .filter_map(|meta| {
            value_for(meta).map(|value| FormField {
                selector: meta.selector.clone(),
                value: value.to_string(),
                kind: meta.kind,
            })
        })
        .collect()
}

/// Caller-supplied values replace the generator entirely when present.
/// Kinds come from the scanned metadata, defaulting to text for selectors
/// the scan did not see.
pub fn resolve_fields(fields: &[FormFieldMeta], custom: Option<&[CustomFormField]>) -> Vec<FormField> {
    match custom {
        Some(custom) if !custom.is_empty() => custom
            .iter()
            .map(|c| FormField {
                selector: c.selector.clone(),
                value: c.value.clone(),
                kind: fields
                    .iter()
                    .find(|m| m.selector == c.selector)
                    .map(|m| m.kind)
                    .unwrap_or(FieldKind::Text),
            })
            .collect(),
        _ => generate(fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(kind: FieldKind, name: &str) -> FormFieldMeta {
        FormFieldMeta {
            selector: format!("[name=\"{name}\"]"),
            kind,
            name: name.to_string(),
            placeholder: String::new(),
            label: String::new(),
            required: false,
        }
    }

    #[test]
    fn test_email_by_name() {
        assert_eq!(value_for(&meta(FieldKind::Text, "email")), Some(EMAIL));
    }

    #[test]
    fn test_password_by_type() {
        assert_eq!(value_for(&meta(FieldKind::Password, "")), Some(PASSWORD));
        // type wins over a misleading name
        assert_eq!(value_for(&meta(FieldKind::Password, "email")), Some(PASSWORD));
    }

    #[test]
    fn test_label_and_placeholder_count() {
        let mut field = meta(FieldKind::Text, "f1");
        field.label = "Your City".into();
        assert_eq!(value_for(&field), Some(CITY));

        let mut field = meta(FieldKind::Text, "f2");
        field.placeholder = "Phone number".into();
        // "number" is not a rule keyword; "phone" is
        assert_eq!(value_for(&field), Some(PHONE));
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(value_for(&meta(FieldKind::Text, "company_name")), Some(PERSON_NAME));
        assert_eq!(value_for(&meta(FieldKind::Text, "tel")), Some(PHONE));
        assert_eq!(value_for(&meta(FieldKind::Number, "qty")), Some(NUMBER));
        assert_eq!(value_for(&meta(FieldKind::Text, "age")), Some(NUMBER));
        assert_eq!(value_for(&meta(FieldKind::Text, "organization")), Some(COMPANY));
        assert_eq!(value_for(&meta(FieldKind::Textarea, "street_address")), Some(STREET));
        assert_eq!(value_for(&meta(FieldKind::Select, "country")), Some(COUNTRY));
        assert_eq!(value_for(&meta(FieldKind::Textarea, "notes")), Some(GENERIC_TEXT));
    }

    #[test]
    fn test_unmatched_fields_skipped() {
        assert_eq!(value_for(&meta(FieldKind::Select, "size")), None);
        assert_eq!(value_for(&meta(FieldKind::Checkbox, "remember")), None);

        let mut consent = meta(FieldKind::Checkbox, "terms");
        consent.required = true;
        assert_eq!(value_for(&consent), Some(CHECKED));

        // keyword names do not turn a toggle into a text field
        assert_eq!(value_for(&meta(FieldKind::Checkbox, "newsletter_email")), None);
        assert_eq!(value_for(&meta(FieldKind::Radio, "country_us")), None);
        let mut gift = meta(FieldKind::Checkbox, "gift_address");
        gift.label = "Ship to a different address".into();
        assert_eq!(value_for(&gift), None);
        gift.required = true;
        assert_eq!(value_for(&gift), Some(CHECKED));

        let generated = generate(&[meta(FieldKind::Select, "size"), meta(FieldKind::Text, "q")]);
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].selector, "[name=\"q\"]");
    }

    #[test]
    fn test_custom_fields_replace_generator() {
        let scanned = vec![meta(FieldKind::Email, "login"), meta(FieldKind::Text, "q")];
        let custom = vec![
            CustomFormField { selector: "[name=\"login\"]".into(), value: "me@corp.test".into() },
            CustomFormField { selector: "#otp".into(), value: "123456".into() },
        ];

        let fields = resolve_fields(&scanned, Some(&custom));
        assert_eq!(
            fields,
            vec![
                FormField { selector: "[name=\"login\"]".into(), value: "me@corp.test".into(), kind: FieldKind::Email },
                FormField { selector: "#otp".into(), value: "123456".into(), kind: FieldKind::Text },
            ]
        );

        assert_eq!(resolve_fields(&scanned, Some(&[])).len(), 2);
        assert_eq!(resolve_fields(&scanned, None).len(), 2);
    }
}
