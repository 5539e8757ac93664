// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map raw CRM records to [`NormalizedContact`] and match phone numbers.
//!
//! Contact records carry `phone`, `mobile` and `email` as arrays and the
//! employer under `company.name`. Candidate records carry them as plain
//! strings and use `primary_email`.

use crate::models::{NormalizedContact, PhoneNumber, PhoneNumberLabel};
use crate::services::crm::EntityKind;
use serde_json::Value;

/// Record ID as a string, whether the CRM sent a number or a string.
pub fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Overlay `detail` onto `listing`. Detail fields win.
pub fn merge_records(listing: Value, detail: Value) -> Value {
    match (listing, detail) {
        (Value::Object(mut base), Value::Object(extra)) => {
            base.extend(extra);
            Value::Object(base)
        }
        (listing, Value::Null) => listing,
        (_, detail) => detail,
    }
}

pub fn map_record(kind: EntityKind, record: &Value) -> NormalizedContact {
    match kind {
        EntityKind::Contact => map_contact(record),
        EntityKind::Candidate => map_candidate(record),
    }
}

fn map_contact(record: &Value) -> NormalizedContact {
    let (name, first_name, last_name) = split_name(record);
    NormalizedContact {
        id: record_id(record).unwrap_or_default(),
        email: first_string(record.get("email")),
        name,
        first_name,
        last_name,
        organization: record
            .get("company")
            .and_then(|c| c.get("name"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        contact_url: None,
        avatar_url: None,
        phone_numbers: phone_numbers(record),
    }
}

fn map_candidate(record: &Value) -> NormalizedContact {
    let (name, first_name, last_name) = split_name(record);
    NormalizedContact {
        id: record_id(record).unwrap_or_default(),
        email: first_string(record.get("primary_email")),
        name,
        first_name,
        last_name,
        organization: None,
        contact_url: None,
        avatar_url: None,
        phone_numbers: phone_numbers(record),
    }
}

fn phone_numbers(record: &Value) -> Vec<PhoneNumber> {
    [
        ("phone", PhoneNumberLabel::Work),
        ("mobile", PhoneNumberLabel::Mobile),
    ]
    .into_iter()
    .filter_map(|(field, label)| {
        let number = sanitize_phone(&first_string(record.get(field))?);
        (!number.is_empty()).then_some(PhoneNumber {
            label,
            phone_number: number,
        })
    })
    .collect()
}

/// `"Max von Mustermann"` → first `"Max"`, last `"von Mustermann"`.
fn split_name(record: &Value) -> (Option<String>, Option<String>, Option<String>) {
    let Some(name) = first_string(record.get("name")) else {
        return (None, None, None);
    };
    let (first, last) = match name.split_once(' ') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (name.clone(), String::new()),
    };
    (Some(name), Some(first), Some(last))
}

/// A non-empty string, or the first element of an array of strings.
fn first_string(value: Option<&Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s.as_str(),
        Value::Array(items) => items.first()?.as_str()?,
        _ => return None,
    };
    (!s.is_empty()).then(|| s.to_string())
}

/// Keep only `+` and digits.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars().filter(|c| *c == '+' || c.is_ascii_digit()).collect()
}

/// Keep only digits.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Whether two numbers denote the same line: their digits must be equal.
pub fn phone_matches(a: &str, b: &str) -> bool {
    let a = normalize_phone(a);
    !a.is_empty() && a == normalize_phone(b)
}

/// Whether any phone field of `record` matches `number`.
pub fn record_has_phone(record: &Value, number: &str) -> bool {
    phone_numbers(record)
        .iter()
        .any(|p| phone_matches(&p.phone_number, number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_contact() {
        let record = json!({
            "id": 12,
            "name": "Max von Mustermann",
            "email": ["max@example.com", "other@example.com"],
            "phone": ["+49 (30) 123-456"],
            "mobile": ["0157 999 12345"],
            "company": { "name": "MyCompany GmbH" }
        });

        let contact = map_record(EntityKind::Contact, &record);
        assert_eq!(contact.id, "12");
        assert_eq!(contact.email.as_deref(), Some("max@example.com"));
        assert_eq!(contact.first_name.as_deref(), Some("Max"));
        assert_eq!(contact.last_name.as_deref(), Some("von Mustermann"));
        assert_eq!(contact.organization.as_deref(), Some("MyCompany GmbH"));
        assert_eq!(
            contact.phone_numbers,
            vec![
                PhoneNumber {
                    label: PhoneNumberLabel::Work,
                    phone_number: "+4930123456".to_string()
                },
                PhoneNumber {
                    label: PhoneNumberLabel::Mobile,
                    phone_number: "015799912345".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_map_candidate() {
        let record = json!({
            "id": "c-9",
            "name": "Erika",
            "primary_email": "erika@example.com",
            "mobile": "+49 157 1"
        });

        let contact = map_record(EntityKind::Candidate, &record);
        assert_eq!(contact.id, "c-9");
        assert_eq!(contact.email.as_deref(), Some("erika@example.com"));
        assert_eq!(contact.first_name.as_deref(), Some("Erika"));
        assert_eq!(contact.last_name.as_deref(), Some(""));
        assert_eq!(contact.organization, None);
        assert_eq!(contact.phone_numbers.len(), 1);
        assert_eq!(contact.phone_numbers[0].label, PhoneNumberLabel::Mobile);
    }

    #[test]
    fn test_missing_fields_map_to_none() {
        let contact = map_record(EntityKind::Contact, &json!({ "id": 1 }));
        assert_eq!(contact.name, None);
        assert_eq!(contact.email, None);
        assert!(contact.phone_numbers.is_empty());
    }

    #[test]
    fn test_merge_records_detail_wins() {
        let merged = merge_records(
            json!({ "id": 1, "name": "Listing", "phone": ["1"] }),
            json!({ "name": "Detail" }),
        );
        assert_eq!(merged, json!({ "id": 1, "name": "Detail", "phone": ["1"] }));
        assert_eq!(merge_records(json!({ "id": 1 }), Value::Null), json!({ "id": 1 }));
    }

    #[test]
    fn test_phone_matching() {
        assert!(phone_matches("+49 30 1234567", "+4930-1234567"));
        assert!(phone_matches("(030) 123 4567", "030-1234567"));
        assert!(!phone_matches("+49 30 1234567", "+49 30 7654321"));
        assert!(!phone_matches("", ""));
        assert!(!phone_matches("4567", "+49 30 1234567"));
    }

    #[test]
    fn test_trailing_digits_alone_do_not_match() {
        assert!(!phone_matches("1234567", "+1 212 1234567"));
        assert!(!phone_matches("030 1234567", "+44 301234567"));
        let record = json!({ "id": 1, "phone": ["030 1234567"] });
        assert!(!record_has_phone(&record, "+44 301234567"));
    }

    #[test]
    fn test_record_has_phone() {
        let record = json!({ "id": 1, "phone": "+49 30 1234567" });
        assert!(record_has_phone(&record, "+4930 1234567"));
        assert!(!record_has_phone(&record, "+4989 1234000"));
    }
}
