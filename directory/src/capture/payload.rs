use serde::Deserialize;
use thiserror::Error;

use crate::model::person::{Person, PersonForm};

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("QR code is empty")]
    Empty,

    #[error("QR code does not contain contact details")]
    Unrecognized,

    #[error("QR code holds invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Json shape accepted from a QR code, missing fields stay empty for the form to flag
#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonContact {
    name: String,
    email: String,
    #[serde(alias = "tel")]
    phone: String,
    #[serde(alias = "title")]
    role: String,
}

/// Single left to right pass, so an escaped backslash is never read as the start of another escape
fn unescape(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }

        match chars.next() {
            Some('n') | Some('N') => unescaped.push(' '),
            Some(other) => unescaped.push(other),
            None => unescaped.push('\\'),
        }
    }

    unescaped
}

fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(';', "\\;")
        .replace('\n', "\\n")
}

fn parse_vcard(text: &str) -> PersonForm {
    let mut form = PersonForm::default();
    let mut structured_name = None;

    for line in text.lines() {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };

        // Parameters such as `TEL;TYPE=CELL` are ignored
        let property = key.split(';').next().unwrap_or(key).to_ascii_uppercase();

        match property.as_str() {
            "FN" => form.name = unescape(value),
            "N" => structured_name = Some(value.to_string()),
            "EMAIL" if form.email.is_empty() => form.email = unescape(value),
            "TEL" if form.phone.is_empty() => form.phone = unescape(value),
            "TITLE" => form.role = unescape(value),
            _ => {}
        }
    }

    // `N:Family;Given;...` only when there is no formatted name
    if form.name.is_empty() {
        if let Some(name) = structured_name {
            let mut parts = name.split(';');
            let family = parts.next().unwrap_or_default();
            let given = parts.next().unwrap_or_default();

            form.name = format!("{} {}", unescape(given), unescape(family))
                .trim()
                .to_string();
        }
    }

    form
}

fn parse_mailto(address: &str) -> PersonForm {
    let email = address.split('?').next().unwrap_or_default();

    PersonForm {
        email: email.to_string(),
        ..Default::default()
    }
}

/// Prefills a form from decoded QR text: a vCard, a json object or a `mailto:` link
pub fn parse_payload(text: &str) -> Result<PersonForm, PayloadError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(PayloadError::Empty);
    }

    let form = if text.to_ascii_uppercase().starts_with("BEGIN:VCARD") {
        parse_vcard(text)
    } else if text.starts_with('{') {
        let contact: JsonContact = serde_json::from_str(text)?;

        PersonForm::new(&contact.name, &contact.email, &contact.phone, &contact.role)
    } else if let Some(address) = text
        .get(..7)
        .filter(|prefix| prefix.eq_ignore_ascii_case("mailto:"))
        .map(|_| &text[7..])
    {
        parse_mailto(address)
    } else {
        return Err(PayloadError::Unrecognized);
    };

    Ok(form.trimmed())
}

/// vCard 3.0 for sharing a person as a QR code
pub fn to_vcard(person: &Person) -> String {
    [
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", escape(&person.name)),
        format!("EMAIL:{}", escape(&person.email)),
        format!("TEL:{}", escape(&person.phone)),
        format!("TITLE:{}", escape(&person.role)),
        "END:VCARD".to_string(),
    ]
    .join("\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vcard_with_parameters() {
        let text = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Ana Silva\r\nTEL;TYPE=CELL:(11) 99876-5432\r\nEMAIL;TYPE=WORK:ana@example.com\r\nTITLE:Developer\r\nEND:VCARD";

        let form = parse_payload(text).unwrap();

        assert_eq!(
            form,
            PersonForm::new("Ana Silva", "ana@example.com", "(11) 99876-5432", "Developer")
        );
    }

    #[test]
    fn falls_back_to_structured_name() {
        let form = parse_payload("BEGIN:VCARD\nN:Silva;Ana;;;\nEND:VCARD").unwrap();

        assert_eq!(form.name, "Ana Silva");
    }

    #[test]
    fn parses_json_with_aliases() {
        let form =
            parse_payload(r#"{"name": " Ana ", "email": "ana@example.com", "title": "Designer"}"#)
                .unwrap();

        assert_eq!(form, PersonForm::new("Ana", "ana@example.com", "", "Designer"));
    }

    #[test]
    fn parses_mailto_without_query() {
        let form = parse_payload("MAILTO:ana@example.com?subject=hi").unwrap();

        assert_eq!(form.email, "ana@example.com");
        assert!(form.name.is_empty());
    }

    #[test]
    fn rejects_other_payloads() {
        assert!(matches!(parse_payload("  "), Err(PayloadError::Empty)));
        assert!(matches!(
            parse_payload("https://example.com"),
            Err(PayloadError::Unrecognized)
        ));
        assert!(matches!(
            parse_payload("{not json"),
            Err(PayloadError::InvalidJson(_))
        ));
    }

    #[test]
    fn escaped_backslash_is_not_an_escape_sequence() {
        // Given a role with a backslash followed by an `n`
        let mut person = Person::new_test();
        person.role = r"C:\new".to_string();

        // When it is shared and scanned back
        let form = parse_payload(&to_vcard(&person)).unwrap();

        // Then the backslash survives
        assert!(to_vcard(&person).contains(r"TITLE:C:\\new"));
        assert_eq!(form.role, r"C:\new");
    }

    #[test]
    fn shared_vcard_reads_back_into_the_same_form() {
        // Given a person whose role needs escaping
        let mut person = Person::new_test();
        person.role = "Lead; Ops, Infra".to_string();

        // When it is shared and scanned back
        let vcard = to_vcard(&person);
        let form = parse_payload(&vcard).unwrap();

        // Then the form matches the person
        assert!(vcard.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
        assert_eq!(
            form,
            PersonForm::new(&person.name, &person.email, &person.phone, &person.role)
        );
    }
}
