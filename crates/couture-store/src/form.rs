//! Form input validation.
//!
//! Forms carry raw strings as typed by the user. Validation happens here and
//! only here: the service and the stores accept any well-typed record.

use std::fmt;

use couture_core::{
    MAX_FABRIC_PHOTO_BYTES, MIN_DESCRIPTION_CHARS, MIN_NAME_CHARS, MIN_PHONE_CHARS,
};
use time::OffsetDateTime;

use crate::record::{ClientPatch, ClientRecord, NewClient, SpecificMeasurements};

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every problem found in a form, in field order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid client form: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Check whether `field` was rejected.
    pub fn has(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw client form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientForm {
    pub name: String,
    pub phone: String,
    pub description: String,
    pub measurements: String,
    /// Number as typed. Blank means 0; decimals are truncated.
    pub price: String,
    /// Empty or absent means "no photo".
    pub fabric_photo: Option<String>,
    /// `(key, value)` pairs. Blank values are skipped.
    pub specific_measurements: Vec<(String, String)>,
    /// Creation date to keep. New records use "now" when absent.
    pub date: Option<OffsetDateTime>,
}

/// Fields that survived validation.
struct Validated {
    price: i64,
    specific: Option<SpecificMeasurements>,
}

impl ClientForm {
    /// Prefill a form from a stored record, for editing.
    pub fn from_record(record: &ClientRecord) -> Self {
        Self {
            name: record.name.clone(),
            phone: record.phone.clone(),
            description: record.description.clone(),
            measurements: record.measurements.clone(),
            price: record.price.to_string(),
            fabric_photo: record.fabric_photo.clone(),
            specific_measurements: record
                .specific_measurements
                .as_ref()
                .map(|m| {
                    m.entries()
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect()
                })
                .unwrap_or_default(),
            date: Some(record.date),
        }
    }

    /// Check every field and collect all problems.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.check().map(|_| ())
    }

    fn check(&self) -> Result<Validated, ValidationError> {
        let mut issues = Vec::new();
        let mut reject = |field: &str, message: String| {
            issues.push(FieldIssue {
                field: field.to_string(),
                message,
            });
        };

        for (field, value, min) in [
            ("name", &self.name, MIN_NAME_CHARS),
            ("phone", &self.phone, MIN_PHONE_CHARS),
            ("description", &self.description, MIN_DESCRIPTION_CHARS),
        ] {
            if value.chars().count() < min {
                reject(field, format!("must be at least {min} characters"));
            }
        }

        let price = match parse_price(&self.price) {
            Some(p) => p,
            None => {
                reject("price", format!("{:?} is not a number", self.price));
                0
            }
        };

        if let Some(photo) = self.photo()
            && photo_bytes(&photo) > MAX_FABRIC_PHOTO_BYTES
        {
            reject(
                "fabric_photo",
                format!("must be at most {} MB", MAX_FABRIC_PHOTO_BYTES / (1024 * 1024)),
            );
        }

        let mut specific = SpecificMeasurements::default();
        for (key, raw) in &self.specific_measurements {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => {
                    if !specific.set(key, v) {
                        reject(key, "unknown measurement".to_string());
                    }
                }
                _ => reject(key, format!("{raw:?} is not a number")),
            }
        }

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }
        Ok(Validated {
            price,
            specific: (!specific.is_empty()).then_some(specific),
        })
    }

    fn photo(&self) -> Option<String> {
        self.fabric_photo
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }

    /// Validate and build a record to create.
    pub fn into_new_client(self) -> Result<NewClient, ValidationError> {
        let valid = self.check()?;
        let fabric_photo = self.photo();
        Ok(NewClient {
            name: self.name,
            phone: self.phone,
            description: self.description,
            measurements: self.measurements,
            specific_measurements: valid.specific,
            price: valid.price,
            fabric_photo,
            date: Some(self.date.unwrap_or_else(OffsetDateTime::now_utc)),
            delivered: false,
            archived: false,
        })
    }

    /// Validate and build an edit patch. Status flags and the date are left alone.
    pub fn into_patch(self) -> Result<ClientPatch, ValidationError> {
        let valid = self.check()?;
        let fabric_photo = self.photo();
        Ok(ClientPatch {
            name: Some(self.name),
            phone: Some(self.phone),
            description: Some(self.description),
            measurements: Some(self.measurements),
            specific_measurements: Some(valid.specific),
            price: Some(valid.price),
            fabric_photo: Some(fabric_photo),
            delivered: None,
            archived: None,
        })
    }
}

/// Size of the image a photo value carries.
///
/// Base64 data URIs count their decoded payload; anything else (a URL)
/// counts its own length.
fn photo_bytes(photo: &str) -> usize {
    match photo
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
    {
        Some((_, payload)) => {
            let payload = payload.trim_end_matches('=');
            payload.len() * 3 / 4
        }
        None => photo.len(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn parse_price(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    let value: f64 = raw.parse().ok()?;
    value.is_finite().then(|| value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn form() -> ClientForm {
        ClientForm {
            name: "Marie Diop".into(),
            phone: "77 123 45 67".into(),
            description: "Robe de soirée".into(),
            measurements: "Tour de taille: 75cm".into(),
            price: "25000".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form() {
        let client = form().into_new_client().unwrap();
        assert_eq!(client.price, 25000);
        assert!(client.date.is_some());
        assert!(client.fabric_photo.is_none());
        assert!(!client.delivered && !client.archived);
    }

    #[test]
    fn test_collects_every_issue() {
        let err = ClientForm {
            name: "M".into(),
            phone: "123".into(),
            description: "ab".into(),
            price: "abc".into(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.issues.len(), 4);
        for field in ["name", "phone", "description", "price"] {
            assert!(err.has(field), "{field} should be rejected");
        }
        assert!(err.to_string().contains("name: must be at least 2 characters"));
    }

    #[test]
    fn test_lengths_count_raw_input() {
        let mut f = form();
        f.name = " a".into();
        let client = f.clone().into_new_client().unwrap();
        assert_eq!(client.name, " a");

        f.name = "a".into();
        assert!(f.validate().unwrap_err().has("name"));
    }

    #[test]
    fn test_fabric_photo_size_limit() {
        let payload_len = (MAX_FABRIC_PHOTO_BYTES / 3 + 1) * 4;
        let mut f = form();
        f.fabric_photo = Some(format!("data:image/jpeg;base64,{}", "A".repeat(payload_len)));
        let err = f.validate().unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(err.has("fabric_photo"));
        assert!(err.to_string().contains("at most 5 MB"));

        f.fabric_photo = Some(format!("data:image/jpeg;base64,{}", "A".repeat(4096)));
        assert!(f.validate().is_ok());
        f.fabric_photo = Some("https://images.unsplash.com/photo-1".into());
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_photo_bytes() {
        assert_eq!(photo_bytes("data:image/png;base64,AAAA"), 3);
        assert_eq!(photo_bytes("data:image/png;base64,AA=="), 1);
        assert_eq!(photo_bytes("https://example.com/a.jpg"), 25);
    }

    #[test]
    fn test_price_parsing() {
        assert_eq!(parse_price(""), Some(0));
        assert_eq!(parse_price(" 1500 "), Some(1500));
        assert_eq!(parse_price("1500.99"), Some(1500));
        assert_eq!(parse_price("-3.7"), Some(-3));
        assert_eq!(parse_price("1e3"), Some(1000));
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("12 000"), None);
    }

    #[test]
    fn test_specific_measurements() {
        let mut f = form();
        f.specific_measurements = vec![
            ("bust".into(), "92".into()),
            ("waist".into(), "".into()),
            ("armLength".into(), "61.5".into()),
        ];
        let m = f.into_new_client().unwrap().specific_measurements.unwrap();
        assert_eq!(m.bust, Some(92.0));
        assert_eq!(m.waist, None);
        assert_eq!(m.arm_length, Some(61.5));

        let mut bad = form();
        bad.specific_measurements = vec![("hips".into(), "wide".into()), ("ankle".into(), "20".into())];
        let err = bad.validate().unwrap_err();
        assert!(err.has("hips"));
        assert!(err.has("ankle"));
    }

    #[test]
    fn test_patch_keeps_flags_and_clears_photo() {
        let mut f = form();
        f.fabric_photo = Some("  ".into());
        let patch = f.into_patch().unwrap();
        assert_eq!(patch.fabric_photo, Some(None));
        assert_eq!(patch.specific_measurements, Some(None));
        assert_eq!(patch.delivered, None);
        assert_eq!(patch.archived, None);
    }

    #[test]
    fn test_from_record_roundtrip() {
        let mut specific = SpecificMeasurements::default();
        specific.set("neck", 39.0);
        let record = NewClient::new("Omar Seck", "78 444 55 66", "Chemise", 15000)
            .specific_measurements(specific.clone())
            .date(datetime!(2023-08-20 0:00 UTC))
            .into_record("4".into(), OffsetDateTime::now_utc());

        let form = ClientForm::from_record(&record);
        assert_eq!(form.price, "15000");
        assert_eq!(form.date, Some(record.date));

        let patch = form.into_patch().unwrap();
        let mut merged = record.clone();
        merged.apply(patch);
        assert_eq!(merged, record);
    }
}
