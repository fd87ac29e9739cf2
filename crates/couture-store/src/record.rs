//! Client record types.
//!
//! Field names serialize in camelCase. The same shape is used for the local
//! blob, the REST wire format, and the JSON column of the SQL store.

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// One client's order entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    /// Store-assigned identifier. Never changes after creation.
    pub id: String,
    pub name: String,
    pub phone: String,
    pub description: String,
    /// Free-text measurements as dictated by the client.
    #[serde(default)]
    pub measurements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_measurements: Option<SpecificMeasurements>,
    pub price: i64,
    /// Data URI or external URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_photo: Option<String>,
    /// Creation timestamp. Never changes after creation.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(default)]
    pub delivered: bool,
    #[serde(default)]
    pub archived: bool,
}

impl ClientRecord {
    /// Shallow-merge a patch: supplied fields overwrite, omitted fields stay.
    ///
    /// `id` and `date` are not part of [`ClientPatch`] and cannot change here.
    pub fn apply(&mut self, patch: ClientPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.measurements {
            self.measurements = v;
        }
        if let Some(v) = patch.specific_measurements {
            self.specific_measurements = v;
        }
        if let Some(v) = patch.price {
            self.price = v;
        }
        if let Some(v) = patch.fabric_photo {
            self.fabric_photo = v;
        }
        if let Some(v) = patch.delivered {
            self.delivered = v;
        }
        if let Some(v) = patch.archived {
            self.archived = v;
        }
    }

    /// Not delivered and not archived.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.delivered && !self.archived
    }
}

/// Named body measurements in centimeters. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificMeasurements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bust: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inseam: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neck: Option<f64>,
}

impl SpecificMeasurements {
    /// Keys accepted by [`set`](Self::set), in display order.
    pub const KEYS: [&'static str; 7] = [
        "bust",
        "waist",
        "hips",
        "shoulderWidth",
        "armLength",
        "inseam",
        "neck",
    ];

    /// Set a measurement by key. Accepts camelCase and snake_case names.
    ///
    /// Returns `false` when the key is unknown.
    pub fn set(&mut self, key: &str, value: f64) -> bool {
        let slot = match key {
            "bust" => &mut self.bust,
            "waist" => &mut self.waist,
            "hips" => &mut self.hips,
            "shoulderWidth" | "shoulder_width" => &mut self.shoulder_width,
            "armLength" | "arm_length" => &mut self.arm_length,
            "inseam" => &mut self.inseam,
            "neck" => &mut self.neck,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Present measurements as `(key, value)` pairs.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        let values = [
            self.bust,
            self.waist,
            self.hips,
            self.shoulder_width,
            self.arm_length,
            self.inseam,
            self.neck,
        ];
        Self::KEYS
            .iter()
            .zip(values)
            .filter_map(|(k, v)| v.map(|v| (*k, v)))
            .collect()
    }

    /// Check if no measurement is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Fields of a record to be created. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub description: String,
    #[serde(default)]
    pub measurements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_measurements: Option<SpecificMeasurements>,
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_photo: Option<String>,
    /// Creation timestamp. The store uses "now" when absent.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<OffsetDateTime>,
    #[serde(default)]
    pub delivered: bool,
    #[serde(default)]
    pub archived: bool,
}

impl NewClient {
    /// Create with the required fields; everything else takes its default.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        description: impl Into<String>,
        price: i64,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            description: description.into(),
            measurements: String::new(),
            specific_measurements: None,
            price,
            fabric_photo: None,
            date: None,
            delivered: false,
            archived: false,
        }
    }

    /// Builder: set free-text measurements.
    pub fn measurements(mut self, measurements: impl Into<String>) -> Self {
        self.measurements = measurements.into();
        self
    }

    /// Builder: set structured measurements.
    pub fn specific_measurements(mut self, specific: SpecificMeasurements) -> Self {
        self.specific_measurements = Some(specific);
        self
    }

    /// Builder: set fabric photo reference.
    pub fn fabric_photo(mut self, photo: impl Into<String>) -> Self {
        self.fabric_photo = Some(photo.into());
        self
    }

    /// Builder: set creation timestamp.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Builder: set delivered flag.
    pub fn delivered(mut self, delivered: bool) -> Self {
        self.delivered = delivered;
        self
    }

    /// Builder: set archived flag.
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Turn into a stored record with the given id.
    pub fn into_record(self, id: String, now: OffsetDateTime) -> ClientRecord {
        ClientRecord {
            id,
            name: self.name,
            phone: self.phone,
            description: self.description,
            measurements: self.measurements,
            specific_measurements: self.specific_measurements,
            price: self.price,
            fabric_photo: self.fabric_photo,
            date: self.date.unwrap_or(now),
            delivered: self.delivered,
            archived: self.archived,
        }
    }
}

/// Partial update. `None` leaves a field untouched.
///
/// For optional fields the inner `Option` distinguishes "clear" (`Some(None)`,
/// JSON `null`) from "leave alone" (`None`, key absent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub specific_measurements: Option<Option<SpecificMeasurements>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub fabric_photo: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl ClientPatch {
    /// Patch that only sets the archived flag.
    pub fn archived(archived: bool) -> Self {
        Self {
            archived: Some(archived),
            ..Default::default()
        }
    }

    /// Patch that only sets the delivered flag.
    pub fn delivered(delivered: bool) -> Self {
        Self {
            delivered: Some(delivered),
            ..Default::default()
        }
    }

    /// Patch that only sets the price.
    pub fn price(price: i64) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }

    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// A present key (even `null`) becomes `Some(..)`; an absent key falls back to `default`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
