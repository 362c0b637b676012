//! Record shapes exchanged with the remote API
//!
//! Every collection the console displays is decoded into one of these types
//! at the client boundary. Field names follow the server's camelCase JSON and
//! the `_id` identifier convention; unknown fields are ignored and a missing
//! required field fails the decode.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Server-issued record identifier
pub type RecordId = String;

/// Parse a server timestamp
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00.000Z`) and bare dates
/// (`2024-01-01`, read as midnight UTC).
///
/// # Errors
///
/// Returns [`crate::Error::InvalidTimestamp`] when neither form matches.
pub fn parse_timestamp(value: &str) -> crate::Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| crate::Error::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Serde adapters for [`parse_timestamp`]
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error as _};

    /// Deserialize a required timestamp
    ///
    /// # Errors
    ///
    /// Fails when the value is not a string in a supported format.
    pub fn required<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(D::Error::custom)
    }

    /// Deserialize an optional timestamp; `null` and absent fields become `None`
    ///
    /// # Errors
    ///
    /// Fails when a present value is not in a supported format.
    pub fn optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse_timestamp(&raw).map_err(D::Error::custom))
            .transpose()
    }
}

/// Serde adapters for numbers the server types loosely
///
/// A value may arrive as a JSON number or a numeric string. Anything else
/// decodes as `None` so one odd field never fails a whole collection.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn number(value: &Value) -> Option<f64> {
        let number = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        };
        number.filter(|number: &f64| number.is_finite())
    }

    /// Deserialize an optional decimal
    ///
    /// # Errors
    ///
    /// Only fails when the input is not valid JSON.
    pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?
            .as_ref()
            .and_then(number))
    }

    /// Deserialize an optional non-negative count, rounding fractions
    ///
    /// # Errors
    ///
    /// Only fails when the input is not valid JSON.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn count<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?
            .as_ref()
            .and_then(number)
            .filter(|number| *number >= 0.0)
            .and_then(|number| T::try_from(number.round() as u64).ok()))
    }
}

/// Image in the gallery collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Identifier
    #[serde(rename = "_id")]
    pub id: RecordId,

    /// Public address of the image
    pub url: String,

    /// Optional caption
    #[serde(default)]
    pub caption: Option<String>,

    /// Upload time
    #[serde(deserialize_with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
}

impl GalleryItem {
    /// Caption to display, `"Untitled"` when absent or blank
    #[must_use]
    pub fn title(&self) -> &str {
        self.caption
            .as_deref()
            .filter(|caption| !caption.trim().is_empty())
            .unwrap_or("Untitled")
    }
}

/// Entry in the menu collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Identifier
    #[serde(rename = "_id")]
    pub id: RecordId,

    /// Dish name
    #[serde(default)]
    pub name: Option<String>,

    /// Price
    #[serde(default, deserialize_with = "lenient::float")]
    pub price: Option<f64>,

    /// Menu section
    #[serde(default)]
    pub category: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Creation time
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Booking inquiry submitted through the public contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Identifier
    #[serde(rename = "_id")]
    pub id: RecordId,

    /// Name of the inquirer
    pub name: String,

    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Kind of event
    #[serde(default)]
    pub event_type: Option<String>,

    /// Expected number of guests
    #[serde(default, deserialize_with = "lenient::count")]
    pub guests: Option<u32>,

    /// Event location
    #[serde(default)]
    pub place: Option<String>,

    /// Free-form message
    #[serde(default)]
    pub message: Option<String>,

    /// Submission time
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub created_at: Option<DateTime<Utc>>,

    /// Not yet seen by an administrator
    #[serde(default)]
    pub is_new: bool,
}

/// Number of inquiries the server still flags as new
#[must_use]
pub fn unseen_count(bookings: &[Booking]) -> usize {
    bookings.iter().filter(|booking| booking.is_new).count()
}

/// Customer testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    /// Identifier
    #[serde(rename = "_id")]
    pub id: RecordId,

    /// Author name
    #[serde(default)]
    pub name: Option<String>,

    /// Testimonial text
    #[serde(default)]
    pub message: Option<String>,

    /// Star rating
    #[serde(default, deserialize_with = "lenient::count")]
    pub rating: Option<u8>,

    /// Creation time
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Credentials sent to `POST /auth/login`
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Administrator user name
    #[validate(length(min = 1))]
    pub username: String,

    /// Password
    #[validate(length(min = 1))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login answer
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Credential token
    pub token: String,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Error body returned by the server on non-2xx answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Human readable message
    #[serde(default)]
    pub message: Option<String>,
}
