//! Feeds: the asynchronous jobs created by product write calls.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::codec::{int, lenient_string, timestamp};
use crate::model::collection::tagged_list;

/// The failure report attached to a processed feed.
///
/// On the wire this is `""` when there is no report, or an object whose
/// `File` is base64 (sometimes with escaped slashes). `file` holds the
/// decoded content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureReport {
    /// MIME type of the report, e.g. `text/csv`.
    pub mime_type: String,
    /// Decoded report content.
    pub file: String,
}

fn invalid<E: de::Error>(message: impl std::fmt::Display) -> E {
    E::custom(message)
}

impl<'de> Deserialize<'de> for FailureReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Value::Object(fields) = Value::deserialize(deserializer)? else {
            return Ok(Self::default());
        };
        let Some(mime_type) = fields.get("MimeType") else {
            return Ok(Self::default());
        };
        let mime_type = mime_type
            .as_str()
            .filter(|text| !text.is_empty())
            .ok_or_else(|| invalid::<D::Error>("FailureReports.MimeType must be a non-empty string"))?;
        let encoded = fields
            .get("File")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| invalid::<D::Error>("FailureReports.File must be a non-empty string"))?;

        let decoded = STANDARD
            .decode(encoded.replace('\\', ""))
            .map_err(|e| invalid::<D::Error>(format!("FailureReports.File is not base64: {e}")))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            file: String::from_utf8_lossy(&decoded).into_owned(),
        })
    }
}

impl Serialize for FailureReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.mime_type.is_empty() {
            return serializer.serialize_str("");
        }
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("MimeType", &self.mime_type)?;
        map.serialize_entry("File", &STANDARD.encode(&self.file))?;
        map.end()
    }
}

/// A feed as listed by `FeedList`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Feed {
    /// Feed id.
    pub feed: String,
    /// Processing status, e.g. `Finished`.
    pub status: String,
    /// The action that created the feed, e.g. `ProductCreate`.
    pub action: String,
    /// Creation time.
    #[serde(with = "timestamp")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(with = "timestamp")]
    pub updated_date: Option<DateTime<Utc>>,
    /// Origin of the feed, e.g. `api`.
    pub source: String,
    /// Records submitted.
    #[serde(with = "int")]
    pub total_records: i64,
    /// Records processed so far.
    #[serde(with = "int")]
    pub processed_records: i64,
    /// Records that failed.
    #[serde(with = "int")]
    pub failed_records: i64,
    /// Failure report, empty when none.
    pub failure_reports: FailureReport,
}

tagged_list!(
    /// Feeds from `{"Feed": ...}`.
    FeedList,
    "Feed",
    Feed
);

/// An error reported for one record of a feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeedError {
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub code: String,
    pub message: String,
    pub seller_sku: String,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub order_id: String,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub order_item_id: String,
}

tagged_list!(
    /// Feed errors from `{"Error": ...}`.
    FeedErrors,
    "Error",
    FeedError
);

/// A warning reported for one record of a feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeedWarning {
    pub message: String,
    pub seller_sku: String,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub order_id: String,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub order_item_id: String,
}

tagged_list!(
    /// Feed warnings from `{"Warning": ...}`.
    FeedWarnings,
    "Warning",
    FeedWarning
);

/// Detailed state of one feed, as returned by `FeedStatus`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeedStatus {
    /// Feed id.
    pub feed: String,
    /// Processing status.
    pub status: String,
    /// The action that created the feed.
    pub action: String,
    /// Creation time.
    #[serde(with = "timestamp")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(with = "timestamp")]
    pub updated_date: Option<DateTime<Utc>>,
    /// Origin of the feed.
    pub source: String,
    /// Records submitted.
    #[serde(with = "int")]
    pub total_records: i64,
    /// Records processed so far.
    #[serde(with = "int")]
    pub processed_records: i64,
    /// Records that failed.
    #[serde(with = "int")]
    pub failed_records: i64,
    /// Per-record errors.
    pub feed_errors: FeedErrors,
    /// Per-record warnings.
    pub feed_warnings: FeedWarnings,
}

impl FeedStatus {
    /// Returns `true` once every record has been processed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.total_records > 0 && self.processed_records >= self.total_records
    }
}
