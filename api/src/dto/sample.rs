//! Sample demo payloads

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SampleRequest {
    #[validate(
        required(message = "샘플명은 필수입니다"),
        custom(function = "not_blank", message = "샘플명은 필수입니다")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "설명은 필수입니다"),
        custom(function = "not_blank", message = "설명은 필수입니다")
    )]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
    #[serde(with = "sample_time")]
    pub created_at: NaiveDateTime,
}

mod sample_time {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format("%Y-%m-%dT%H:%M:%S%.6f"))
    }
}
