use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Education-stage labels offered by the edit form. `level` itself is
/// free-form; this list is only the picker vocabulary.
pub const EDUCATION_LEVELS: &[&str] = &[
    "Nursery",
    "Kindergarten",
    "Elementary Grade 1",
    "Elementary Grade 2",
    "Elementary Grade 3",
    "Elementary Grade 4",
    "Elementary Grade 5",
    "Elementary Grade 6",
    "Middle School Grade 7",
    "Middle School Grade 8",
    "Middle School Grade 9",
    "High School Grade 10",
    "High School Grade 11",
    "High School Grade 12",
    "Bachelor's Degree",
    "Master's Degree",
    "Doctoral Degree",
    "Other",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    /// Identity key for update/delete; never changes after creation.
    pub id: Uuid,
    pub start_date: DateTime<Utc>,
    /// `None` means ongoing.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    pub institution: String,
    pub level: String,
}

impl EducationEntry {
    pub fn new(
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        institution: String,
        level: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
            institution,
            level,
        }
    }

    /// Display range, e.g. "Sep 2010 - Jun 2016" or "Sep 2010 - Present".
    pub fn date_range_string(&self) -> String {
        let start = self.start_date.format("%b %Y");
        match self.end_date {
            Some(end) => format!("{} - {}", start, end.format("%b %Y")),
            None => format!("{} - Present", start),
        }
    }
}
