use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::education::EducationEntry;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Not Specified")]
    NotSpecified,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::NotSpecified
    }
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::NotSpecified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NotSpecified => "Not Specified",
        }
    }
}

/// The singleton profile record. One per installation, persisted in full
/// after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    pub chinese_name: String,
    pub english_name: String,
    pub birth_date: Option<DateTime<Utc>>,
    pub gender: Gender,
    pub email: String,
    pub education_history: Vec<EducationEntry>,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            chinese_name: String::new(),
            english_name: String::new(),
            birth_date: None,
            gender: Gender::NotSpecified,
            email: String::new(),
            education_history: Vec::new(),
        }
    }
}

impl ProfileRecord {
    /// Whole-year age as of today; `None` when the birth date is unset.
    pub fn age(&self) -> Option<i32> {
        self.age_at(Utc::now().date_naive())
    }

    pub fn age_at(&self, on: NaiveDate) -> Option<i32> {
        let birth = self.birth_date?.date_naive();
        let mut years = on.year() - birth.year();
        if (on.month(), on.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        Some(years)
    }
}
