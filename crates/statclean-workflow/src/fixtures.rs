//! Built-in demo data
//!
//! Static survey records and canned result figures. Nothing here is computed;
//! the numbers are what the guided demo shows regardless of input.

use crate::dataset::{Dataset, SurveyRecord};
use serde::{Deserialize, Serialize};

/// File name the demo dataset is presented under
pub const DEMO_FILE_NAME: &str = "sample_survey_data.csv";

/// Data quality score reported after cleaning
pub const DATA_QUALITY_SCORE: f64 = 92.5;

/// Quality score shown once cleaning tasks have run
pub const CLEANED_QUALITY_LABEL: &str = "95.2%";

#[allow(clippy::type_complexity)]
const SURVEY_ROWS: [(u32, Option<u32>, &str, Option<u32>, &str, &str, &str, &str); 15] = [
    (1, Some(25), "North", Some(45000), "Graduate", "Yes", "Female", "Teacher"),
    (2, Some(34), "South", Some(52000), "Post-Graduate", "No", "Male", "Engineer"),
    (3, Some(28), "East", None, "Graduate", "Yes", "Female", "Doctor"),
    (4, Some(45), "West", Some(78000), "Graduate", "Yes", "Male", "Manager"),
    (5, None, "North", Some(41000), "High School", "No", "Female", "Clerk"),
    (6, Some(31), "South", Some(95000), "Post-Graduate", "Yes", "Male", "Consultant"),
    (7, Some(29), "East", Some(48000), "Graduate", "No", "Female", "Analyst"),
    (8, Some(37), "West", Some(62000), "Graduate", "Yes", "Male", "Developer"),
    (9, Some(26), "North", Some(39000), "High School", "No", "Female", "Assistant"),
    (10, Some(42), "South", Some(71000), "Post-Graduate", "Yes", "Male", "Professor"),
    (11, Some(33), "East", Some(54000), "Graduate", "Yes", "Female", "Nurse"),
    (12, Some(38), "West", Some(67000), "Post-Graduate", "No", "Male", "Lawyer"),
    (13, Some(27), "North", Some(43000), "Graduate", "Yes", "Female", "Designer"),
    (14, Some(41), "South", Some(73000), "Graduate", "Yes", "Male", "Accountant"),
    (15, Some(35), "East", Some(58000), "Post-Graduate", "No", "Female", "Researcher"),
];

/// The demo survey: 15 records over 8 fields, two values missing.
#[must_use]
pub fn demo_survey() -> Dataset {
    let records = SURVEY_ROWS
        .iter()
        .map(
            |&(id, age, region, income, education, response, gender, occupation)| SurveyRecord {
                id,
                age,
                region: region.to_string(),
                income,
                education: education.to_string(),
                response: response.to_string(),
                gender: gender.to_string(),
                occupation: occupation.to_string(),
            },
        )
        .collect();

    Dataset {
        name: DEMO_FILE_NAME.to_string(),
        schema: Dataset::survey_schema(),
        records,
    }
}

/// Post-stratification weight per region
#[must_use]
pub fn regional_weights() -> Vec<(&'static str, f64)> {
    vec![("North", 1.2), ("South", 0.9), ("East", 1.1), ("West", 1.0)]
}

/// Canned cleaning outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CleaningResults {
    pub original_records: usize,
    pub missing_values: usize,
    pub outliers: usize,
    pub duplicates: usize,
    pub rule_violations: usize,
    pub cleaned_records: usize,
    pub data_quality_score: f64,
}

impl Default for CleaningResults {
    fn default() -> Self {
        Self {
            original_records: 15,
            missing_values: 2,
            outliers: 1,
            duplicates: 0,
            rule_violations: 0,
            cleaned_records: 15,
            data_quality_score: DATA_QUALITY_SCORE,
        }
    }
}

/// Canned estimation outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResults {
    pub total_population: u64,
    pub estimated_response_rate: f64,
    pub margin_of_error: f64,
    pub confidence_interval: String,
    pub sample_size: usize,
    pub effective_sample_size: f64,
}

impl Default for EstimationResults {
    fn default() -> Self {
        Self {
            total_population: 125_000,
            estimated_response_rate: 62.5,
            margin_of_error: 3.2,
            confidence_interval: "95%".to_string(),
            sample_size: 15,
            effective_sample_size: 14.8,
        }
    }
}
