use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payload of `POST /api/contact`. Required fields default to the empty
/// string when absent so the handler can report all of them in a single
/// validation message instead of a field-by-field deserialization error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub message: Option<String>,
}

/// Payload of `POST /api/registration`. The browser form sends empty strings
/// for untouched fields, so every optional field treats `""` as absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationSubmission {
    pub full_name: String,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub fathers_name: Option<String>,
    pub email: String,
    pub mob_number: String,
    pub date_of_birth: Option<DateOfBirth>,
    #[serde(deserialize_with = "optional_gender")]
    pub gender: Option<Gender>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub address: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub city: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub alternate_phone: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub marital_status: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub occupation: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub education: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub reference: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub experience: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub years_of_experience: Option<String>,
    #[serde(rename = "courseIAT", deserialize_with = "optional_course")]
    pub course_iat: Option<CourseSelection>,
    #[serde(rename = "courseACT", deserialize_with = "optional_course")]
    pub course_act: Option<CourseSelection>,
}

/// Date of birth as the form submits it: three raw string fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateOfBirth {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl DateOfBirth {
    pub fn is_complete(&self) -> bool {
        !self.day.trim().is_empty()
            && !self.month.trim().is_empty()
            && !self.year.trim().is_empty()
    }

    pub fn formatted(&self) -> Option<String> {
        if self.is_complete() {
            Some(format!(
                "{}/{}/{}",
                self.day.trim(),
                self.month.trim(),
                self.year.trim()
            ))
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn to_str(&self) -> &str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(format!("{} is not a valid gender option", value)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Course enrollment options offered on the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseSelection {
    #[serde(rename = "ONE SEGMENT")]
    OneSegment,
    #[serde(rename = "BOTH SEGMENT - COMBO")]
    BothSegmentCombo,
}

impl CourseSelection {
    pub fn to_str(&self) -> &str {
        match self {
            CourseSelection::OneSegment => "ONE SEGMENT",
            CourseSelection::BothSegmentCombo => "BOTH SEGMENT - COMBO",
        }
    }
}

impl FromStr for CourseSelection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ONE SEGMENT" => Ok(CourseSelection::OneSegment),
            "BOTH SEGMENT - COMBO" => Ok(CourseSelection::BothSegmentCombo),
            _ => Err(format!("{} is not a valid course option", value)),
        }
    }
}

impl fmt::Display for CourseSelection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

fn optional_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Gender::from_str(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn optional_course<'de, D>(deserializer: D) -> Result<Option<CourseSelection>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => CourseSelection::from_str(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
