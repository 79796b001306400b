use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// The resignation details collected by the form.
///
/// Starts out with every field empty and is mutated field-by-field as the user
/// types. The four required fields gate generation; the two free-text fields
/// never do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResignationRequest {
    pub full_name: String,
    pub job_title: String,
    pub company_name: String,
    /// `None` is the valid "not picked yet" state.
    pub last_working_day: Option<NaiveDate>,
    pub reason_for_resignation: String,
    pub additional_message: String,
}

/// The fields that must be filled in before a letter can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RequiredField {
    FullName,
    JobTitle,
    CompanyName,
    LastWorkingDay,
}

impl RequiredField {
    /// Form label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            RequiredField::FullName => "Full Name",
            RequiredField::JobTitle => "Job Title",
            RequiredField::CompanyName => "Company Name",
            RequiredField::LastWorkingDay => "Last Working Day",
        }
    }
}

impl ResignationRequest {
    /// Returns the required fields that are still empty, in form order.
    /// Whitespace-only text counts as empty.
    pub fn missing_required_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push(RequiredField::FullName);
        }
        if self.job_title.trim().is_empty() {
            missing.push(RequiredField::JobTitle);
        }
        if self.company_name.trim().is_empty() {
            missing.push(RequiredField::CompanyName);
        }
        if self.last_working_day.is_none() {
            missing.push(RequiredField::LastWorkingDay);
        }
        missing
    }

    /// Applies a partial update. Fields absent from the patch are left untouched.
    pub fn apply(&mut self, patch: FormPatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(job_title) = patch.job_title {
            self.job_title = job_title;
        }
        if let Some(company_name) = patch.company_name {
            self.company_name = company_name;
        }
        if let Some(last_working_day) = patch.last_working_day {
            self.last_working_day = last_working_day;
        }
        if let Some(reason) = patch.reason_for_resignation {
            self.reason_for_resignation = reason;
        }
        if let Some(message) = patch.additional_message {
            self.additional_message = message;
        }
    }
}

/// A field-by-field form change as sent by the browser.
///
/// `lastWorkingDay` distinguishes "absent" (leave as is) from an explicit
/// `null` (clear the picked date).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPatch {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub last_working_day: Option<Option<NaiveDate>>,
    pub reason_for_resignation: Option<String>,
    pub additional_message: Option<String>,
}

fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// The user's Gemini API key. Lives only in session memory.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// True when the key is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The raw key, for placing on the outbound request only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}
