// Prompt text for letter generation.
// Deterministic: the same validated request always yields the same bytes.

use crate::generation::validator::ValidatedRequest;

/// Long month/day/year, e.g. "June 05, 2025".
const LAST_DAY_FORMAT: &str = "%B %d, %Y";

/// Letter generation prompt template. Replace `{details}` before sending.
pub const LETTER_PROMPT_TEMPLATE: &str = r#"Generate a professional resignation letter with the following details:

{details}

Please create a formal, professional resignation letter that:
1. Follows proper business letter format
2. Is polite and professional in tone
3. Clearly states the resignation and last working day
4. Expresses gratitude for opportunities
5. Offers to help with transition
6. Is approximately 200-300 words

Format the letter properly with date, recipient, body paragraphs, and signature block."#;

/// Renders the form into the instruction sent to Gemini.
///
/// Optional lines appear only when the field has content; an empty reason or
/// message leaves no trace in the prompt.
pub fn build_letter_prompt(validated: &ValidatedRequest<'_>) -> String {
    let request = validated.request;

    let mut details = vec![
        format!("Full Name: {}", request.full_name.trim()),
        format!("Job Title: {}", request.job_title.trim()),
        format!("Company Name: {}", request.company_name.trim()),
        format!(
            "Last Working Day: {}",
            validated.last_working_day.format(LAST_DAY_FORMAT)
        ),
    ];

    if let Some(reason) = non_empty(&request.reason_for_resignation) {
        details.push(format!("Reason for Resignation: {reason}"));
    }
    if let Some(message) = non_empty(&request.additional_message) {
        details.push(format!("Additional Message: {message}"));
    }

    LETTER_PROMPT_TEMPLATE.replace("{details}", &details.join("\n"))
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::validator::validate;
    use crate::models::resignation::{Credential, ResignationRequest};
    use chrono::NaiveDate;

    fn request(reason: &str, message: &str) -> ResignationRequest {
        ResignationRequest {
            full_name: "Alex Chen".to_string(),
            job_title: "Engineer".to_string(),
            company_name: "Acme Corp".to_string(),
            last_working_day: NaiveDate::from_ymd_opt(2025, 6, 5),
            reason_for_resignation: reason.to_string(),
            additional_message: message.to_string(),
        }
    }

    fn prompt_for(request: &ResignationRequest) -> String {
        let validated = validate(request, &Credential::new("key")).unwrap();
        build_letter_prompt(&validated)
    }

    #[test]
    fn test_prompt_contains_required_details() {
        let prompt = prompt_for(&request("", ""));
        assert!(prompt.contains("Full Name: Alex Chen\n"));
        assert!(prompt.contains("Job Title: Engineer\n"));
        assert!(prompt.contains("Company Name: Acme Corp\n"));
        assert!(prompt.contains("Last Working Day: June 05, 2025"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let r = request("New role", "Thanks for everything");
        assert_eq!(prompt_for(&r), prompt_for(&r));
    }

    #[test]
    fn test_optional_lines_omitted_when_empty() {
        let prompt = prompt_for(&request("", "   "));
        assert!(!prompt.contains("Reason for Resignation"));
        assert!(!prompt.contains("Additional Message"));
        // No blank placeholder lines between the details and the instructions.
        assert!(prompt.contains("Last Working Day: June 05, 2025\n\nPlease create"));
    }

    #[test]
    fn test_optional_lines_present_when_filled() {
        let prompt = prompt_for(&request("Relocating", "Happy to train my replacement"));
        assert!(prompt.contains(
            "Last Working Day: June 05, 2025\nReason for Resignation: Relocating\nAdditional Message: Happy to train my replacement\n\n"
        ));
    }

    #[test]
    fn test_reason_without_message() {
        let prompt = prompt_for(&request("Relocating", ""));
        assert!(prompt.contains("Reason for Resignation: Relocating\n\nPlease create"));
        assert!(!prompt.contains("Additional Message"));
    }

    #[test]
    fn test_prompt_states_letter_requirements() {
        let prompt = prompt_for(&request("", ""));
        for needle in [
            "business letter format",
            "professional in tone",
            "resignation and last working day",
            "gratitude",
            "help with transition",
            "200-300 words",
            "date, recipient, body paragraphs, and signature block",
        ] {
            assert!(prompt.contains(needle), "prompt missing {needle:?}");
        }
    }
}
