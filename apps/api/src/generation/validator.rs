//! Pre-flight checks that gate every generation attempt.

use chrono::NaiveDate;

use crate::generation::GenerationError;
use crate::models::resignation::{Credential, ResignationRequest};

/// A request that has passed validation. Carries the picked date unwrapped so
/// the prompt builder never has to handle the "unset" case.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRequest<'a> {
    pub request: &'a ResignationRequest,
    pub last_working_day: NaiveDate,
}

/// Credential first, then required fields. Optional fields never block.
pub fn validate<'a>(
    request: &'a ResignationRequest,
    credential: &Credential,
) -> Result<ValidatedRequest<'a>, GenerationError> {
    if credential.is_blank() {
        return Err(GenerationError::MissingCredential);
    }

    let missing = request.missing_required_fields();
    match request.last_working_day {
        Some(last_working_day) if missing.is_empty() => Ok(ValidatedRequest {
            request,
            last_working_day,
        }),
        _ => Err(GenerationError::MissingRequiredField(missing)),
    }
}
