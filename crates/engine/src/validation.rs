//! Input checks applied at the edge.
//!
//! Validation failures never reach the lifecycle engine: callers run these
//! before composing a request.

use crate::{EngineError, ResultEngine};

/// Trims `value` and rejects empty input.
pub fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Password policy: minimum 8 characters mixing letters, digits and at
/// least one special character.
pub fn validate_password(password: &str) -> ResultEngine<()> {
    if password.chars().count() < 8 {
        return Err(EngineError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());
    if !(has_letter && has_digit && has_special) {
        return Err(EngineError::Validation(
            "password must contain a letter, a digit and a special character".to_string(),
        ));
    }
    Ok(())
}

/// National phone format: `+7` or `8` followed by exactly ten digits.
pub fn validate_phone(phone: &str) -> ResultEngine<()> {
    let digits = phone
        .strip_prefix("+7")
        .or_else(|| phone.strip_prefix('8'));
    match digits {
        Some(rest) if rest.len() == 10 && rest.chars().all(|c| c.is_ascii_digit()) => Ok(()),
        _ => Err(EngineError::Validation(
            "phone must be +7 or 8 followed by ten digits".to_string(),
        )),
    }
}

/// Tax id (INN): 10 to 12 digits.
pub fn validate_inn(inn: &str) -> ResultEngine<()> {
    if (10..=12).contains(&inn.len()) && inn.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(EngineError::Validation(
            "inn must be 10 to 12 digits".to_string(),
        ))
    }
}

/// Minimal shape check for an email address.
pub fn validate_email(email: &str) -> ResultEngine<()> {
    let invalid = || EngineError::Validation("invalid email address".to_string());
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims() {
        assert_eq!(
            normalize_required_text("  Main st. 1 ", "address").unwrap(),
            "Main st. 1"
        );
        assert!(normalize_required_text(" ", "address").is_err());
    }

    #[test]
    fn password_policy() {
        assert!(validate_password("Passw0rd!").is_ok());
        assert!(validate_password("short1!").is_err());
        assert!(validate_password("NoDigits!").is_err());
        assert!(validate_password("nospecial1").is_err());
        assert!(validate_password("12345678!").is_err());
    }

    #[test]
    fn phone_format() {
        assert!(validate_phone("+79161234567").is_ok());
        assert!(validate_phone("89161234567").is_ok());
        assert!(validate_phone("+7916123456").is_err());
        assert!(validate_phone("+791612345678").is_err());
        assert!(validate_phone("+3916123456 7").is_err());
        assert!(validate_phone("8916123456a").is_err());
    }

    #[test]
    fn inn_format() {
        assert!(validate_inn("7701234567").is_ok());
        assert!(validate_inn("770123456789").is_ok());
        assert!(validate_inn("770123456").is_err());
        assert!(validate_inn("7701234567890").is_err());
        assert!(validate_inn("77012345ab").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodomain").is_err());
        assert!(validate_email("plainaddress").is_err());
    }
}
