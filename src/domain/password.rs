use validator::ValidationError;
use zxcvbn::zxcvbn;

const MIN_LENGTH: usize = 8;
const MAX_LENGTH: usize = 128;
const MIN_STRENGTH_SCORE: u8 = 3;
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/~";

fn rule_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Admin account passwords: length bounds, mixed character classes, and a
/// zxcvbn score of at least 3.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let length = password.chars().count();
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(rule_error(
            "password_length",
            format!("Must be between {MIN_LENGTH} and {MAX_LENGTH} characters"),
        ));
    }

    let missing: Vec<&str> = [
        (password.chars().any(char::is_uppercase), "an uppercase letter"),
        (password.chars().any(|c| c.is_ascii_digit()), "a number"),
        (password.chars().any(|c| SYMBOLS.contains(c)), "a symbol"),
    ]
    .into_iter()
    .filter_map(|(present, rule)| (!present).then_some(rule))
    .collect();

    if !missing.is_empty() {
        return Err(rule_error(
            "password_complexity",
            format!("Must include {}", missing.join(", ")),
        ));
    }

    let estimate = zxcvbn(password, &[]);
    if (estimate.score() as u8) < MIN_STRENGTH_SCORE {
        let hint = estimate
            .feedback()
            .and_then(|f| f.warning().map(|w| w.to_string()))
            .unwrap_or_else(|| "Password is too easy to guess".to_string());
        return Err(rule_error("password_strength", hint));
    }

    Ok(())
}
