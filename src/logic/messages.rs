//! Display vocabulary passed through the caller's localizer

pub const ALWAYS: &str = "ALWAYS";
pub const OR: &str = "OR";
pub const IF: &str = "IF";
pub const NOT: &str = "NOT";
pub const NO: &str = "NO";
pub const NOT_PREVIOUSLY_DIVERTED: &str = "not previously diverted";
pub const IS_NOT_CAPTURED: &str = "IS NOT CAPTURED";
pub const IS_CAPTURED: &str = "IS CAPTURED";

/// Translation hook for display strings
pub type Localize<'a> = &'a dyn Fn(&str) -> String;

/// Apply `localize`, or return `message` unchanged when there is none
pub fn localized(localize: Option<Localize<'_>>, message: &str) -> String {
    match localize {
        Some(f) => f(message),
        None => message.to_string(),
    }
}
