//! Reserved function and constant names built into the system.
//!
//! User-declared symbols (input, output, assumed constants, assumed function
//! outputs) may not shadow any name listed here.

/// Reserved function names, longest first.
///
/// The normalizer scans the definition string for these names in order, so
/// longer names must come before any name they contain as a substring.
pub const RESERVED_FUNCTIONS: &[&str] = &["sqrt", "exp", "sin", "cos", "tan", "log", "ln"];

/// Reserved constant names
pub const RESERVED_CONSTANTS: &[&str] = &["pi", "e", "i"];

/// Check whether a name is a reserved function
pub fn is_reserved_function(name: &str) -> bool {
    RESERVED_FUNCTIONS.contains(&name)
}

/// Check whether a name is a reserved constant
pub fn is_reserved_constant(name: &str) -> bool {
    RESERVED_CONSTANTS.contains(&name)
}

/// Check whether a name is reserved in any capacity
pub fn is_reserved(name: &str) -> bool {
    is_reserved_function(name) || is_reserved_constant(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_lookup() {
        assert!(is_reserved_function("sin"));
        assert!(is_reserved_function("ln"));
        assert!(!is_reserved_function("pi"));
        assert!(is_reserved_constant("pi"));
        assert!(is_reserved_constant("e"));
        assert!(!is_reserved_constant("x"));
        assert!(is_reserved("sqrt"));
        assert!(!is_reserved("y"));
    }

    #[test]
    fn test_function_names_ordered_longest_first() {
        for window in RESERVED_FUNCTIONS.windows(2) {
            assert!(
                window[0].len() >= window[1].len(),
                "'{}' must not precede '{}'",
                window[1],
                window[0]
            );
        }
    }
}
