//! Assorted utilities and helpers.

/// Case-fold a symbol for weight lookup and comparison.
///
/// ASCII letters map to upper case. Other symbols map to their single-char
/// upper-case form when one exists and are left unchanged otherwise.
#[inline]
pub fn fold_case(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_uppercase();
    }
    let mut upper = c.to_uppercase();
    if upper.len() == 1 {
        upper.next().unwrap_or(c)
    } else {
        c
    }
}

/// Convert a byte count to mebibytes.
#[inline]
pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_ascii_letters() {
        assert_eq!(fold_case('a'), 'A');
        assert_eq!(fold_case('Z'), 'Z');
        assert_eq!(fold_case('7'), '7');
    }

    #[test]
    fn folds_single_char_unicode() {
        assert_eq!(fold_case('é'), 'É');
        // 'ß' upper-cases to "SS"; keep it as is.
        assert_eq!(fold_case('ß'), 'ß');
    }

    #[test]
    fn mib_conversion() {
        assert_eq!(bytes_to_mib(1024 * 1024), 1.0);
        assert_eq!(bytes_to_mib(0), 0.0);
    }
}
