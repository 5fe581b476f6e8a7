//! Line-oriented input helpers for the menu shell.
//!
//! Reading and parsing are split so the parsers stay pure and testable.

use std::io::{self, BufRead, Write};

/// Prints `label`, flushes, and reads one trimmed line from stdin.
///
/// Returns `Ok(None)` on EOF so menu loops can exit cleanly.
pub fn read_line(label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Parses a numbered menu choice.
pub fn parse_choice(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

/// Parses a 1-based selection against a list of `len` rows, returning the
/// 0-based index.
pub fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let picked: usize = input.trim().parse().ok()?;
    if picked == 0 || picked > len {
        return None;
    }
    Some(picked - 1)
}

/// Parses a salary input as a plain decimal number.
///
/// Positivity is checked by core validation; this only covers parseability.
pub fn parse_salary(input: &str) -> Option<f64> {
    input.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_choice, parse_salary, parse_selection};

    #[test]
    fn parse_choice_accepts_padded_integers() {
        assert_eq!(parse_choice(" 3 "), Some(3));
        assert_eq!(parse_choice("x"), None);
        assert_eq!(parse_choice(""), None);
    }

    #[test]
    fn parse_selection_is_one_based_and_bounded() {
        assert_eq!(parse_selection("1", 3), Some(0));
        assert_eq!(parse_selection("3", 3), Some(2));
        assert_eq!(parse_selection("0", 3), None);
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("abc", 3), None);
    }

    #[test]
    fn parse_salary_accepts_decimals_and_rejects_text() {
        assert_eq!(parse_salary("50000"), Some(50_000.0));
        assert_eq!(parse_salary(" 1234.56 "), Some(1234.56));
        assert_eq!(parse_salary("lots"), None);
    }
}
