//! # Terminal Input
//!
//! Prompt helpers over stdin. Bad input never aborts a flow: numeric and
//! money prompts re-ask until the line parses, and end-of-input surfaces
//! as an io error so the menu loop can wind down instead of spinning.

use std::io::{self, Write};
use std::str::FromStr;

use kirana_core::Money;

/// Prints `prompt` (no newline) and reads one trimmed line from stdin.
///
/// Returns `UnexpectedEof` when stdin is closed.
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut buf = String::new();
    let bytes = io::stdin().read_line(&mut buf)?;
    if bytes == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
    }

    Ok(buf.trim().to_string())
}

/// Prompts until the input parses as `T`.
pub fn prompt_parsed<T: FromStr>(prompt: &str) -> io::Result<T> {
    loop {
        match read_line(prompt)?.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Invalid input. Please try again."),
        }
    }
}

/// Prompts until the input parses as an amount ("12", "12.50").
pub fn prompt_money(prompt: &str) -> io::Result<Money> {
    loop {
        match read_line(prompt)?.parse::<Money>() {
            Ok(amount) => return Ok(amount),
            Err(err) => println!("{}. Please try again.", err),
        }
    }
}

/// Prompts for a payment mode ("Cash"/"Card").
///
/// Normalized like the receipts expect: first letter uppercased, the rest
/// lowercased. An empty line means no payment mode was given.
pub fn prompt_payment_mode(prompt: &str) -> io::Result<Option<String>> {
    let raw = read_line(prompt)?;
    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(capitalize(&raw)))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("cash"), "Cash");
        assert_eq!(capitalize("CARD"), "Card");
        assert_eq!(capitalize("uPi"), "Upi");
        assert_eq!(capitalize("x"), "X");
    }
}
