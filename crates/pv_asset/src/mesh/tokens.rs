use std::num;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NumberError {
    #[error("Failed to parse float: {0}")]
    ParseFloat(#[from] num::ParseFloatError),
    #[error("Expected {expected} components, found {found}")]
    MissingComponents { expected: usize, found: usize },
}

/// Splits a line into its directive and the trimmed remainder.
pub(crate) fn split_directive(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((token, value)) => Some((token, value.trim())),
        None => Some((line, "")),
    }
}

/// Names and paths end at the first whitespace.
pub(crate) fn first_token(value: &str) -> &str {
    value.split_whitespace().next().unwrap_or_default()
}

/// Parses the first `N` whitespace separated floats; extra components are ignored.
pub(crate) fn parse_numbers<const N: usize>(value: &str) -> Result<[f32; N], NumberError> {
    let mut numbers = [0.0; N];
    let mut found = 0;
    for (slot, token) in numbers.iter_mut().zip(value.split_whitespace()) {
        *slot = token.parse()?;
        found += 1;
    }

    if found < N {
        return Err(NumberError::MissingComponents { expected: N, found });
    }
    Ok(numbers)
}
