//! Spreadsheet-style cell labels (`A1`, `C4`, `AB12`).
//!
//! Columns use bijective base-26 letters: `A` is column 0, `Z` is 25, `AA` is 26.
//! Rows are 1-based numbers. Labels are case-insensitive.
use crate::common::error::{ProbeError, Result};

/// Zero-based column index of a column label.
///
/// # Examples
///
/// ```
/// use pptx_probe::coords::cell::column_index;
///
/// assert_eq!(column_index("A").unwrap(), 0);
/// assert_eq!(column_index("z").unwrap(), 25);
/// assert_eq!(column_index("AA").unwrap(), 26);
/// ```
pub fn column_index(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(ProbeError::InvalidCoordinateSpec(
            "empty column label".to_string(),
        ));
    }

    let mut value: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(ProbeError::InvalidCoordinateSpec(format!(
                "invalid column label '{}'",
                letters
            )));
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        value = value
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| {
                ProbeError::InvalidCoordinateSpec(format!("column label '{}' too large", letters))
            })?;
    }

    Ok(value - 1)
}

/// Column label of a zero-based column index.
pub fn column_label(index: u32) -> String {
    let mut n = index as u64 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Split a label such as `"C4"` into its upper-cased column letters and row.
pub fn parse_cell_label(label: &str) -> Result<(String, u32)> {
    let label = label.trim();
    let split = label
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(label.len());
    let (letters, digits) = label.split_at(split);

    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProbeError::InvalidCoordinateSpec(format!(
            "invalid cell label '{}'",
            label
        )));
    }

    let row = atoi_simd::parse::<u32, false, false>(digits.as_bytes()).map_err(|_| {
        ProbeError::InvalidCoordinateSpec(format!("invalid row in cell label '{}'", label))
    })?;
    column_index(letters)?;

    Ok((letters.to_ascii_uppercase(), row))
}

/// Whether `s` has the shape of a cell label (letters then digits).
pub(crate) fn looks_like_cell_label(s: &str) -> bool {
    let split = s.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(s.len());
    split > 0 && split < s.len() && s[split..].bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("L").unwrap(), 11);
        assert_eq!(column_index("Z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("AZ").unwrap(), 51);
        assert_eq!(column_index("ba").unwrap(), 52);
        assert!(column_index("").is_err());
        assert!(column_index("A1").is_err());
    }

    #[test]
    fn test_column_label() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
        for i in 0..1000 {
            assert_eq!(column_index(&column_label(i)).unwrap(), i);
        }
    }

    #[test]
    fn test_parse_cell_label() {
        assert_eq!(parse_cell_label("C4").unwrap(), ("C".to_string(), 4));
        assert_eq!(parse_cell_label("ab12").unwrap(), ("AB".to_string(), 12));
        assert!(parse_cell_label("C").is_err());
        assert!(parse_cell_label("4").is_err());
        assert!(parse_cell_label("C4x").is_err());
    }

    #[test]
    fn test_looks_like_cell_label() {
        assert!(looks_like_cell_label("C4"));
        assert!(!looks_like_cell_label("center"));
        assert!(!looks_like_cell_label("12"));
        assert!(!looks_like_cell_label("C4%"));
    }
}
