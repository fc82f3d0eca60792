//! Month labels as they appear in the data (English and Spanish, full or
//! abbreviated) mapped to their ordinal.

/// Ordinal of a month label in `1..=12`, or `0` when the label is missing or
/// not recognised.
///
/// Matching ignores case and surrounding whitespace.
pub fn month_index(label: Option<&str>) -> u8 {
    let Some(label) = label else {
        return 0;
    };
    let normalized = label.trim().to_lowercase();
    match normalized.as_str() {
        "jan" | "january" | "ene" | "enero" => 1,
        "feb" | "february" | "febrero" => 2,
        "mar" | "march" | "marzo" => 3,
        "apr" | "april" | "abr" | "abril" => 4,
        "may" | "mayo" => 5,
        "jun" | "june" | "junio" => 6,
        "jul" | "july" | "julio" => 7,
        "aug" | "august" | "ago" | "agosto" => 8,
        "sep" | "sept" | "september" | "septiembre" | "setiembre" => 9,
        "oct" | "october" | "octubre" => 10,
        "nov" | "november" | "noviembre" => 11,
        "dec" | "december" | "dic" | "diciembre" => 12,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::month_index;

    #[test]
    fn spanish_abbreviations_differ_from_english() {
        assert_eq!(month_index(Some("ene")), 1);
        assert_eq!(month_index(Some("ago")), 8);
        assert_eq!(month_index(Some("dic")), 12);
        assert_eq!(month_index(Some("abr")), 4);
    }

    #[test]
    fn whitespace_only_is_unknown() {
        assert_eq!(month_index(Some("   ")), 0);
    }
}
