use std::borrow::Cow;

/// Geometry-source spellings mapped to the spelling the case API uses.
pub const KNOWN_ALIASES: [(&str, &str); 8] = [
    ("Bangkok Metropolis", "Bangkok"),
    ("Chon Buri", "Chonburi"),
    ("Buri Ram", "Buriram"),
    ("Lop Buri", "Lopburi"),
    ("Prachin Buri", "Prachinburi"),
    ("Phangnga", "Phang Nga"),
    ("Nong Bua Lam Phu", "Nong Bua Lamphu"),
    ("Si Sa Ket", "Sisaket"),
];

/// Canonical spelling of a province name. Unknown names are returned as-is.
pub fn normalize_province(name: &str) -> Cow<'_, str> {
    KNOWN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| Cow::Borrowed(*canonical))
        .unwrap_or(Cow::Borrowed(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_aliases_are_corrected() {
        assert_eq!(normalize_province("Bangkok Metropolis"), "Bangkok");
        assert_eq!(normalize_province("Chon Buri"), "Chonburi");
        for (alias, canonical) in KNOWN_ALIASES {
            assert_eq!(normalize_province(alias), canonical);
        }
    }

    #[test]
    fn test_unlisted_names_pass_through() {
        for name in ["Chiang Mai", "Phuket", "", "bangkok metropolis", "Chonburi"] {
            assert_eq!(normalize_province(name), name);
        }
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for (alias, _) in KNOWN_ALIASES {
            let once = normalize_province(alias).into_owned();
            assert_eq!(normalize_province(&once), once);
        }
    }
}
