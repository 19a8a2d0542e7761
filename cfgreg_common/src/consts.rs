//! Workspace-wide constants.
//!
//! Single source of truth for section naming and value spellings.
//! Imported by every provider — no duplication permitted.

/// Section used when an item declares an empty section name.
///
/// Must be lowercase: section names are folded before every lookup.
pub const DEFAULT_SECTION: &str = "default";

/// Permission bits for configuration files created on first run.
///
/// Applied on unix only and still subject to the process umask.
pub const DEFAULT_FILE_MODE: u32 = 0o666;

/// Accepted boolean spellings, matched case-insensitively.
pub const BOOL_STRINGS: [(&str, bool); 12] = [
    ("t", true),
    ("true", true),
    ("y", true),
    ("yes", true),
    ("on", true),
    ("1", true),
    ("f", false),
    ("false", false),
    ("n", false),
    ("no", false),
    ("off", false),
    ("0", false),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_section_is_lowercase() {
        assert_eq!(DEFAULT_SECTION, DEFAULT_SECTION.to_lowercase());
        assert!(!DEFAULT_SECTION.is_empty());
    }

    #[test]
    fn bool_strings_are_lowercase_and_unique() {
        for (i, (a, _)) in BOOL_STRINGS.iter().enumerate() {
            assert_eq!(*a, a.to_lowercase());
            assert!(
                BOOL_STRINGS[i + 1..].iter().all(|(b, _)| a != b),
                "duplicate spelling {a}"
            );
        }
    }

    #[test]
    fn bool_strings_are_balanced() {
        let trues = BOOL_STRINGS.iter().filter(|(_, v)| *v).count();
        assert_eq!(trues * 2, BOOL_STRINGS.len());
    }
}
