//! The `domains` cell micro-format.
//!
//! A single spreadsheet cell may list several domain names separated by
//! commas: `"example.com, www.example.com"`.

/// Separator between domain names in one cell.
pub const DOMAIN_SEPARATOR: char = ',';

/// Split a `domains` cell: split on commas, trim whitespace, drop empties.
///
/// Order is preserved; duplicates are kept so the caller sees exactly what
/// the operator typed.
pub fn split_domains(cell: &str) -> Vec<&str> {
    cell.split(DOMAIN_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_in_order() {
        assert_eq!(split_domains("a.com,b.com"), vec!["a.com", "b.com"]);
        assert_eq!(
            split_domains("  b.com ,a.com,  c.org"),
            vec!["b.com", "a.com", "c.org"]
        );
    }

    #[test]
    fn drops_empty_segments() {
        assert!(split_domains("").is_empty());
        assert!(split_domains(" , ,").is_empty());
        assert_eq!(split_domains("a.com,,b.com,"), vec!["a.com", "b.com"]);
    }

    #[test]
    fn single_domain_without_separator() {
        assert_eq!(split_domains("example.com"), vec!["example.com"]);
    }
}
