//! Stable names for generated custom properties.
//!
//! The name depends only on the original declaration value, so the same value
//! always maps to the same property, in any document. Distinct values may
//! collide; collisions are not detected.

/// djb2 over the UTF-16 code units of `value`, modulo 2^32.
pub fn value_hash(value: &str) -> u32 {
    value.encode_utf16().fold(5381u32, |hash, unit| {
        (hash << 5).wrapping_add(hash).wrapping_add(u32::from(unit))
    })
}

/// `--v<hash>` for `value`.
///
/// ```rust
/// assert_eq!(
///     duotone::custom_property_name("oklch(from var(--G01) l c h / .1)"),
///     "--v1868641404"
/// );
/// ```
pub fn custom_property_name(value: &str) -> String {
    format!("--v{}", value_hash(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_and_single_char() {
        assert_eq!(value_hash(""), 5381);
        assert_eq!(value_hash("a"), 177670);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(value_hash("oklch(from var(--G01) l c h / .1)"), 1868641404);
        assert_eq!(
            value_hash("color-mix(in srgb, var(--G01), transparent 20%)"),
            546761730
        );
        assert_eq!(value_hash("oklch(from var(--G03) l c h / .1)"), 3856771006);
    }

    #[test]
    fn test_same_value_same_name() {
        let v = "1px solid oklch(from var(--G01) .8 c h)";
        assert_eq!(custom_property_name(v), custom_property_name(v));
        assert_eq!(custom_property_name(v), "--v3579442204");
    }

    #[test]
    fn test_distinct_values_distinct_names() {
        let corpus = [
            "oklch(from var(--G01) l c h / .1)",
            "oklch(from var(--G02) l c h / .1)",
            "oklch(from var(--G03) l c h / .1)",
            "color-mix(in srgb, var(--G01), transparent 20%)",
            "oklch(from var(--G01) calc(l * .8) c h)",
        ];
        let mut names: Vec<_> = corpus.iter().map(|v| custom_property_name(v)).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), corpus.len());
    }

    #[test]
    fn test_hashes_utf16_units() {
        // U+1F600 is a surrogate pair: two units, not one char or four bytes.
        let expected = [0xD83Du32, 0xDE00]
            .iter()
            .fold(5381u32, |h, u| (h << 5).wrapping_add(h).wrapping_add(*u));
        assert_eq!(value_hash("\u{1F600}"), expected);
    }
}
