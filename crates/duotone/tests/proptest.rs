//! Property-based tests for the transform using proptest.

use duotone::{
    custom_property_name, process, value_hash, ColorTable, Nesting, Options, ReferencePattern,
    Renderer, Strategy as OutputStrategy, Theme,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn colors() -> ColorTable {
    ColorTable::new()
        .group("--G01", "#eee", "#111")
        .color("--C02a", "#f00")
        .color("--C02b", "#0f0")
        .group("--G02", "--C02a", "--C02b")
        .group("--G03", "red", "blue")
}

fn renderer() -> Renderer {
    let table = colors();
    let pattern = ReferencePattern::constrained("var", table.group_names()).unwrap();
    Renderer::new(table, pattern)
}

fn theme() -> impl Strategy<Value = Theme> {
    prop_oneof![Just(Theme::Light), Just(Theme::Dark)]
}

/// Values mixing known and unknown references with plain tokens.
fn value() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("var(--G01)".to_string()),
            Just("var(--G02)".to_string()),
            Just("var(--G09)".to_string()),
            Just("oklch(from".to_string()),
            Just("color-mix(in srgb,".to_string()),
            "[a-z]{1,6}",
            "[0-9]{1,3}%",
        ],
        1..6,
    )
    .prop_map(|parts| parts.join(" "))
}

/// Values that never contain a `var(` call.
fn plain_value() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,6}",
            "#[0-9a-f]{3}",
            "[0-9]{1,3}px",
            Just("oklch(from red l c h)".to_string()),
            Just("cc(--G01)".to_string()),
        ],
        1..4,
    )
    .prop_map(|parts| parts.join(" "))
}

/// Balanced declaration values, some referencing groups inside advanced
/// colors.
fn declaration_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("oklch(from var(--G01) l c h / .1)".to_string()),
        Just("color-mix(in srgb, var(--G02), transparent 20%)".to_string()),
        Just("oklch(from var(--G09) l c h)".to_string()),
        Just("var(--G03)".to_string()),
        plain_value(),
    ]
}

fn document(values: Vec<String>) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("r{i} {{\n  color: {v};\n}}\n"))
        .collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Rendering twice gives the same text.
    #[test]
    fn render_is_deterministic(value in value(), theme in theme()) {
        let r = renderer();
        prop_assert_eq!(r.render(theme, &value), r.render(theme, &value));
    }

    /// Values without references render unchanged for both themes.
    #[test]
    fn render_passes_through_unmatched(value in plain_value(), theme in theme()) {
        prop_assert_eq!(renderer().render(theme, &value), value.clone());
    }

    /// Rendering leaves no known reference behind.
    #[test]
    fn render_resolves_known_groups(value in value(), theme in theme()) {
        let out = renderer().render(theme, &value);
        prop_assert!(!out.contains("var(--G01)"));
        prop_assert!(!out.contains("var(--G02)"));
        prop_assert_eq!(out.matches("var(--G09)").count(), value.matches("var(--G09)").count());
    }

    /// Names are a pure function of the value.
    #[test]
    fn name_is_stable(value in ".{0,40}") {
        prop_assert_eq!(custom_property_name(&value), format!("--v{}", value_hash(&value)));
    }

    /// Documents without references come back byte-identical under any
    /// strategy, with or without flag injection.
    #[test]
    fn unreferenced_documents_are_untouched(
        values in prop::collection::vec(plain_value(), 0..5),
        inject in any::<bool>(),
        dark_rule in any::<bool>(),
    ) {
        let css = document(values);
        let strategy = if dark_rule { OutputStrategy::DarkRule } else { OutputStrategy::FlagGated };
        let options = Options::new(colors())
            .with_strategy(strategy)
            .with_function("var")
            .with_nesting(Nesting::NestedRule)
            .with_inject_flags(inject);
        let output = process(&css, &options).unwrap();
        prop_assert_eq!(output.css, css);
        prop_assert!(output.warnings.is_empty());
    }

    /// The flag rules appear as a complete pair, light first, exactly when a
    /// declaration was rewritten.
    #[test]
    fn flag_pair_is_all_or_nothing(
        values in prop::collection::vec(declaration_value(), 0..5),
    ) {
        let css = document(values);
        let options = Options::new(colors()).with_inject_flags(true);
        let out = process(&css, &options).unwrap().css;

        let rewrites = out.matches(": var(--v").count();
        let light = out.find("html {\n  --flag-light: initial;\n  --flag-dark:  ;\n}");
        let dark = out.find("html[data-theme=\"dark\"] {\n  --flag-light:  ;\n  --flag-dark: initial;\n}");

        if rewrites > 0 {
            prop_assert_eq!(light, Some(0));
            prop_assert!(dark.is_some_and(|d| d > 0));
        } else {
            prop_assert!(light.is_none());
            prop_assert!(dark.is_none());
            prop_assert_eq!(out, css);
        }
    }
}
