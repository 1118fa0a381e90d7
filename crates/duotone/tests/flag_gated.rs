//! End-to-end tests for the flag-gated strategy.

use duotone::{custom_property_name, process, ColorTable, Error, Options};
use insta::assert_snapshot;

fn colors() -> ColorTable {
    ColorTable::new()
        .group("--G01", "#eee", "#111")
        .color("--C02a", "#f00")
        .color("--C02b", "#0f0")
        .group("--G02", "--C02a", "--C02b")
        .group("--G03", "red", "blue")
}

fn run(css: &str, options: Options) -> String {
    let output = process(css, &options).unwrap();
    assert!(output.warnings.is_empty(), "{:?}", output.warnings);
    output.css
}

#[test]
fn relative_color_with_injected_flags() {
    let input = "a {\n  color: oklch(from var(--G01) l c h / .1);\n}";
    let out = run(input, Options::new(colors()).with_inject_flags(true));
    assert_snapshot!(out, @r#"
html {
  --flag-light: initial;
  --flag-dark:  ;
}
html[data-theme="dark"] {
  --flag-light:  ;
  --flag-dark: initial;
}
a {
  --v1868641404: var(--flag-light, oklch(from #eee l c h / .1)) var(--flag-dark, oklch(from #111 l c h / .1));
  color: var(--v1868641404);
  color: oklch(from var(--G01) l c h / .1);
}
"#);
}

#[test]
fn color_mix_without_flags() {
    let out = run(
        "a { color: color-mix(in srgb, var(--G01), transparent 20%) }",
        Options::new(colors()),
    );
    assert_snapshot!(out, @"a { --v546761730: var(--flag-light, color-mix(in srgb, #eee, transparent 20%)) var(--flag-dark, color-mix(in srgb, #111, transparent 20%)); color: var(--v546761730); color: color-mix(in srgb, var(--G01), transparent 20%) }");
}

#[test]
fn important_stays_out_of_the_gated_value() {
    let out = run(
        "a { color: oklch(from var(--G01) l c h / .1) !important }",
        Options::new(colors()),
    );
    assert_snapshot!(out, @"a { --v1868641404: var(--flag-light, oklch(from #eee l c h / .1)) var(--flag-dark, oklch(from #111 l c h / .1)) !important; color: var(--v1868641404) !important; color: oklch(from var(--G01) l c h / .1) !important }");
}

#[test]
fn important_spelling_is_kept() {
    let out = run(
        "a {\n  color: oklch(from var(--G01) l c h / .1)!IMPORTANT;\n}",
        Options::new(colors()),
    );
    assert!(out.contains("--v1868641404: var(--flag-light, oklch(from #eee l c h / .1)) var(--flag-dark, oklch(from #111 l c h / .1))!IMPORTANT;"));
    assert!(out.contains("color: var(--v1868641404)!IMPORTANT;"));
    assert!(out.ends_with("color: oklch(from var(--G01) l c h / .1)!IMPORTANT;\n}"));
}

#[test]
fn stray_close_bracket_is_rejected() {
    let err = process(
        "a { color: red } color: oklch(from var(--G01) l c h) }",
        &Options::new(colors()),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Sheet(_)));
}

#[test]
fn literal_pair_group() {
    let out = run(
        "a { color: oklch(from var(--G03) l c h / .1) }",
        Options::new(colors()),
    );
    assert!(out.starts_with(
        "a { --v3856771006: var(--flag-light, oklch(from red l c h / .1)) \
         var(--flag-dark, oklch(from blue l c h / .1));"
    ));
}

#[test]
fn alias_group_resolves_one_level() {
    let out = run(
        "a { color: oklch(from var(--G02) l c h) }",
        Options::new(colors()),
    );
    assert!(out.contains(
        "--v749561967: var(--flag-light, oklch(from #f00 l c h)) \
         var(--flag-dark, oklch(from #0f0 l c h));"
    ));
    assert!(out.contains("color: var(--v749561967);"));
}

#[test]
fn three_key_alias_chain_stops_at_second_name() {
    let colors = colors()
        .group("--G05", "--C05", "#000")
        .color("--C05", "--C06")
        .color("--C06", "#abc");
    let out = run("a { color: oklch(from var(--G05) l c h) }", Options::new(colors));
    assert!(out.contains("var(--flag-light, oklch(from --C06 l c h))"));
    assert!(!out.contains("#abc"));
}

#[test]
fn bare_reference_is_untouched() {
    let input = "a { color: var(--G01); border-color: var(--G02) }";
    let out = run(input, Options::new(colors()).with_inject_flags(true));
    assert_eq!(out, input);
}

#[test]
fn unknown_group_is_untouched() {
    let input = "a { color: oklch(from var(--G09) l c h) }";
    let out = run(input, Options::new(colors()).with_inject_flags(true));
    assert_eq!(out, input);
}

#[test]
fn wrong_function_is_untouched() {
    let input = "a {\n  color: oklch(from nonvar(--G01) l c h);\n  background: color-mix(in srgb, cc(--G01), red);\n}\n";
    let out = run(input, Options::new(colors()).with_inject_flags(true));
    assert_eq!(out, input);
}

#[test]
fn custom_flags_and_selectors() {
    let options = Options::new(colors())
        .with_inject_flags(true)
        .with_flags("--is-light", "--is-dark")
        .with_flag_selectors(":where(:root)", ":where(:root.dark)");
    let out = run("a { color: oklch(from var(--G01) l c h / .1) }", options);
    assert!(out.starts_with(
        ":where(:root) {\n  --is-light: initial;\n  --is-dark:  ;\n}\n\
         :where(:root.dark) {\n  --is-light:  ;\n  --is-dark: initial;\n}\na {"
    ));
    assert!(out.contains("var(--is-light, oklch(from #eee l c h / .1)) var(--is-dark, oklch(from #111 l c h / .1))"));
}

#[test]
fn custom_lookup_function() {
    let value = "oklch(from theme(--G01) l c h)";
    let out = run(
        &format!("a {{ color: {value} }}"),
        Options::new(colors()).with_function("theme"),
    );
    let name = custom_property_name(value);
    assert!(out.contains(&format!(
        "{name}: var(--flag-light, oklch(from #eee l c h)) var(--flag-dark, oklch(from #111 l c h));"
    )));
}

#[test]
fn nested_in_media_and_calc() {
    let input = "@media (min-width: 1px) {\n  a {\n    border: 1px solid oklch(from var(--G01) .8 c h);\n    color: oklch(from var(--G01) calc(l * .8) c h);\n  }\n}";
    let out = run(input, Options::new(colors()));
    assert_snapshot!(out, @r"
@media (min-width: 1px) {
  a {
    --v3579442204: var(--flag-light, 1px solid oklch(from #eee .8 c h)) var(--flag-dark, 1px solid oklch(from #111 .8 c h));
    border: var(--v3579442204);
    border: 1px solid oklch(from var(--G01) .8 c h);
    --v3397449538: var(--flag-light, oklch(from #eee calc(l * .8) c h)) var(--flag-dark, oklch(from #111 calc(l * .8) c h));
    color: var(--v3397449538);
    color: oklch(from var(--G01) calc(l * .8) c h);
  }
}
");
}

#[test]
fn repeated_value_reuses_name() {
    let out = run(
        "a { color: oklch(from var(--G01) l c h) } b { color: oklch(from var(--G01) l c h) }",
        Options::new(colors()),
    );
    let name = custom_property_name("oklch(from var(--G01) l c h)");
    assert_eq!(out.matches(&format!("{name}:")).count(), 2);
    assert_eq!(out.matches(&format!("var({name})")).count(), 2);
}

#[test]
fn multiple_groups_in_one_value() {
    let out = run(
        "a { background: color-mix(in oklch, var(--G01), var(--G03) 40%) }",
        Options::new(colors()),
    );
    assert!(out.contains(
        "var(--flag-light, color-mix(in oklch, #eee, red 40%)) \
         var(--flag-dark, color-mix(in oklch, #111, blue 40%))"
    ));
}

#[test]
fn flags_present_only_when_rewritten() {
    let options = Options::new(colors()).with_inject_flags(true);
    let themed = run("a { color: oklch(from var(--G01) l c h) }", options.clone());
    let light = themed.find("html {").unwrap();
    let dark = themed.find("html[data-theme=\"dark\"] {").unwrap();
    assert!(light < dark);
    assert_eq!(themed.matches("--flag-light: initial;").count(), 1);
    assert_eq!(themed.matches("--flag-dark: initial;").count(), 1);

    let plain = run("a { color: red }", options);
    assert!(!plain.contains("--flag-light"));
}

#[test]
fn empty_color_table_matches_nothing() {
    let input = "a { color: oklch(from var(--G01) l c h) }";
    let out = run(input, Options::default().with_inject_flags(true));
    assert_eq!(out, input);
}
