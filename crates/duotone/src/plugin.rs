//! The `duotone` plugin.

use duotone_sheet::{Helpers, NodeId, Plugin};

use crate::error::Result;
use crate::flags::DocumentState;
use crate::options::{Nesting, Options, Strategy};
use crate::pattern::ReferencePattern;
use crate::render::Renderer;
use crate::strategy::{self, Outcome};

/// Rewrites color-group references so one style sheet serves both themes.
///
/// The reference pattern is compiled once in [`ThemeColors::new`]. The plugin
/// can then process any number of documents; per-document state is reset at
/// the start and end of each pass.
///
/// # Example
///
/// ```rust
/// use duotone::{ColorTable, Options, ThemeColors};
/// use duotone_sheet::Processor;
///
/// let colors = ColorTable::new().group("--G01", "#eee", "#111");
/// let plugin = ThemeColors::new(Options::new(colors)).unwrap();
///
/// let output = Processor::new()
///     .with(plugin)
///     .process("a { color: color-mix(in srgb, var(--G01), red) }")
///     .unwrap();
/// assert!(output.css.contains("var(--flag-light, color-mix(in srgb, #eee, red))"));
/// ```
#[derive(Debug)]
pub struct ThemeColors {
    renderer: Renderer,
    strategy: Strategy,
    flags: [String; 2],
    inject_flags: bool,
    flag_selectors: [String; 2],
    dark_selector: String,
    nesting: Nesting,
    state: DocumentState,
}

impl ThemeColors {
    /// Name reported in warnings.
    pub const NAME: &'static str = "duotone";

    /// Builds the plugin, compiling the reference pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`](crate::Error::Pattern) if the lookup function
    /// and group names do not form a valid expression.
    pub fn new(options: Options) -> Result<Self> {
        let function = options.function_name().to_string();
        let pattern = match options.strategy {
            Strategy::FlagGated => {
                ReferencePattern::constrained(&function, options.colors.group_names())?
            }
            Strategy::DarkRule => ReferencePattern::unconstrained(&function)?,
        };
        tracing::debug!(
            strategy = %options.strategy,
            %function,
            groups = options.colors.group_names().count(),
            "compiled reference pattern"
        );

        let Options {
            colors,
            strategy,
            flags,
            inject_flags,
            flag_selectors,
            dark_selector,
            nesting,
            custom_properties,
            ..
        } = options;

        Ok(Self {
            renderer: Renderer::new(colors, pattern).with_custom_properties(custom_properties),
            strategy,
            flags,
            inject_flags,
            flag_selectors,
            dark_selector,
            nesting,
            state: DocumentState::default(),
        })
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Flags are only injected for the flag-gated strategy.
    fn injects_flags(&self) -> bool {
        self.inject_flags && self.strategy == Strategy::FlagGated
    }
}

impl Plugin for ThemeColors {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn once(&mut self, helpers: &mut Helpers<'_>) {
        self.state.reset();
        if self.injects_flags() {
            self.state.stage(helpers, &self.flags, &self.flag_selectors);
        }
    }

    fn declaration(&mut self, decl: NodeId, helpers: &mut Helpers<'_>) {
        let outcome = match self.strategy {
            Strategy::FlagGated => strategy::flag_gated(&self.renderer, &self.flags, decl, helpers),
            Strategy::DarkRule => strategy::dark_rule(
                &self.renderer,
                &self.dark_selector,
                self.nesting,
                decl,
                helpers,
            ),
        };
        if outcome == Outcome::Rewritten {
            self.state.rewritten = true;
        }
    }

    fn once_exit(&mut self, helpers: &mut Helpers<'_>) {
        self.state.finish(helpers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColorTable;
    use duotone_sheet::Processor;

    fn colors() -> ColorTable {
        ColorTable::new()
            .group("--G01", "#eee", "#111")
            .color("--C02a", "#f00")
            .color("--C02b", "#0f0")
            .group("--G02", "--C02a", "--C02b")
    }

    #[test]
    fn test_function_name_is_escaped() {
        let plugin = ThemeColors::new(
            Options::new(colors())
                .with_strategy(Strategy::DarkRule)
                .with_function("c+c"),
        )
        .unwrap();
        assert!(plugin.renderer().has_reference("c+c(G01)"));
        assert!(!plugin.renderer().has_reference("ccc(G01)"));
    }

    #[test]
    fn test_state_does_not_leak_between_documents() {
        let plugin = ThemeColors::new(Options::new(colors()).with_inject_flags(true)).unwrap();
        let mut processor = Processor::new().with(plugin);

        let themed = processor
            .process("a { color: oklch(from var(--G01) l c h) }")
            .unwrap();
        assert!(themed.css.starts_with("html {"));

        let plain = processor.process("a { color: red }").unwrap();
        assert_eq!(plain.css, "a { color: red }");
    }

    #[test]
    fn test_no_flags_under_dark_rule() {
        let options = Options::new(ColorTable::new().group("G01", "#eee", "#111"))
            .with_strategy(Strategy::DarkRule)
            .with_nesting(Nesting::NestedRule)
            .with_inject_flags(true);
        let mut processor = Processor::new().with(ThemeColors::new(options).unwrap());
        let output = processor.process("a { color: cc(G01) }").unwrap();
        assert!(!output.css.contains("--flag-light"));
    }

    #[test]
    fn test_strategy_accessor() {
        let plugin = ThemeColors::new(Options::default()).unwrap();
        assert_eq!(plugin.strategy(), Strategy::FlagGated);
        assert_eq!(plugin.name(), "duotone");
    }
}
