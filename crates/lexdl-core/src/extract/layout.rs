//! Fixed selection and removal rules for the two known page layouts.

/// Page layout the content path is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Whole-page layout: the `box` div under `#colleft` (or `#colleft` itself).
    #[default]
    Page,
    /// Nested-box layout: the `boxi boxinb` div under `#colleft`.
    Nested,
}

/// `#colleft` itself when it is the box, or any box below it.
const PAGE_CONTENT: &str = r#"div#colleft[class="box"], #colleft div[class="box"]"#;
const NESTED_CONTENT: &str = r#"#colleft div[class="boxi boxinb"]"#;

/// `align` values compare case-sensitively (`s`); HTML would otherwise fold
/// them.
const PAGE_REMOVALS: &[&str] = &[
    r#"div[id*="buttons"]"#,
    r#"div[align="right" s]"#,
    r#"div[id="tl"]"#,
    r#"p[class="buttons"]"#,
    "script",
];

const NESTED_REMOVALS: &[&str] = &[
    r#"div[id*="buttons"]"#,
    r#"div[align="right" s]"#,
    r#"div[align="center" s]"#,
    r#"div[id="tl"]"#,
    r#"p[class="buttons"]"#,
    "script",
];

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Page, Layout::Nested];

    pub fn name(self) -> &'static str {
        match self {
            Layout::Page => "page",
            Layout::Nested => "nested",
        }
    }

    /// Selector that must match exactly one element.
    pub fn content_selector(self) -> &'static str {
        match self {
            Layout::Page => PAGE_CONTENT,
            Layout::Nested => NESTED_CONTENT,
        }
    }

    /// Selectors for nodes stripped from the content node, applied in order.
    pub fn removal_selectors(self) -> &'static [&'static str] {
        match self {
            Layout::Page => PAGE_REMOVALS,
            Layout::Nested => NESTED_REMOVALS,
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
