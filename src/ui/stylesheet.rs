//! Stylesheet synthesis
//!
//! Builds the style block injected into the page: fixed rules for the
//! configurator chrome followed by the rules that size the generated
//! columns.

use crate::domain::grid::{GridConfig, GridResult};
use crate::domain::resolution::Resolution;

/// Rules for the toggle control, the form panel and the width caption
pub const PANEL_RULES: &[&str] = &[
    "#toggle {position:absolute; top:40px; left:10px; border:1px solid #ddd; z-index:1; background:#eee; text-decoration:none; padding:0 10px; font-size:18px; border-radius:5px;}",
    "#updategrid {position:absolute; top:0; left:0; width:180px; background:#eee; padding:45px 10px 10px;}",
    "#docWidth {font-size: 14px; margin:0 0 10px; color:#999; display:block;}",
    "#js-row {background:#fff;}",
];

/// Rules sizing the generated columns
pub fn column_rules(config: &GridConfig, result: &GridResult) -> Vec<String> {
    vec![
        format!(
            "#js-row .col {{margin:0 0 0 {}% !important; height:{}px;}}",
            config.gutter_percent, result.row_height_px
        ),
        "#js-row .col:first-child {margin-left:0 !important;}".to_string(),
        format!(
            "#js-row .one {{width:{}% !important;}}",
            result.column_width_percent
        ),
    ]
}

/// Complete style block, one rule per line
pub fn stylesheet(config: &GridConfig, result: &GridResult) -> String {
    let mut css = String::new();
    for rule in PANEL_RULES {
        css.push_str(rule);
        css.push('\n');
    }
    for rule in column_rules(config, result) {
        css.push_str(&rule);
        css.push('\n');
    }
    css
}

/// Inline size of the generated row container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerStyle {
    pub width: String,
    pub height: String,
}

impl ContainerStyle {
    pub fn for_resolution(resolution: &Resolution) -> Self {
        match resolution {
            Resolution::Fluid => Self {
                width: "100%".to_string(),
                height: "100%".to_string(),
            },
            Resolution::Fixed { width, height } => Self {
                width: format!("{width}px"),
                height: format!("{height}px"),
            },
        }
    }

    /// Inline `style` attribute value
    pub fn to_inline(&self) -> String {
        format!("width:{}; height:{};", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::compute;

    #[test]
    fn column_rules_for_default_grid() {
        let config = GridConfig::fluid(12, 4.0, 1200.0, 900.0);
        let result = compute(&config).unwrap();
        let rules = column_rules(&config, &result);

        assert_eq!(
            rules[0],
            "#js-row .col {margin:0 0 0 4% !important; height:900px;}"
        );
        assert_eq!(rules[1], "#js-row .col:first-child {margin-left:0 !important;}");
        assert_eq!(rules[2], "#js-row .one {width:4.666666666666667% !important;}");
    }

    #[test]
    fn stylesheet_starts_with_panel_rules() {
        let config = GridConfig::fixed(3, 2.5, 768.0, 1024.0);
        let result = compute(&config).unwrap();
        let css = stylesheet(&config, &result);

        let lines: Vec<&str> = css.lines().collect();
        assert_eq!(lines.len(), PANEL_RULES.len() + 3);
        assert!(lines[0].starts_with("#toggle {"));
        assert!(lines[4].contains("margin:0 0 0 2.5%"));
        assert!(lines[4].contains("height:1024px"));
        assert_eq!(lines[6], "#js-row .one {width:31.666666666666668% !important;}");
    }

    #[test]
    fn negative_width_is_written_verbatim() {
        let config = GridConfig::fluid(6, 30.0, 600.0, 400.0);
        let result = compute(&config).unwrap();
        let rules = column_rules(&config, &result);
        assert!(rules[2].starts_with("#js-row .one {width:-8.33"));
    }

    #[test]
    fn container_style_per_resolution() {
        let fluid = ContainerStyle::for_resolution(&Resolution::Fluid);
        assert_eq!(fluid.to_inline(), "width:100%; height:100%;");

        let fixed = ContainerStyle::for_resolution(&Resolution::Fixed {
            width: 320,
            height: 480,
        });
        assert_eq!(fixed.width, "320px");
        assert_eq!(fixed.height, "480px");
    }
}
