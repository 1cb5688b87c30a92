use crate::domain::core::Viewport;
use crate::domain::grid::{GridConfig, GridResult};
use crate::domain::resolution::Resolution;
use crate::ui::markup::{DimensionReport, column_markup};
use crate::ui::stylesheet::{ContainerStyle, stylesheet};

/// Everything the page shows for one computed grid
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedGrid {
    pub config: GridConfig,
    pub result: GridResult,
    pub resolution: Resolution,
    pub stylesheet: String,
    pub columns_html: String,
    pub container: ContainerStyle,
    pub report: DimensionReport,
}

impl RenderedGrid {
    pub fn build(
        config: GridConfig,
        result: GridResult,
        resolution: Resolution,
        viewport: &Viewport,
    ) -> Self {
        Self {
            stylesheet: stylesheet(&config, &result),
            columns_html: column_markup(config.columns, &result),
            container: ContainerStyle::for_resolution(&resolution),
            report: DimensionReport::new(viewport, &resolution),
            config,
            result,
            resolution,
        }
    }

    /// Generated row with its inline size, as inserted into the page
    pub fn row_html(&self) -> String {
        format!(
            "<div id=\"js-row\" style=\"{}\">{}</div>",
            self.container.to_inline(),
            self.columns_html
        )
    }
}
