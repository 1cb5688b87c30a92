pub mod markup;
pub mod page;
pub mod renderer;
pub mod stylesheet;

pub use page::RenderedGrid;
pub use renderer::{PreviewLayout, PreviewRenderer, RendererError};
