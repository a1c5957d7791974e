pub mod compositor;
pub mod data_uri;
pub mod encode;
pub mod format;
pub mod geometry;
pub mod normalize;
pub mod pipeline;

pub use compositor::compose;
pub use data_uri::DataUri;
pub use encode::{encode_png, read_png_dpi, ExportResult};
pub use format::ImageFormat;
pub use geometry::{CanvasPlacement, PrintAreaPlacement, UiPlacement};
pub use normalize::{NormalizedImage, Normalizer};
pub use pipeline::ExportPipeline;
