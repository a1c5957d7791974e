pub mod export;
pub mod placement;

pub use export::{__path_handle_export, __path_handle_print_export};
pub use export::{
    handle_export, handle_print_export, ExportDimensions, ExportErrorResponse, ExportRequest,
    ExportResponse, Position,
};
pub use placement::{handle_placement, PlacementRequest, PlacementResponse, __path_handle_placement};
