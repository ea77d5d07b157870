pub mod config;
pub mod error;
pub mod explorer;
pub mod handles;
pub mod interaction;
pub mod interface;
pub mod points;
pub mod refresh;
pub mod transforms;
pub mod view;

pub use config::{ExplorerConfig, DEFAULT_COLORS, DEFAULT_ROOTS, MAX_ROOTS};
pub use error::{ConfigError, InputError};
pub use explorer::Explorer;
pub use handles::{HandleRegistry, HandleStyle, OverlayPainter};
pub use interaction::{
    zoom_factor, Clock, Gesture, GestureInput, InteractionMachine, InteractionSettings, Update,
};
pub use interface::{clamp_iterations, format_value, parse_iterations, MAX_ITERATIONS};
pub use points::{HandleCoord, PixelPoint, Point, Root, UvPoint};
pub use refresh::{refresh_view, Label, LabelSink, ShaderParams};
pub use transforms::{
    calculate_aspect_ratio, compute_view_window, css_to_uv, pixel_to_uv, uv_to_pixel, ViewWindow,
};
pub use view::{Color, ViewInfo, ViewState};
