// Shared core consumed by both the CLI and GUI binaries.
pub mod error;
pub mod frames;
pub mod plan;
pub mod render;
pub mod settings;

pub use error::Error;
pub use frames::{is_frame_file, FrameList};
pub use plan::{build_plan, build_plan_with, RenderPlan};
pub use render::{export, render_preview, Preview, RenderMode};
pub use settings::{ExportSettings, DELAY_OPTIONS, SETTINGS_FILE};
