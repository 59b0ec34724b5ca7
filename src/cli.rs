//! Command line surface: `menger-viewer [msaa] [max_fps]`.
//!
//! Values are taken as raw strings; validation and fallback to the defaults
//! happen in `ViewerConfig::from_args`.

use clap::Parser;
use viewer_core::ViewerConfig;

#[derive(Parser, Debug)]
#[command(
    name = "menger-viewer",
    version,
    about = "Interactive L3 Menger cube viewer"
)]
pub struct Cli {
    /// Requested MSAA sample count, lowered to what the GPU supports (default 16)
    #[arg(allow_hyphen_values = true)]
    msaa: Option<String>,
    /// Frame rate cap; also sets the fixed animation step (default 144)
    #[arg(allow_hyphen_values = true)]
    max_fps: Option<String>,
    #[arg(hide = true, allow_hyphen_values = true)]
    rest: Vec<String>,
}

impl Cli {
    pub fn config(&self) -> ViewerConfig {
        if !self.rest.is_empty() {
            log::debug!("ignoring extra arguments {:?}", self.rest);
        }
        ViewerConfig::from_args(self.msaa.iter().chain(self.max_fps.iter()))
    }
}
