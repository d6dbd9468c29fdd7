//! Command-line arguments for the desktop viewer.

use beacon_core::{SceneConfig, SceneVariant};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "beacon", about = "Location beacon scene viewer")]
pub struct CliArgs {
    /// Scene variant (classic or signage).
    #[arg(long, default_value = "classic")]
    pub variant: SceneVariant,

    /// Initial window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Path to the block font used for signage.
    #[arg(long)]
    pub font: Option<String>,

    /// Directory holding the ground, sphere and backdrop images.
    #[arg(long)]
    pub textures: Option<String>,

    /// Signage text.
    #[arg(long)]
    pub text: Option<String>,
}

impl CliArgs {
    pub fn scene_config(&self) -> SceneConfig {
        let mut config = SceneConfig {
            variant: self.variant,
            ..SceneConfig::default()
        };
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if let Some(ref path) = self.font {
            config.font_path = path.clone();
        }
        if let Some(ref dir) = self.textures {
            config.texture_dir = dir.clone();
        }
        if let Some(ref text) = self.text {
            config.signage_text = text.clone();
        }
        config
    }
}
