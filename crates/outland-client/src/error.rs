use outland_render::RenderError;
use outland_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to write snapshot: {0}")]
    Snapshot(#[from] image::ImageError),

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}
