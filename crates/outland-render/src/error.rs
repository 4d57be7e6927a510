use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("no drawable surface for {width}x{height}")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("invalid viewport: {0}")]
    InvalidViewport(String),
}
