use thiserror::Error;

/// Fatal startup failures. Once the frame loop is running nothing fails.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("window system initialisation failed: {0}")]
    WindowSystem(String),
    #[error("window creation failed: {0}")]
    Window(String),
    #[error("render surface creation failed: {0}")]
    Surface(String),
    #[error("no compatible GPU adapter")]
    Adapter,
    #[error("GPU device request failed: {0}")]
    Device(String),
}
