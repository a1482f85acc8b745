// Error type for the desktop shell.
// The scoring core never fails; only the window and the config can.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),
    /// Updating the window buffer failed
    #[error("window update error: {0}")]
    WindowUpdate(String),
    /// Requested surface cannot hold the guide square
    #[error("invalid surface size {width}x{height}: each side must be at least {min} px")]
    InvalidSize { width: usize, height: usize, min: usize },
}
