// Crate error type. Every variant states *where* things went wrong.
// Pointer handling never fails, so nothing in here comes from scratching.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("container has no rendered area ({width}x{height})")]
    EmptyContainer { width: u32, height: u32 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] image::ImageError),
}
