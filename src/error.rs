// Every variant states *where* things went wrong.
// Degenerate draw geometry is not an error: those draws are skipped.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("Window update error: {0}")]
    WindowUpdate(String), // Presenting the frame failed

    #[error("Failed to load asset '{path}': {source}")]
    Asset {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("No eligible region in the lacquer mask (gave up after {attempts} attempts)")]
    EmptyMask { attempts: usize },

    #[error("Config error: {0}")]
    Config(String),
}
