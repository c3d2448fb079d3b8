use thiserror::Error;

use crate::entities::Sprite;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The asset provider has no handle for a sprite the render pass needs.
    #[error("sprite {} is not loaded", .0.asset_id())]
    MissingAsset(Sprite),
}
