use thiserror::Error;

#[derive(Error, Debug)]
pub enum MechSwitchError {
    #[error("Could not read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Survey CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Bad bomb facts or report JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid round settings: {0}")]
    Config(String),

    #[error("Bomb facts rejected: {0}")]
    Validation(String),
}

pub type MsResult<T> = Result<T, MechSwitchError>;
