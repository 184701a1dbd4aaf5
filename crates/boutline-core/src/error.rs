pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reference fighter not found in dataset: {name}")]
    MissingReference { name: String },

    #[error("Duplicate boxer record: {name}")]
    DuplicateBoxer { name: String },

    #[error("Bout CSV is missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Bout CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid config value at `{path}`: {message}")]
    InvalidConfig { path: String, message: String },
}
