use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("structure carries no charges")]
    MissingCharges,

    #[error("structure carries no forces")]
    MissingForces,

    #[error("PDB serialization failed: {0}")]
    Pdb(#[from] crate::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
