use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoulguardError {
    #[error("not initialized: run 'soulguard init'")]
    NotInitialized,

    #[error("soul file not found: {0}")]
    SoulNotFound(String),

    #[error("hash record not found: {0}")]
    RecordNotFound(String),

    #[error("invalid agent name '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidName(String),

    #[error(
        "pinned digest must be a literal 64-char hex string, not a computed value (got '{0}')"
    )]
    ComputedPin(String),

    #[error("soul digest mismatch: computed={computed} pinned={pinned}")]
    DigestMismatch { computed: String, pinned: String },

    #[error("soul file staged without its hash record: stage {0} in the same commit")]
    UnpairedChange(String),

    #[error("hash record must be a single hex digest line (got '{0}')")]
    InvalidRecord(String),

    #[error("hash record out of lockstep: record={record} pinned={pinned}")]
    RecordMismatch { record: String, pinned: String },

    #[error("soul file cannot be deleted: {0} must remain pinned in the repository")]
    SoulDeleted(String),

    #[error(
        "CRITICAL: soul integrity check FAILED (computed={computed} pinned={pinned}) — refusing to start"
    )]
    StartupIntegrity { computed: String, pinned: String },

    #[error("git command failed: {0}")]
    GitCommand(String),

    #[error("not a git repository: {0}")]
    NotARepository(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SoulguardError>;
