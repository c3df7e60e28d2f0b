use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Cannot mutate \"{key}\": values are locked")]
    LockedValues { key: String },

    #[error("Cannot mutate \"{key}\": attributes are locked")]
    LockedAttributes { key: String },

    #[error("Missing attribute \"{key}\"")]
    MissingKey { key: String },
}

impl StoreError {
    pub fn locked_values(key: impl Into<String>) -> Self {
        Self::LockedValues { key: key.into() }
    }

    pub fn locked_attributes(key: impl Into<String>) -> Self {
        Self::LockedAttributes { key: key.into() }
    }

    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }
}
