use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("no product at catalog index {index} (catalog holds {len})")]
    UnknownProduct { index: usize, len: usize },

    #[error("unknown checkbox group: {0}")]
    UnknownCheckboxGroup(String),

    #[error("invalid {group} checkbox value: {value:?}")]
    InvalidCheckboxValue { group: &'static str, value: String },

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}
