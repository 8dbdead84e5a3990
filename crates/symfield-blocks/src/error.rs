//! Error types for symfield-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Field name must not be empty")]
    EmptyFieldName,

    #[error("Field name {field:?} cannot be matched: {source}")]
    InvalidFieldName {
        field: String,
        #[source]
        source: regex::Error,
    },
}
