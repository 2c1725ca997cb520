use thiserror::Error;

use crate::AttrName;

pub type GeometryResult<T> = Result<T, GeometryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error(
        "forgot to add a size after layout code {code:?}: found {}",
        .token.map_or_else(|| "end of layout".to_owned(), |c| format!("{c:?}"))
    )]
    InvalidLayoutSize { code: char, token: Option<char> },
    #[error("attribute required by shader not found on geometry: {0}")]
    ShaderAttributeNotFound(AttrName),
    #[error("{len} values for attribute {name} do not make whole {size}-component vertices")]
    InvalidDataLength { name: AttrName, len: usize, size: u32 },
    #[error("attribute {name} holds {found} vertices, expected {expected}")]
    CountMismatch {
        name: AttrName,
        expected: usize,
        found: usize,
    },
    #[error("graphics backend could not create a buffer for attribute {0}")]
    BufferCreation(AttrName),
}
