use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Name of a vertex attribute, as the shader spells it.
///
/// The well-known roles have their own variants; anything else is
/// `Custom`. Equality and hashing go through [`AttrName::as_str`], so
/// `Custom("aVertexNormal")` and `Normal` are the same key.
#[derive(Debug, Clone)]
pub enum AttrName {
    Position,
    Normal,
    Color,
    TexCoord,
    TexCoord2,
    Custom(String),
}

impl AttrName {
    pub const POSITION: &'static str = "aVertexPosition";
    pub const NORMAL: &'static str = "aVertexNormal";
    pub const COLOR: &'static str = "aVertexColor";
    pub const TEX_COORD: &'static str = "aTextureCoord";
    pub const TEX_COORD2: &'static str = "aTextureCoord2";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Position => Self::POSITION,
            Self::Normal => Self::NORMAL,
            Self::Color => Self::COLOR,
            Self::TexCoord => Self::TEX_COORD,
            Self::TexCoord2 => Self::TEX_COORD2,
            Self::Custom(name) => name,
        }
    }

    /// Role for a one-letter layout code (`v n c t u`).
    pub fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'v' => Self::Position,
            'n' => Self::Normal,
            'c' => Self::Color,
            't' => Self::TexCoord,
            'u' => Self::TexCoord2,
            _ => return None,
        })
    }

    pub fn code(&self) -> Option<char> {
        Some(match Self::from(self.as_str()) {
            Self::Position => 'v',
            Self::Normal => 'n',
            Self::Color => 'c',
            Self::TexCoord => 't',
            Self::TexCoord2 => 'u',
            Self::Custom(_) => return None,
        })
    }

    pub fn is_custom(&self) -> bool {
        self.code().is_none()
    }
}

impl From<&str> for AttrName {
    fn from(value: &str) -> Self {
        match value {
            Self::POSITION => Self::Position,
            Self::NORMAL => Self::Normal,
            Self::COLOR => Self::Color,
            Self::TEX_COORD => Self::TexCoord,
            Self::TEX_COORD2 => Self::TexCoord2,
            custom => Self::Custom(custom.to_owned()),
        }
    }
}

impl From<String> for AttrName {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Custom(_) => Self::Custom(value),
            known => known,
        }
    }
}

impl From<&AttrName> for AttrName {
    fn from(value: &AttrName) -> Self {
        value.clone()
    }
}

impl PartialEq for AttrName {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}
impl Eq for AttrName {}

impl Hash for AttrName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for AttrName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for AttrName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for AttrName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
