use std::str::FromStr;

use crate::{AttrName, GeometryError, GeometryResult};

/// Attribute declarations parsed from a shorthand such as `"v3n3t2c4"`:
/// one-letter role codes, each followed by a single-digit size.
///
/// | code | attribute |
/// |------|-----------|
/// | `v`  | [`AttrName::Position`] |
/// | `n`  | [`AttrName::Normal`] |
/// | `c`  | [`AttrName::Color`] |
/// | `t`  | [`AttrName::TexCoord`] |
/// | `u`  | [`AttrName::TexCoord2`] |
///
/// Unknown codes are skipped, but their size must still be a digit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    entries: Vec<(AttrName, u32)>,
}

impl Layout {
    pub fn parse(layout: &str) -> GeometryResult<Self> {
        let mut chars = layout.chars();
        let mut entries = Vec::new();

        while let Some(code) = chars.next() {
            let token = chars.next();
            let size = token
                .and_then(|token| token.to_digit(10))
                .ok_or(GeometryError::InvalidLayoutSize { code, token })?;

            match AttrName::from_code(code) {
                Some(name) => entries.push((name, size)),
                None => log::trace!("skipping unknown layout code {code:?}"),
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(AttrName, u32)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Floats per vertex across all entries.
    pub fn components(&self) -> u32 {
        self.entries.iter().map(|(_, size)| size).sum()
    }
}

impl FromStr for Layout {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl IntoIterator for Layout {
    type Item = (AttrName, u32);
    type IntoIter = std::vec::IntoIter<(AttrName, u32)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
