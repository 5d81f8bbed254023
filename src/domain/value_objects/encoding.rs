//! Output encoding value object

use std::fmt;
use std::str::FromStr;

/// Character encoding used when writing or reading an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    /// ISO-8859-1; characters above U+00FF cannot be encoded
    Latin1,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("unsupported encoding '{0}' (expected UTF-8 or ISO-8859-1)")]
    Unsupported(String),
    #[error("character '{ch}' cannot be encoded as {encoding}")]
    Unmappable { ch: char, encoding: Encoding },
    #[error("content is not valid {0}")]
    Undecodable(Encoding),
}

impl Encoding {
    pub fn encode(&self, content: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Encoding::Utf8 => Ok(content.as_bytes().to_vec()),
            Encoding::Latin1 => content
                .chars()
                .map(|ch| {
                    u8::try_from(u32::from(ch)).map_err(|_| EncodingError::Unmappable {
                        ch,
                        encoding: *self,
                    })
                })
                .collect(),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String, EncodingError> {
        match self {
            Encoding::Utf8 => {
                String::from_utf8(bytes.to_vec()).map_err(|_| EncodingError::Undecodable(*self))
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "UTF-8"),
            Encoding::Latin1 => write!(f, "ISO-8859-1"),
        }
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('_', "-").as_str() {
            "UTF-8" | "UTF8" => Ok(Encoding::Utf8),
            "ISO-8859-1" | "LATIN1" | "LATIN-1" => Ok(Encoding::Latin1),
            _ => Err(EncodingError::Unsupported(s.to_string())),
        }
    }
}
