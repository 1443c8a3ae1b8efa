//! Library item model.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of library item. Loan periods and late fees are keyed on this.
///
/// Serialized as its lowercase name. Deserializes from a name or a legacy
/// numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Book,
    Audio,
    Video,
}

impl Category {
    /// All categories, in catalog order.
    pub const ALL: [Self; 3] = [Self::Book, Self::Audio, Self::Video];

    /// Numeric code used by older catalog exports (1 = book, 2 = audio, 3 = video).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Book => 1,
            Self::Audio => 2,
            Self::Video => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Book => "book",
            Self::Audio => "audio",
            Self::Video => "video",
        };
        f.pad(name)
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "book" => Ok(Self::Book),
            "audio" => Ok(Self::Audio),
            "video" => Ok(Self::Video),
            _ => Err(CoreError::UnknownCategory(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::Book),
            2 => Ok(Self::Audio),
            3 => Ok(Self::Video),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(u8),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Code(code) => Self::try_from(code),
            Repr::Name(name) => name.parse(),
        }
        .map_err(serde::de::Error::custom)
    }
}

/// A physical or digital thing the library lends out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Externally assigned identifier, usually the barcode.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Kind of item.
    pub category: Category,
}

impl Item {
    /// Create a new item.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] \"{}\"", self.id, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_display() {
        let item = Item::new("111", "Secure by Design", Category::Book);
        assert_eq!(item.to_string(), r#"[111] "Secure by Design""#);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Book".parse::<Category>(), Ok(Category::Book));
        assert_eq!(" audio ".parse::<Category>(), Ok(Category::Audio));
        assert_eq!("VIDEO".parse::<Category>(), Ok(Category::Video));
        assert_eq!(
            "magazine".parse::<Category>(),
            Err(CoreError::UnknownCategory("magazine".to_string()))
        );
    }

    #[test]
    fn test_category_codes() {
        for category in Category::ALL {
            assert_eq!(Category::try_from(category.code()), Ok(category));
        }
        assert!(matches!(
            Category::try_from(4),
            Err(CoreError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_item_deserialize_rejects_unknown_category() {
        let ok: Item =
            serde_json::from_str(r#"{"id":"V1","title":"Film","category":"video"}"#).unwrap();
        assert_eq!(ok.category, Category::Video);

        let err = serde_json::from_str::<Item>(r#"{"id":"X","title":"?","category":"vinyl"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown item category: vinyl"));
    }

    #[test]
    fn test_item_deserialize_legacy_code() {
        let item: Item =
            serde_json::from_str(r#"{"id":"A1","title":"Snowball","category":2}"#).unwrap();
        assert_eq!(item.category, Category::Audio);

        let err = serde_json::from_str::<Item>(r#"{"id":"X","title":"?","category":9}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown item category: 9"));
    }

    #[test]
    fn test_category_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Category::Video).unwrap(), r#""video""#);
    }
}
