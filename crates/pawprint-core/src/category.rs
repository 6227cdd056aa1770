//! Avatar categories and their frame ranges

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contiguous range of frame indices `[start, start + count)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: u32,
    pub count: u32,
}

impl FrameRange {
    pub const fn new(start: u32, count: u32) -> Self {
        Self { start, count }
    }

    /// One past the last index
    pub fn end(&self) -> u32 {
        self.start + self.count
    }

    pub fn contains(&self, index: u32) -> bool {
        index >= self.start && index < self.end()
    }

    pub fn iter(&self) -> std::ops::Range<u32> {
        self.start..self.end()
    }
}

/// One customizable aspect of the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Skin,
    Hair,
    Hat,
    #[serde(rename = "expr")]
    Expression,
    Shirt,
}

impl Category {
    /// All categories, in persisted-field order
    pub const ALL: [Category; 5] = [
        Category::Skin,
        Category::Hair,
        Category::Hat,
        Category::Expression,
        Category::Shirt,
    ];

    /// Back-to-front layer order
    pub const DRAW_ORDER: [Category; 5] = [
        Category::Shirt,
        Category::Skin,
        Category::Hair,
        Category::Hat,
        Category::Expression,
    ];

    /// Frame range on the default sheet
    pub fn range(self) -> FrameRange {
        match self {
            Self::Skin => FrameRange::new(0, 10),
            Self::Hair => FrameRange::new(10, 10),
            Self::Hat => FrameRange::new(20, 10),
            Self::Expression => FrameRange::new(30, 5),
            Self::Shirt => FrameRange::new(35, 5),
        }
    }

    /// Field name in the persisted profile record
    pub fn key(self) -> &'static str {
        match self {
            Self::Skin => "skin",
            Self::Hair => "hair",
            Self::Hat => "hat",
            Self::Expression => "expr",
            Self::Shirt => "shirt",
        }
    }

    /// Category whose range holds `index`
    pub fn for_frame(index: u32) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.range().contains(index))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Expression => "expression",
            other => other.key(),
        };
        f.pad(name)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skin" => Ok(Self::Skin),
            "hair" => Ok(Self::Hair),
            "hat" => Ok(Self::Hat),
            "expr" | "expression" => Ok(Self::Expression),
            "shirt" => Ok(Self::Shirt),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_tile_the_sheet() {
        let mut covered: Vec<u32> = Category::ALL
            .iter()
            .flat_map(|c| c.range().iter())
            .collect();
        covered.sort_unstable();
        assert_eq!(covered, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn test_for_frame() {
        assert_eq!(Category::for_frame(0), Some(Category::Skin));
        assert_eq!(Category::for_frame(19), Some(Category::Hair));
        assert_eq!(Category::for_frame(34), Some(Category::Expression));
        assert_eq!(Category::for_frame(35), Some(Category::Shirt));
        assert_eq!(Category::for_frame(40), None);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("expr".parse::<Category>().unwrap(), Category::Expression);
        assert_eq!("Expression".parse::<Category>().unwrap(), Category::Expression);
        assert!("cape".parse::<Category>().is_err());
        assert_eq!(Category::Expression.to_string(), "expression");
        assert_eq!(Category::Expression.key(), "expr");
    }
}
