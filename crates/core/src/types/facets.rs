//! Product facet dimensions: color, size, and category.
//!
//! Each dimension is a small closed enumeration. The string forms used in
//! persisted catalogs, query parameters, and form posts are the lowercase
//! variant names.

use serde::{Deserialize, Serialize};

/// Error parsing a facet value from its string form.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown {dimension} value: {value}")]
pub struct FacetParseError {
    /// Which dimension was being parsed ("color", "size", "category").
    pub dimension: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! facet_enum {
    ($name:ident, $dimension:literal, { $($variant:ident => $str:literal / $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every value of this dimension, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// The canonical string form (persisted / query-parameter value).
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }

            /// Human-readable label for templates.
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = FacetParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($str => Ok(Self::$variant),)+
                    other => Err(FacetParseError {
                        dimension: $dimension,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

facet_enum!(Color, "color", {
    Black => "black" / "Black",
    White => "white" / "White",
    Red => "red" / "Red",
    Green => "green" / "Green",
    Brown => "brown" / "Brown",
});

facet_enum!(Size, "size", {
    Small => "small" / "Small",
    Medium => "medium" / "Medium",
    Large => "large" / "Large",
    All => "all" / "All (Custom Fit)",
});

facet_enum!(Category, "category", {
    Latest => "latest" / "Latest",
    Fashion => "fashion" / "Fashion",
    Casual => "casual" / "Casual",
    Sports => "sports" / "Sports",
});

impl Default for Category {
    /// The admin form preselects the "latest" category.
    fn default() -> Self {
        Self::Latest
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_values() {
        for color in Color::ALL {
            assert_eq!(&color.as_str().parse::<Color>().unwrap(), color);
        }
        for size in Size::ALL {
            assert_eq!(&size.as_str().parse::<Size>().unwrap(), size);
        }
        for category in Category::ALL {
            assert_eq!(&category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_value_rejected() {
        let err = "purple".parse::<Color>().unwrap_err();
        assert_eq!(err.dimension, "color");
        assert_eq!(err.value, "purple");
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&Category::Sports).unwrap();
        assert_eq!(json, "\"sports\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Sports);
    }

    #[test]
    fn test_category_display_order() {
        let order: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(order, ["latest", "fashion", "casual", "sports"]);
    }
}
