//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Publication status of a product.
///
/// The product listing does not carry a status yet, so anything the backend
/// does not report explicitly is considered live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    #[default]
    Live,
    Draft,
    Archived,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "Live"),
            Self::Draft => write!(f, "Draft"),
            Self::Archived => write!(f, "Archived"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" | "active" | "published" => Ok(Self::Live),
            "draft" => Ok(Self::Draft),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}
