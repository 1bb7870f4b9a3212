//! Product discriminator supplied with every analysis request.

use crate::error::PreconditionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The product line a stitched report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Product {
    Wst,
    Tm,
}

impl Product {
    pub fn as_str(self) -> &'static str {
        match self {
            Product::Wst => "WST",
            Product::Tm => "TM",
        }
    }

    /// Whether stitched multi-version input can be harmonized for this product.
    ///
    /// Single-document input is accepted for every product.
    pub fn supports_harmonized_analysis(self) -> bool {
        matches!(self, Product::Wst)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Product {
    type Err = PreconditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WST" => Ok(Product::Wst),
            "TM" => Ok(Product::Tm),
            _ => Err(PreconditionError::UnknownProduct(s.to_string())),
        }
    }
}
