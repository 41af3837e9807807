//! Product types, their size options and the shared color palette.

use crate::pricing::Price;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Product configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("size {size} is not offered for {product}")]
    UnsupportedSize { size: ProductSize, product: ProductKind },
    #[error("unknown size: {0:?}")]
    UnknownSize(String),
    #[error("unknown color: {0:?}")]
    UnknownColor(String),
}

/// Which blank the design is printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    Mug,
    TShirt,
}

impl ProductKind {
    /// Price of the blank before any design elements.
    pub fn base_price(&self) -> Price {
        match self {
            ProductKind::Mug => 350,
            ProductKind::TShirt => 450,
        }
    }

    /// Size options offered for this product.
    pub fn sizes(&self) -> &'static [ProductSize] {
        match self {
            ProductKind::Mug => &[ProductSize::Standard, ProductSize::Large],
            ProductKind::TShirt => &[
                ProductSize::XS,
                ProductSize::S,
                ProductSize::M,
                ProductSize::L,
                ProductSize::XL,
                ProductSize::XXL,
            ],
        }
    }

    /// Size selected when a designer opens.
    pub fn default_size(&self) -> ProductSize {
        match self {
            ProductKind::Mug => ProductSize::Standard,
            ProductKind::TShirt => ProductSize::M,
        }
    }

    /// Check if a size is offered for this product.
    pub fn offers(&self, size: ProductSize) -> bool {
        self.sizes().contains(&size)
    }

    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductKind::Mug => "Mug",
            ProductKind::TShirt => "T-shirt",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Size options across all products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductSize {
    Standard,
    Large,
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

impl ProductSize {
    const ALL: [ProductSize; 8] = [
        ProductSize::Standard,
        ProductSize::Large,
        ProductSize::XS,
        ProductSize::S,
        ProductSize::M,
        ProductSize::L,
        ProductSize::XL,
        ProductSize::XXL,
    ];

    /// Stable key used by the size dropdown.
    pub fn key(&self) -> &'static str {
        match self {
            ProductSize::Standard => "standard",
            ProductSize::Large => "large",
            ProductSize::XS => "XS",
            ProductSize::S => "S",
            ProductSize::M => "M",
            ProductSize::L => "L",
            ProductSize::XL => "XL",
            ProductSize::XXL => "XXL",
        }
    }

    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductSize::Standard => "350 ml",
            ProductSize::Large => "500 ml",
            other => other.key(),
        }
    }
}

impl fmt::Display for ProductSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProductSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.key() == s)
            .ok_or_else(|| ConfigError::UnknownSize(s.to_string()))
    }
}

/// The shared product color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductColor {
    #[default]
    White,
    Black,
    Red,
    Blue,
    Green,
    Yellow,
}

impl ProductColor {
    /// Every palette entry, in swatch order.
    pub const ALL: [ProductColor; 6] = [
        ProductColor::White,
        ProductColor::Black,
        ProductColor::Red,
        ProductColor::Blue,
        ProductColor::Green,
        ProductColor::Yellow,
    ];

    /// Stable lowercase key.
    pub fn key(&self) -> &'static str {
        match self {
            ProductColor::White => "white",
            ProductColor::Black => "black",
            ProductColor::Red => "red",
            ProductColor::Blue => "blue",
            ProductColor::Green => "green",
            ProductColor::Yellow => "yellow",
        }
    }

    /// RGB used to paint the product base (Tailwind 500 shades).
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ProductColor::White => (255, 255, 255),
            ProductColor::Black => (23, 23, 23),
            ProductColor::Red => (239, 68, 68),
            ProductColor::Blue => (59, 130, 246),
            ProductColor::Green => (34, 197, 94),
            ProductColor::Yellow => (234, 179, 8),
        }
    }

    /// Get the fill as a peniko Color.
    pub fn fill(&self) -> Color {
        let (r, g, b) = self.rgb();
        Color::from_rgba8(r, g, b, 255)
    }
}

impl fmt::Display for ProductColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProductColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.key() == s)
            .ok_or_else(|| ConfigError::UnknownColor(s.to_string()))
    }
}

/// Product configuration chosen in the designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    kind: ProductKind,
    size: ProductSize,
    color: ProductColor,
}

impl ProductConfig {
    /// Default configuration for a product.
    pub fn new(kind: ProductKind) -> Self {
        Self {
            kind,
            size: kind.default_size(),
            color: ProductColor::default(),
        }
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn size(&self) -> ProductSize {
        self.size
    }

    pub fn color(&self) -> ProductColor {
        self.color
    }

    /// Select a size. Sizes belonging to another product are rejected.
    pub fn set_size(&mut self, size: ProductSize) -> Result<(), ConfigError> {
        if !self.kind.offers(size) {
            return Err(ConfigError::UnsupportedSize {
                size,
                product: self.kind,
            });
        }
        self.size = size;
        Ok(())
    }

    /// Select a palette color.
    pub fn set_color(&mut self, color: ProductColor) {
        self.color = color;
    }
}
