//! Static storefront content.

use merchcraft_core::ProductKind;

/// Shop name shown in the header and footer.
pub const SHOP_NAME: &str = "MerchCraft Print Studio";

/// One service offered by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    /// Product the service can be designed for, if any.
    pub designer: Option<ProductKind>,
}

pub const SERVICES: &[Service] = &[
    Service {
        id: "mugs",
        title: "Mug printing",
        description: "Custom prints with your photos and artwork",
        price: "from 350 ₽",
        designer: Some(ProductKind::Mug),
    },
    Service {
        id: "tshirts",
        title: "T-shirt printing",
        description: "Personalized t-shirts in every size",
        price: "from 450 ₽",
        designer: Some(ProductKind::TShirt),
    },
    Service {
        id: "photo",
        title: "Photo services",
        description: "Professional shooting and photo printing",
        price: "from 15 ₽/pc",
        designer: None,
    },
    Service {
        id: "copy",
        title: "Photocopying",
        description: "Fast copies of documents in any format",
        price: "from 5 ₽/page",
        designer: None,
    },
    Service {
        id: "digitize",
        title: "Media digitization",
        description: "Film and tape transferred to digital",
        price: "from 200 ₽",
        designer: None,
    },
    Service {
        id: "other",
        title: "Other services",
        description: "Lamination, binding, layout design",
        price: "from 50 ₽",
        designer: None,
    },
];

/// Gallery tile. Tiles are drawn as tinted placeholders.
#[derive(Debug, Clone, Copy)]
pub struct GalleryItem {
    pub title: &'static str,
    pub tint: (u8, u8, u8),
}

pub const GALLERY: &[GalleryItem] = &[
    GalleryItem {
        title: "Photo mugs",
        tint: (221, 214, 254),
    },
    GalleryItem {
        title: "Equipment",
        tint: (191, 219, 254),
    },
    GalleryItem {
        title: "Finished work",
        tint: (187, 247, 208),
    },
];

/// (service, price) rows of the price table.
pub const PRICE_TABLE: &[(&str, &str)] = &[
    ("Mug print (white/colored)", "350 ₽ / 450 ₽"),
    ("T-shirt print", "from 450 ₽"),
    ("Photo print 10x15", "15 ₽"),
    ("A4 copy, black and white", "5 ₽"),
    ("Film digitization (36 frames)", "200 ₽"),
    ("Video tape digitization (1 hour)", "300 ₽"),
];

pub const PRICE_NOTE: &str = "Call us for exact prices. Discounts are available for large orders.";

/// A customer review.
#[derive(Debug, Clone, Copy)]
pub struct Review {
    pub name: &'static str,
    pub rating: u8,
    pub text: &'static str,
}

pub const REVIEWS: &[Review] = &[
    Review {
        name: "Anna M.",
        rating: 5,
        text: "Great print quality on the mugs! The order was done fast and neatly.",
    },
    Review {
        name: "Igor P.",
        rating: 5,
        text: "They digitized my old tapes and the quality is superb.",
    },
    Review {
        name: "Maria K.",
        rating: 5,
        text: "I only print photos here. Rich colors and good paper.",
    },
];

/// (label, value) contact lines.
pub const CONTACTS: &[(&str, &str)] = &[
    ("Address", "2 Rainbow Street, lower floor"),
    ("Phone", "+7 (900) 000-00-00"),
    ("Email", "hello@merchcraft.example"),
    ("Hours", "Mon-Fri 9:00-19:00, Sat-Sun 10:00-17:00"),
];

/// Look up a service by id.
pub fn service(id: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.id == id)
}
