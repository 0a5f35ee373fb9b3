//! The four editable catalog collections.

use std::fmt::{self, Display};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use maktaba_core::{
    Ad, AdFields, AdId, Category, CategoryFields, CategoryId, Offer, OfferFields, OfferId,
    Product, ProductFields, ProductId,
};

/// Which collection a route or call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Products,
    Categories,
    Ads,
    Offers,
}

impl ResourceKind {
    pub const ALL: [Self; 4] = [Self::Products, Self::Categories, Self::Ads, Self::Offers];

    /// Path segment under `/api`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Ads => "ads",
            Self::Offers => "offers",
        }
    }

    /// Singular noun for messages ("product saved").
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Products => "product",
            Self::Categories => "category",
            Self::Ads => "ad",
            Self::Offers => "offer",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A catalog record type with CRUD routes.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Typed id of the record.
    type Id: Display + Copy + PartialEq + Send + Sync + 'static;
    /// Create/update payload.
    type Fields: Serialize + Send + Sync + 'static;

    const KIND: ResourceKind;

    fn id(&self) -> Self::Id;
}

impl Resource for Product {
    type Id = ProductId;
    type Fields = ProductFields;

    const KIND: ResourceKind = ResourceKind::Products;

    fn id(&self) -> ProductId {
        self.id
    }
}

impl Resource for Category {
    type Id = CategoryId;
    type Fields = CategoryFields;

    const KIND: ResourceKind = ResourceKind::Categories;

    fn id(&self) -> CategoryId {
        self.id
    }
}

impl Resource for Ad {
    type Id = AdId;
    type Fields = AdFields;

    const KIND: ResourceKind = ResourceKind::Ads;

    fn id(&self) -> AdId {
        self.id
    }
}

impl Resource for Offer {
    type Id = OfferId;
    type Fields = OfferFields;

    const KIND: ResourceKind = ResourceKind::Offers;

    fn id(&self) -> OfferId {
        self.id
    }
}
