//! The storefront's product catalog and the identifiers derived from it.
//!
//! A product's key is the slug of its display name. Keys are only accepted
//! through [`Product::from_str`], which checks them against the catalog, so
//! a misspelled key fails when it is parsed instead of producing a selector
//! that silently matches nothing.

use crate::result::{ProbeError, ProbeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Derive the identifier-safe key for a display name: lowercase, spaces to hyphens.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// A product sold by the storefront
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    /// Sauce Labs Backpack
    Backpack,
    /// Sauce Labs Bike Light
    BikeLight,
    /// Sauce Labs Bolt T-Shirt
    BoltTShirt,
    /// Sauce Labs Fleece Jacket
    FleeceJacket,
    /// Sauce Labs Onesie
    Onesie,
    /// Test.allTheThings() T-Shirt (Red)
    RedTShirt,
}

impl Product {
    /// Every product, in the storefront's default (name ascending) order
    pub const ALL: [Self; 6] = [
        Self::Backpack,
        Self::BikeLight,
        Self::BoltTShirt,
        Self::FleeceJacket,
        Self::Onesie,
        Self::RedTShirt,
    ];

    /// Name shown on the listing and details pages
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Backpack => "Sauce Labs Backpack",
            Self::BikeLight => "Sauce Labs Bike Light",
            Self::BoltTShirt => "Sauce Labs Bolt T-Shirt",
            Self::FleeceJacket => "Sauce Labs Fleece Jacket",
            Self::Onesie => "Sauce Labs Onesie",
            Self::RedTShirt => "Test.allTheThings() T-Shirt (Red)",
        }
    }

    /// Numeric id used by `/inventory-item.html?id=`
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::BikeLight => 0,
            Self::BoltTShirt => 1,
            Self::Onesie => 2,
            Self::RedTShirt => 3,
            Self::Backpack => 4,
            Self::FleeceJacket => 5,
        }
    }

    /// Listed price in dollars
    #[must_use]
    pub const fn price(self) -> f64 {
        match self {
            Self::Backpack => 29.99,
            Self::BikeLight => 9.99,
            Self::BoltTShirt | Self::RedTShirt => 15.99,
            Self::FleeceJacket => 49.99,
            Self::Onesie => 7.99,
        }
    }

    /// Listing description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Backpack => {
                "carry.allTheThings() with the sleek, streamlined Sly Pack that melds uncompromising style with unequaled laptop and tablet protection."
            }
            Self::BikeLight => {
                "A red light isn't the desired state in testing but it sure helps when riding your bike at night. Water-resistant with 3 lighting modes, 1 AAA battery included."
            }
            Self::BoltTShirt => {
                "Get your testing superhero on with the Sauce Labs bolt T-shirt. From American Apparel, 100% ringspun combed cotton, heather gray with red bolt."
            }
            Self::FleeceJacket => {
                "It's not every day that you come across a midweight quarter-zip fleece jacket capable of handling everything from a relaxing day outdoors to a busy day at the office."
            }
            Self::Onesie => {
                "Rib snap infant onesie for the junior automation engineer in development. Reinforced 3-snap bottom closure, two-needle hemmed sleeved and bottom won't unravel."
            }
            Self::RedTShirt => {
                "This classic Sauce Labs t-shirt is perfect to wear when cozying up to your keyboard to automate a few tests. Super-soft and comfy ringspun combed cotton."
            }
        }
    }

    /// Identifier key derived from the display name
    #[must_use]
    pub fn key(self) -> String {
        slugify(self.display_name())
    }

    /// Look up a product by its numeric id
    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Look up a product by its exact display name
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.display_name() == name)
    }
}

impl FromStr for Product {
    type Err = ProbeError;

    fn from_str(key: &str) -> ProbeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| ProbeError::UnknownProduct {
                key: key.to_owned(),
            })
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Orderings offered by the inventory sort dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOption {
    /// Name (A to Z)
    #[default]
    NameAsc,
    /// Name (Z to A)
    NameDesc,
    /// Price (low to high)
    PriceAsc,
    /// Price (high to low)
    PriceDesc,
}

impl SortOption {
    /// All options in dropdown order
    pub const ALL: [Self; 4] = [Self::NameAsc, Self::NameDesc, Self::PriceAsc, Self::PriceDesc];

    /// `<option value>` of the dropdown entry
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::NameAsc => "az",
            Self::NameDesc => "za",
            Self::PriceAsc => "lohi",
            Self::PriceDesc => "hilo",
        }
    }

    /// Visible label of the dropdown entry
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Name (A to Z)",
            Self::NameDesc => "Name (Z to A)",
            Self::PriceAsc => "Price (low to high)",
            Self::PriceDesc => "Price (high to low)",
        }
    }

    /// Parse an `<option value>`
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.value() == value)
    }
}

impl FromStr for SortOption {
    type Err = ProbeError;

    fn from_str(value: &str) -> ProbeResult<Self> {
        Self::from_value(value).ok_or_else(|| ProbeError::parse("sort option", value))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugify_known_names() {
        assert_eq!(slugify("Sauce Labs Backpack"), "sauce-labs-backpack");
        assert_eq!(
            slugify("Test.allTheThings() T-Shirt (Red)"),
            "test.allthethings()-t-shirt-(red)"
        );
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<String> = Product::ALL.iter().map(|p| p.key()).collect();
        assert_eq!(keys.len(), Product::ALL.len());
    }

    #[test]
    fn test_ids_are_unique_and_resolvable() {
        for product in Product::ALL {
            assert_eq!(Product::from_id(product.id()), Some(product));
        }
        assert_eq!(Product::from_id(6), None);
    }

    #[test]
    fn test_parse_key() {
        assert_eq!("sauce-labs-backpack".parse::<Product>().unwrap(), Product::Backpack);
        let err = "sauce-labs-backpak".parse::<Product>().unwrap_err();
        assert!(matches!(err, ProbeError::UnknownProduct { .. }));
    }

    #[test]
    fn test_display_name_lookup() {
        assert_eq!(
            Product::from_display_name("Sauce Labs Bike Light"),
            Some(Product::BikeLight)
        );
        assert_eq!(Product::from_display_name("sauce labs bike light"), None);
    }

    #[test]
    fn test_sort_option_values() {
        assert_eq!(SortOption::PriceAsc.value(), "lohi");
        assert_eq!("hilo".parse::<SortOption>().unwrap(), SortOption::PriceDesc);
        assert!("cheapest".parse::<SortOption>().is_err());
        assert_eq!(SortOption::default(), SortOption::NameAsc);
    }

    proptest! {
        #[test]
        fn prop_slug_has_no_spaces_or_uppercase(name in "[A-Za-z0-9 ().-]{0,40}") {
            let slug = slugify(&name);
            prop_assert!(!slug.contains(' '));
            prop_assert_eq!(slug.to_lowercase(), slug.clone());
            prop_assert_eq!(slug.chars().count(), name.chars().count());
        }

        #[test]
        fn prop_every_catalog_key_round_trips(index in 0usize..6) {
            let product = Product::ALL[index];
            prop_assert_eq!(product.key().parse::<Product>().unwrap(), product);
        }
    }
}
