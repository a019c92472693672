//! Page objects for every storefront page, plus the values they read.

mod cart;
mod checkout_complete;
mod checkout_step_one;
mod checkout_step_two;
mod inventory;
mod login;
mod product_details;

pub use cart::CartPage;
pub use checkout_complete::CheckoutCompletePage;
pub use checkout_step_one::CheckoutStepOnePage;
pub use checkout_step_two::CheckoutStepTwoPage;
pub use inventory::InventoryPage;
pub use login::LoginPage;
pub use product_details::ProductDetailsPage;

use crate::fixtures::paths;
use crate::money::{approx_eq, calculate_tax, round_cents};
use crate::page_object::url_path;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One product as shown on the listing or its details page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Display name
    pub name: String,
    /// Description text
    pub description: String,
    /// Price in dollars
    pub price: f64,
}

/// One cart row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemDetails {
    /// Display name
    pub name: String,
    /// Price in dollars
    pub price: f64,
    /// Quantity column
    pub quantity: u32,
}

/// Figures on the checkout overview, read together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// "Item total" before tax
    pub item_total: f64,
    /// Tax line
    pub tax: f64,
    /// Grand total
    pub total: f64,
    /// Payment information line
    pub payment_info: String,
    /// Shipping information line
    pub shipping_info: String,
    /// Number of rows in the order
    pub item_count: usize,
}

impl OrderSummary {
    /// Tax the storefront should charge on the item total
    #[must_use]
    pub fn expected_tax(&self) -> f64 {
        calculate_tax(self.item_total)
    }

    /// Total equals item total plus tax, and tax matches the rate, to the cent
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        approx_eq(self.total, round_cents(self.item_total + self.tax))
            && approx_eq(self.tax, self.expected_tax())
    }
}

/// Stages of the checkout flow.
///
/// `StepOne` moves to `StepTwo` once the form validates, `StepTwo` moves to
/// `Complete` on finish. Cancel leaves the flow from either form step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Your information
    StepOne,
    /// Overview
    StepTwo,
    /// Confirmation
    Complete,
}

impl CheckoutStep {
    /// Path the step is served at
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::StepOne => paths::CHECKOUT_STEP_ONE,
            Self::StepTwo => paths::CHECKOUT_STEP_TWO,
            Self::Complete => paths::CHECKOUT_COMPLETE,
        }
    }

    /// Step shown at `url`, if it is a checkout page
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url_path(url);
        [Self::StepOne, Self::StepTwo, Self::Complete]
            .into_iter()
            .find(|step| step.path() == path)
    }

    /// Step reached by the forward action
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::StepOne => Some(Self::StepTwo),
            Self::StepTwo => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Path cancel leads to; the confirmation has no cancel
    #[must_use]
    pub const fn on_cancel(self) -> Option<&'static str> {
        match self {
            Self::StepOne => Some(paths::CART),
            Self::StepTwo => Some(paths::INVENTORY),
            Self::Complete => None,
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StepOne => "checkout: your information",
            Self::StepTwo => "checkout: overview",
            Self::Complete => "checkout: complete",
        })
    }
}
