//! Selector registry: semantic element names mapped to the storefront's DOM hooks.
//!
//! Every fixed element is an [`Element`] variant and resolves to exactly one
//! selector. Controls that exist once per product are [`ProductControl`]s,
//! built from an already validated [`Product`], so their selectors are
//! unique per product by construction.

use crate::catalog::Product;
use crate::locator::{Locator, Selector};
use serde::{Deserialize, Serialize};

/// A fixed element of the storefront UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    // Login
    /// Username input
    UsernameInput,
    /// Password input
    PasswordInput,
    /// Login submit button
    LoginButton,
    /// Error banner shared by login and checkout step one
    ErrorMessage,
    /// Close button of the error banner
    ErrorButton,

    // Inventory
    /// One product row on the listing
    InventoryItem,
    /// Product name (listing and cart rows)
    ItemName,
    /// Product description (listing and cart rows)
    ItemDescription,
    /// Product price (listing and cart rows)
    ItemPrice,
    /// Sort dropdown
    SortContainer,
    /// Numeric badge on the cart icon
    ShoppingCartBadge,
    /// Cart icon link
    ShoppingCartLink,

    // Cart
    /// One row of the cart (also used on the checkout overview)
    CartItem,
    /// Quantity cell of a cart row
    CartQuantity,
    /// Remove button of a cart row, whichever product it holds
    CartRowButton,
    /// Continue shopping button
    ContinueShoppingButton,
    /// Checkout button
    CheckoutButton,

    // Checkout
    /// First name input
    FirstNameInput,
    /// Last name input
    LastNameInput,
    /// Postal code input
    PostalCodeInput,
    /// Continue button of step one
    ContinueButton,
    /// Cancel button of steps one and two
    CancelButton,
    /// Finish button of step two
    FinishButton,
    /// Item subtotal label
    SubtotalLabel,
    /// Tax label
    TaxLabel,
    /// Total label
    TotalLabel,
    /// Payment information value
    PaymentInfo,
    /// Shipping information value
    ShippingInfo,
    /// Confirmation header
    CompleteHeader,
    /// Confirmation body text
    CompleteText,
    /// Back-to-products button (details page and confirmation page)
    BackToProductsButton,

    // Navigation menu
    /// Burger menu button
    BurgerMenuButton,
    /// Logout menu entry
    LogoutLink,
    /// All items menu entry
    AllItemsLink,
    /// About menu entry
    AboutLink,
    /// Reset app state menu entry
    ResetAppLink,
    /// Close menu button
    CloseMenuButton,

    // Product details
    /// Product name on the details page
    DetailsName,
    /// Product description on the details page
    DetailsDescription,
    /// Product price on the details page
    DetailsPrice,
    /// Add/remove toggle on the details page
    DetailsToggleButton,

    // Footer
    /// Twitter link
    SocialTwitter,
    /// Facebook link
    SocialFacebook,
    /// LinkedIn link
    SocialLinkedin,
    /// Copyright line
    FooterCopy,
}

impl Element {
    /// Every fixed element
    pub const ALL: [Self; 45] = [
        Self::UsernameInput,
        Self::PasswordInput,
        Self::LoginButton,
        Self::ErrorMessage,
        Self::ErrorButton,
        Self::InventoryItem,
        Self::ItemName,
        Self::ItemDescription,
        Self::ItemPrice,
        Self::SortContainer,
        Self::ShoppingCartBadge,
        Self::ShoppingCartLink,
        Self::CartItem,
        Self::CartQuantity,
        Self::CartRowButton,
        Self::ContinueShoppingButton,
        Self::CheckoutButton,
        Self::FirstNameInput,
        Self::LastNameInput,
        Self::PostalCodeInput,
        Self::ContinueButton,
        Self::CancelButton,
        Self::FinishButton,
        Self::SubtotalLabel,
        Self::TaxLabel,
        Self::TotalLabel,
        Self::PaymentInfo,
        Self::ShippingInfo,
        Self::CompleteHeader,
        Self::CompleteText,
        Self::BackToProductsButton,
        Self::BurgerMenuButton,
        Self::LogoutLink,
        Self::AllItemsLink,
        Self::AboutLink,
        Self::ResetAppLink,
        Self::CloseMenuButton,
        Self::DetailsName,
        Self::DetailsDescription,
        Self::DetailsPrice,
        Self::DetailsToggleButton,
        Self::SocialTwitter,
        Self::SocialFacebook,
        Self::SocialLinkedin,
        Self::FooterCopy,
    ];

    /// Human-readable semantic name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UsernameInput => "username input",
            Self::PasswordInput => "password input",
            Self::LoginButton => "login button",
            Self::ErrorMessage => "error message",
            Self::ErrorButton => "error close button",
            Self::InventoryItem => "inventory item",
            Self::ItemName => "item name",
            Self::ItemDescription => "item description",
            Self::ItemPrice => "item price",
            Self::SortContainer => "sort dropdown",
            Self::ShoppingCartBadge => "cart badge",
            Self::ShoppingCartLink => "cart link",
            Self::CartItem => "cart item",
            Self::CartQuantity => "cart quantity",
            Self::CartRowButton => "cart row button",
            Self::ContinueShoppingButton => "continue shopping button",
            Self::CheckoutButton => "checkout button",
            Self::FirstNameInput => "first name input",
            Self::LastNameInput => "last name input",
            Self::PostalCodeInput => "postal code input",
            Self::ContinueButton => "checkout continue button",
            Self::CancelButton => "checkout cancel button",
            Self::FinishButton => "checkout finish button",
            Self::SubtotalLabel => "item total label",
            Self::TaxLabel => "tax label",
            Self::TotalLabel => "total label",
            Self::PaymentInfo => "payment info",
            Self::ShippingInfo => "shipping info",
            Self::CompleteHeader => "complete header",
            Self::CompleteText => "complete text",
            Self::BackToProductsButton => "back to products button",
            Self::BurgerMenuButton => "burger menu button",
            Self::LogoutLink => "logout link",
            Self::AllItemsLink => "all items link",
            Self::AboutLink => "about link",
            Self::ResetAppLink => "reset app link",
            Self::CloseMenuButton => "close menu button",
            Self::DetailsName => "details name",
            Self::DetailsDescription => "details description",
            Self::DetailsPrice => "details price",
            Self::DetailsToggleButton => "details add/remove button",
            Self::SocialTwitter => "twitter link",
            Self::SocialFacebook => "facebook link",
            Self::SocialLinkedin => "linkedin link",
            Self::FooterCopy => "footer copyright",
        }
    }

    /// The selector this element resolves to
    #[must_use]
    pub fn selector(self) -> Selector {
        match self {
            Self::UsernameInput => Selector::data_test("username"),
            Self::PasswordInput => Selector::data_test("password"),
            Self::LoginButton => Selector::data_test("login-button"),
            Self::ErrorMessage => Selector::data_test("error"),
            Self::ErrorButton => Selector::class("error-button"),
            Self::InventoryItem => Selector::class("inventory_item"),
            Self::ItemName => Selector::class("inventory_item_name"),
            Self::ItemDescription => Selector::class("inventory_item_desc"),
            Self::ItemPrice => Selector::class("inventory_item_price"),
            Self::SortContainer => Selector::class("product_sort_container"),
            Self::ShoppingCartBadge => Selector::class("shopping_cart_badge"),
            Self::ShoppingCartLink => Selector::class("shopping_cart_link"),
            Self::CartItem => Selector::class("cart_item"),
            Self::CartQuantity => Selector::class("cart_quantity"),
            Self::CartRowButton => Selector::class("cart_button"),
            Self::ContinueShoppingButton => Selector::data_test("continue-shopping"),
            Self::CheckoutButton => Selector::data_test("checkout"),
            Self::FirstNameInput => Selector::data_test("firstName"),
            Self::LastNameInput => Selector::data_test("lastName"),
            Self::PostalCodeInput => Selector::data_test("postalCode"),
            Self::ContinueButton => Selector::data_test("continue"),
            Self::CancelButton => Selector::data_test("cancel"),
            Self::FinishButton => Selector::data_test("finish"),
            Self::SubtotalLabel => Selector::class("summary_subtotal_label"),
            Self::TaxLabel => Selector::class("summary_tax_label"),
            Self::TotalLabel => Selector::class("summary_total_label"),
            Self::PaymentInfo => Selector::data_test("payment-info-value"),
            Self::ShippingInfo => Selector::data_test("shipping-info-value"),
            Self::CompleteHeader => Selector::class("complete-header"),
            Self::CompleteText => Selector::class("complete-text"),
            Self::BackToProductsButton => Selector::data_test("back-to-products"),
            Self::BurgerMenuButton => Selector::id("react-burger-menu-btn"),
            Self::LogoutLink => Selector::id("logout_sidebar_link"),
            Self::AllItemsLink => Selector::id("inventory_sidebar_link"),
            Self::AboutLink => Selector::id("about_sidebar_link"),
            Self::ResetAppLink => Selector::id("reset_sidebar_link"),
            Self::CloseMenuButton => Selector::id("react-burger-cross-btn"),
            Self::DetailsName => Selector::class("inventory_details_name"),
            Self::DetailsDescription => Selector::class("inventory_details_desc"),
            Self::DetailsPrice => Selector::class("inventory_details_price"),
            Self::DetailsToggleButton => Selector::class("btn_inventory"),
            Self::SocialTwitter => Selector::class("social_twitter"),
            Self::SocialFacebook => Selector::class("social_facebook"),
            Self::SocialLinkedin => Selector::class("social_linkedin"),
            Self::FooterCopy => Selector::class("footer_copy"),
        }
    }

    /// A locator with default options
    #[must_use]
    pub fn locator(self) -> Locator {
        Locator::from_selector(self.selector())
    }
}

impl From<Element> for Selector {
    fn from(element: Element) -> Self {
        element.selector()
    }
}

/// A control that exists once per product on the listing and in the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductControl {
    /// "Add to cart" button of a product
    AddToCart(Product),
    /// "Remove" button of a product
    Remove(Product),
}

impl ProductControl {
    /// `data-test` value of the control
    #[must_use]
    pub fn data_test(self) -> String {
        match self {
            Self::AddToCart(product) => format!("add-to-cart-{}", product.key()),
            Self::Remove(product) => format!("remove-{}", product.key()),
        }
    }

    /// The selector this control resolves to
    #[must_use]
    pub fn selector(self) -> Selector {
        Selector::DataTest(self.data_test())
    }

    /// A locator with default options
    #[must_use]
    pub fn locator(self) -> Locator {
        Locator::from_selector(self.selector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_all_lists_every_element_once() {
        let unique: HashSet<Element> = Element::ALL.into_iter().collect();
        assert_eq!(unique.len(), Element::ALL.len());
    }

    #[test]
    fn test_semantic_names_are_unique() {
        let names: HashSet<&str> = Element::ALL.iter().map(|e| e.name()).collect();
        assert_eq!(names.len(), Element::ALL.len());
    }

    #[test]
    fn test_elements_resolve_to_distinct_selectors() {
        let mut by_selector: HashMap<Selector, Vec<Element>> = HashMap::new();
        for element in Element::ALL {
            by_selector.entry(element.selector()).or_default().push(element);
        }
        let collisions: Vec<_> = by_selector.values().filter(|v| v.len() > 1).collect();
        assert!(collisions.is_empty(), "colliding selectors: {collisions:?}");
    }

    #[test]
    fn test_product_controls_unique_per_product() {
        let mut seen = HashSet::new();
        for product in Product::ALL {
            assert!(seen.insert(ProductControl::AddToCart(product).selector()));
            assert!(seen.insert(ProductControl::Remove(product).selector()));
        }
        assert_eq!(seen.len(), Product::ALL.len() * 2);
    }

    #[test]
    fn test_product_control_ids() {
        assert_eq!(
            ProductControl::AddToCart(Product::Backpack).data_test(),
            "add-to-cart-sauce-labs-backpack"
        );
        assert_eq!(
            ProductControl::Remove(Product::RedTShirt).data_test(),
            "remove-test.allthethings()-t-shirt-(red)"
        );
    }

    #[test]
    fn test_key_selectors() {
        assert_eq!(Element::LogoutLink.selector().to_css().unwrap(), "#logout_sidebar_link");
        assert_eq!(
            Element::ErrorMessage.selector().to_css().unwrap(),
            "[data-test=\"error\"]"
        );
        assert_eq!(Element::CartRowButton.selector().to_css().unwrap(), ".cart_button");
    }
}
