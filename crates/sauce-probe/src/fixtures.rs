//! Static test data: credentials, checkout forms, expected copy and paths.
//!
//! Everything here is `&'static` and shared read-only by every scenario.

use serde::Serialize;

/// Default storefront origin
pub const BASE_URL: &str = "https://www.saucedemo.com";

/// Password shared by every accepted account
pub const SECRET_SAUCE: &str = "secret_sauce";

/// Document title on every storefront page
pub const PAGE_TITLE: &str = "Swag Labs";

/// Host the "About" menu entry leads to
pub const ABOUT_HOST: &str = "saucelabs.com";

/// Target of the "About" menu entry
pub const ABOUT_URL: &str = "https://saucelabs.com/";

/// Sales tax rate applied on the checkout overview
pub const TAX_RATE: f64 = 0.08;

/// Payment line on the checkout overview
pub const PAYMENT_INFO: &str = "SauceCard #31337";

/// Shipping line on the checkout overview
pub const SHIPPING_INFO: &str = "Free Pony Express Delivery!";

/// `localStorage` key holding the cart as a JSON array of product ids
pub const CART_STORAGE_KEY: &str = "cart-contents";

/// Storefront paths
pub mod paths {
    /// Login page
    pub const LOGIN: &str = "/";
    /// Product listing
    pub const INVENTORY: &str = "/inventory.html";
    /// Cart
    pub const CART: &str = "/cart.html";
    /// Checkout: your information
    pub const CHECKOUT_STEP_ONE: &str = "/checkout-step-one.html";
    /// Checkout: overview
    pub const CHECKOUT_STEP_TWO: &str = "/checkout-step-two.html";
    /// Checkout: complete
    pub const CHECKOUT_COMPLETE: &str = "/checkout-complete.html";
    /// Product details page, without the query string
    pub const INVENTORY_ITEM: &str = "/inventory-item.html";

    /// Product details path for a numeric product id
    #[must_use]
    pub fn inventory_item(id: u32) -> String {
        format!("{INVENTORY_ITEM}?id={id}")
    }
}

/// Error copy shown by the storefront
pub mod errors {
    /// Locked-out account
    pub const LOCKED_OUT: &str = "Epic sadface: Sorry, this user has been locked out.";
    /// Unknown user or wrong password
    pub const INVALID_CREDENTIALS: &str =
        "Epic sadface: Username and password do not match any user in this service";
    /// Empty username
    pub const REQUIRED_USERNAME: &str = "Epic sadface: Username is required";
    /// Empty password
    pub const REQUIRED_PASSWORD: &str = "Epic sadface: Password is required";
    /// Empty first name on checkout
    pub const REQUIRED_FIRST_NAME: &str = "Error: First Name is required";
    /// Empty last name on checkout
    pub const REQUIRED_LAST_NAME: &str = "Error: Last Name is required";
    /// Empty postal code on checkout
    pub const REQUIRED_POSTAL_CODE: &str = "Error: Postal Code is required";

    /// Shown on the login page when a protected path is opened while logged out
    #[must_use]
    pub fn protected_page(path: &str) -> String {
        format!("Epic sadface: You can only access '{path}' when you are logged in.")
    }
}

/// Success copy shown by the storefront
pub mod messages {
    /// Confirmation header
    pub const ORDER_COMPLETE: &str = "Thank you for your order!";
    /// Confirmation body
    pub const ORDER_DISPATCHED: &str =
        "Your order has been dispatched, and will arrive just as fast as the pony can get there!";
}

/// A set of login credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestUser {
    /// Login name
    pub username: &'static str,
    /// Password
    pub password: &'static str,
    /// What the account is for
    pub description: &'static str,
}

impl TestUser {
    /// Full access
    pub const STANDARD: Self = Self {
        username: "standard_user",
        password: SECRET_SAUCE,
        description: "Standard user with full access",
    };

    /// Rejected at login
    pub const LOCKED_OUT: Self = Self {
        username: "locked_out_user",
        password: SECRET_SAUCE,
        description: "Locked out user - cannot login",
    };

    /// Broken images and sorting
    pub const PROBLEM: Self = Self {
        username: "problem_user",
        password: SECRET_SAUCE,
        description: "Problem user - has issues with product images and sorting",
    };

    /// Slow responses
    pub const PERFORMANCE_GLITCH: Self = Self {
        username: "performance_glitch_user",
        password: SECRET_SAUCE,
        description: "Performance glitch user - experiences delays",
    };

    /// Errors during checkout
    pub const ERROR: Self = Self {
        username: "error_user",
        password: SECRET_SAUCE,
        description: "Error user - encounters errors during checkout",
    };

    /// Visual differences
    pub const VISUAL: Self = Self {
        username: "visual_user",
        password: SECRET_SAUCE,
        description: "Visual user - for visual testing",
    };

    /// Every account the storefront knows
    pub const ALL: [Self; 6] = [
        Self::STANDARD,
        Self::LOCKED_OUT,
        Self::PROBLEM,
        Self::PERFORMANCE_GLITCH,
        Self::ERROR,
        Self::VISUAL,
    ];

    /// Accounts that log in and land on the inventory
    pub const ACCEPTED: [Self; 5] = [
        Self::STANDARD,
        Self::PROBLEM,
        Self::PERFORMANCE_GLITCH,
        Self::ERROR,
        Self::VISUAL,
    ];

    /// Look up a known account by username
    #[must_use]
    pub fn by_username(username: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.username == username)
    }

    /// True for the locked-out account
    #[must_use]
    pub fn is_locked_out(&self) -> bool {
        self.username == Self::LOCKED_OUT.username
    }
}

/// Credentials the storefront must reject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvalidCredentials {
    /// Short name of the case
    pub label: &'static str,
    /// Login name
    pub username: &'static str,
    /// Password
    pub password: &'static str,
    /// Exact error banner text
    pub expected_error: &'static str,
}

impl InvalidCredentials {
    /// Unknown username
    pub const UNKNOWN_USER: Self = Self {
        label: "unknown user",
        username: "invalid_user",
        password: SECRET_SAUCE,
        expected_error: errors::INVALID_CREDENTIALS,
    };

    /// Known user, wrong password
    pub const WRONG_PASSWORD: Self = Self {
        label: "wrong password",
        username: "standard_user",
        password: "wrong_password",
        expected_error: errors::INVALID_CREDENTIALS,
    };

    /// Username left blank
    pub const EMPTY_USERNAME: Self = Self {
        label: "empty username",
        username: "",
        password: SECRET_SAUCE,
        expected_error: errors::REQUIRED_USERNAME,
    };

    /// Password left blank
    pub const EMPTY_PASSWORD: Self = Self {
        label: "empty password",
        username: "standard_user",
        password: "",
        expected_error: errors::REQUIRED_PASSWORD,
    };

    /// Every rejected variant
    pub const ALL: [Self; 4] = [
        Self::UNKNOWN_USER,
        Self::WRONG_PASSWORD,
        Self::EMPTY_USERNAME,
        Self::EMPTY_PASSWORD,
    ];
}

/// Values for the checkout information form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckoutInfo {
    /// First name
    pub first_name: &'static str,
    /// Last name
    pub last_name: &'static str,
    /// Postal code
    pub postal_code: &'static str,
}

impl CheckoutInfo {
    /// A complete form
    pub const VALID: Self = Self {
        first_name: "John",
        last_name: "Doe",
        postal_code: "12345",
    };

    /// First name missing
    pub const MISSING_FIRST_NAME: Self = Self {
        first_name: "",
        ..Self::VALID
    };

    /// Last name missing
    pub const MISSING_LAST_NAME: Self = Self {
        last_name: "",
        ..Self::VALID
    };

    /// Postal code missing
    pub const MISSING_POSTAL_CODE: Self = Self {
        postal_code: "",
        ..Self::VALID
    };

    /// Error the storefront shows for this form, `None` when it is accepted
    #[must_use]
    pub fn expected_error(&self) -> Option<&'static str> {
        checkout_form_error(self.first_name, self.last_name, self.postal_code)
    }
}

/// Validation the checkout information form applies.
///
/// Fields are checked in form order, so only the first gap is reported.
#[must_use]
pub fn checkout_form_error(
    first_name: &str,
    last_name: &str,
    postal_code: &str,
) -> Option<&'static str> {
    if first_name.is_empty() {
        Some(errors::REQUIRED_FIRST_NAME)
    } else if last_name.is_empty() {
        Some(errors::REQUIRED_LAST_NAME)
    } else if postal_code.is_empty() {
        Some(errors::REQUIRED_POSTAL_CODE)
    } else {
        None
    }
}

/// Validation the login form applies, `None` when the credentials are accepted
#[must_use]
pub fn login_error(username: &str, password: &str) -> Option<&'static str> {
    if username.is_empty() {
        return Some(errors::REQUIRED_USERNAME);
    }
    if password.is_empty() {
        return Some(errors::REQUIRED_PASSWORD);
    }
    match TestUser::by_username(username) {
        Some(user) if user.password == password => {
            user.is_locked_out().then_some(errors::LOCKED_OUT)
        }
        _ => Some(errors::INVALID_CREDENTIALS),
    }
}
