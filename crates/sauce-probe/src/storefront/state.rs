//! Application state of the storefront double and the transitions clicks cause.

use super::dom::{Action, Field};
use crate::catalog::{Product, SortOption};
use crate::driver::{resolve_url, StorageArea};
use crate::fixtures::{
    checkout_form_error, errors, login_error, paths, TestUser, ABOUT_URL, CART_STORAGE_KEY,
};
use crate::result::{ProbeError, ProbeResult};
use std::collections::BTreeMap;

/// A page the double can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    Blank,
    Login,
    Inventory,
    Item(String),
    Cart,
    CheckoutStepOne,
    CheckoutStepTwo,
    CheckoutComplete,
    NotFound(String),
    External(String),
}

impl Route {
    /// Parse an absolute URL served from `base_url`
    pub fn parse(base_url: &str, url: &str) -> Self {
        if url == "about:blank" {
            return Self::Blank;
        }
        let resolved = resolve_url(base_url, url);
        let base = base_url.trim_end_matches('/');
        let Some(rest) = resolved.strip_prefix(base) else {
            return Self::External(resolved);
        };
        if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('?')) {
            return Self::External(resolved);
        }
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        match path {
            "" | "/" | "/index.html" => Self::Login,
            paths::INVENTORY => Self::Inventory,
            paths::CART => Self::Cart,
            paths::CHECKOUT_STEP_ONE => Self::CheckoutStepOne,
            paths::CHECKOUT_STEP_TWO => Self::CheckoutStepTwo,
            paths::CHECKOUT_COMPLETE => Self::CheckoutComplete,
            paths::INVENTORY_ITEM => Self::Item(
                query
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("id="))
                    .unwrap_or_default()
                    .to_string(),
            ),
            other => Self::NotFound(other.to_string()),
        }
    }

    /// Path and query the route is served at
    pub fn path(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Login => paths::LOGIN.to_string(),
            Self::Inventory => paths::INVENTORY.to_string(),
            Self::Item(id) => format!("{}?id={id}", paths::INVENTORY_ITEM),
            Self::Cart => paths::CART.to_string(),
            Self::CheckoutStepOne => paths::CHECKOUT_STEP_ONE.to_string(),
            Self::CheckoutStepTwo => paths::CHECKOUT_STEP_TWO.to_string(),
            Self::CheckoutComplete => paths::CHECKOUT_COMPLETE.to_string(),
            Self::NotFound(path) => path.clone(),
            Self::External(url) => url.clone(),
        }
    }

    /// Full URL of the route
    pub fn url(&self, base_url: &str) -> String {
        match self {
            Self::Blank => "about:blank".to_string(),
            Self::External(url) => url.clone(),
            other => resolve_url(base_url, &other.path()),
        }
    }

    /// Pages only a logged-in user may open
    pub const fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::Inventory
                | Self::Item(_)
                | Self::Cart
                | Self::CheckoutStepOne
                | Self::CheckoutStepTwo
                | Self::CheckoutComplete
        )
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub postal_code: String,
    pub error: Option<String>,
}

/// Everything the double remembers between calls
#[derive(Debug)]
pub(crate) struct StoreState {
    pub base_url: String,
    pub route: Route,
    history: Vec<Route>,
    cursor: usize,
    pub user: Option<TestUser>,
    local_storage: BTreeMap<String, String>,
    session_storage: BTreeMap<String, String>,
    pub sort: SortOption,
    pub menu_open: bool,
    pub login: LoginForm,
    pub checkout: CheckoutForm,
    pub closed: bool,
}

impl StoreState {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            route: Route::Blank,
            history: vec![Route::Blank],
            cursor: 0,
            user: None,
            local_storage: BTreeMap::new(),
            session_storage: BTreeMap::new(),
            sort: SortOption::default(),
            menu_open: false,
            login: LoginForm::default(),
            checkout: CheckoutForm::default(),
            closed: false,
        }
    }

    pub fn current_url(&self) -> String {
        self.route.url(&self.base_url)
    }

    // --- navigation ---

    /// Open `route` as a new history entry
    pub fn navigate(&mut self, route: Route) {
        let shown = self.show(route);
        self.history.truncate(self.cursor + 1);
        self.history.push(shown);
        self.cursor = self.history.len() - 1;
    }

    pub fn go_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let route = self.history[self.cursor].clone();
            self.show(route);
        }
    }

    pub fn go_forward(&mut self) {
        if self.cursor + 1 < self.history.len() {
            self.cursor += 1;
            let route = self.history[self.cursor].clone();
            self.show(route);
        }
    }

    pub fn reload(&mut self) {
        let route = self.history[self.cursor].clone();
        self.show(route);
    }

    /// Mount a route with fresh page-local state; protected pages bounce a
    /// logged-out visitor to the login form
    fn show(&mut self, route: Route) -> Route {
        let (shown, login_error) = if route.requires_login() && self.user.is_none() {
            (Route::Login, Some(errors::protected_page(&route.path())))
        } else {
            (route, None)
        };
        self.route = shown.clone();
        self.menu_open = false;
        self.sort = SortOption::default();
        self.login = LoginForm {
            error: login_error,
            ..LoginForm::default()
        };
        self.checkout = CheckoutForm::default();
        shown
    }

    // --- cart ---

    /// Product ids in the cart, in the order they were added
    pub fn cart_ids(&self) -> Vec<u32> {
        self.local_storage
            .get(CART_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<u32>>(raw).ok())
            .unwrap_or_default()
    }

    pub fn cart(&self) -> Vec<Product> {
        self.cart_ids()
            .into_iter()
            .filter_map(Product::from_id)
            .collect()
    }

    pub fn in_cart(&self, product: Product) -> bool {
        self.cart_ids().contains(&product.id())
    }

    fn set_cart(&mut self, ids: &[u32]) -> ProbeResult<()> {
        let raw = serde_json::to_string(ids)?;
        self.local_storage.insert(CART_STORAGE_KEY.to_string(), raw);
        Ok(())
    }

    fn add_to_cart(&mut self, product: Product) -> ProbeResult<()> {
        let mut ids = self.cart_ids();
        if !ids.contains(&product.id()) {
            ids.push(product.id());
        }
        self.set_cart(&ids)
    }

    fn remove_from_cart(&mut self, product: Product) -> ProbeResult<()> {
        let mut ids = self.cart_ids();
        ids.retain(|id| *id != product.id());
        self.set_cart(&ids)
    }

    fn clear_cart(&mut self) {
        self.local_storage.remove(CART_STORAGE_KEY);
    }

    // --- storage ---

    fn storage(&self, area: StorageArea) -> &BTreeMap<String, String> {
        match area {
            StorageArea::Local => &self.local_storage,
            StorageArea::Session => &self.session_storage,
        }
    }

    fn storage_mut(&mut self, area: StorageArea) -> &mut BTreeMap<String, String> {
        match area {
            StorageArea::Local => &mut self.local_storage,
            StorageArea::Session => &mut self.session_storage,
        }
    }

    /// Web storage only exists for documents served from the storefront origin
    fn ensure_storage_access(&self) -> ProbeResult<()> {
        match self.route {
            Route::Blank | Route::External(_) => Err(ProbeError::Script {
                message: "SecurityError: storage is not available for this document".to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn storage_get(&self, area: StorageArea, key: &str) -> ProbeResult<Option<String>> {
        self.ensure_storage_access()?;
        Ok(self.storage(area).get(key).cloned())
    }

    pub fn storage_set(&mut self, area: StorageArea, key: &str, value: &str) -> ProbeResult<()> {
        self.ensure_storage_access()?;
        self.storage_mut(area)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn storage_remove(&mut self, area: StorageArea, key: &str) -> ProbeResult<()> {
        self.ensure_storage_access()?;
        self.storage_mut(area).remove(key);
        Ok(())
    }

    pub fn storage_clear(&mut self, area: StorageArea) -> ProbeResult<()> {
        self.ensure_storage_access()?;
        self.storage_mut(area).clear();
        Ok(())
    }

    // --- interaction ---

    pub fn set_field(&mut self, field: Field, value: &str) -> ProbeResult<()> {
        let value = value.to_string();
        match field {
            Field::Username => self.login.username = value,
            Field::Password => self.login.password = value,
            Field::FirstName => self.checkout.first_name = value,
            Field::LastName => self.checkout.last_name = value,
            Field::PostalCode => self.checkout.postal_code = value,
            Field::Sort => {
                self.sort = SortOption::from_value(&value)
                    .ok_or_else(|| ProbeError::parse("sort option", value))?;
            }
        }
        Ok(())
    }

    pub fn perform(&mut self, action: Action) -> ProbeResult<()> {
        match action {
            Action::Login => self.submit_login(),
            Action::CloseError => {
                self.login.error = None;
                self.checkout.error = None;
            }
            Action::OpenMenu => self.menu_open = true,
            Action::CloseMenu => self.menu_open = false,
            Action::AllItems
            | Action::ContinueShopping
            | Action::BackToProducts => self.navigate(Route::Inventory),
            Action::About => self.navigate(Route::External(ABOUT_URL.to_string())),
            Action::Logout => {
                self.user = None;
                self.navigate(Route::Login);
            }
            Action::ResetApp => self.clear_cart(),
            Action::OpenCart => self.navigate(Route::Cart),
            Action::AddToCart(product) => self.add_to_cart(product)?,
            Action::RemoveFromCart(product) => self.remove_from_cart(product)?,
            Action::ToggleDetails(product) => {
                if self.in_cart(product) {
                    self.remove_from_cart(product)?;
                } else {
                    self.add_to_cart(product)?;
                }
            }
            Action::OpenProduct(product) => self.navigate(Route::Item(product.id().to_string())),
            Action::Checkout => self.navigate(Route::CheckoutStepOne),
            Action::ContinueCheckout => {
                let form = &self.checkout;
                match checkout_form_error(&form.first_name, &form.last_name, &form.postal_code) {
                    Some(error) => self.checkout.error = Some(error.to_string()),
                    None => self.navigate(Route::CheckoutStepTwo),
                }
            }
            Action::Cancel => {
                let target = if self.route == Route::CheckoutStepOne {
                    Route::Cart
                } else {
                    Route::Inventory
                };
                self.navigate(target);
            }
            Action::Finish => {
                self.clear_cart();
                self.navigate(Route::CheckoutComplete);
            }
        }
        Ok(())
    }

    fn submit_login(&mut self) {
        match login_error(&self.login.username, &self.login.password) {
            Some(error) => self.login.error = Some(error.to_string()),
            None => {
                self.user = TestUser::by_username(&self.login.username);
                self.navigate(Route::Inventory);
            }
        }
    }
}
