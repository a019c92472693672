//! End-to-end scenario suites.
//!
//! Every scenario starts from a fresh driver, logs in through the UI when it
//! needs a session and asserts through the page objects only (the data-layer
//! suite also reads web storage). The same suites run offline against
//! [`crate::MockStorefront`] and live through the CLI.

use crate::assertion::{Assertion, AssertionResult};
use crate::catalog::{Product, SortOption};
use crate::driver::{SharedDriver, StorageArea};
use crate::fixtures::{
    errors, messages, paths, CheckoutInfo, InvalidCredentials, TestUser, ABOUT_HOST,
    CART_STORAGE_KEY, PAGE_TITLE, PAYMENT_INFO, SHIPPING_INFO,
};
use crate::harness::{TestCase, TestSuite};
use crate::money::{calculate_tax, sum_prices};
use crate::page_object::PageObject;
use crate::pages::{
    CartPage, CheckoutCompletePage, CheckoutStep, CheckoutStepOnePage, CheckoutStepTwoPage,
    InventoryPage, LoginPage, ProductDetailsPage,
};
use crate::result::{ProbeError, ProbeResult};
use crate::selectors::Element;

/// Timeout for the scenario that leaves the storefront for the About page
pub const EXTERNAL_SCENARIO_TIMEOUT_MS: u64 = 60_000;

/// Suite names accepted by [`suite_by_name`], in run order
pub const SUITE_NAMES: [&str; 6] = ["auth", "inventory", "cart", "checkout", "navigation", "data_layer"];

/// Every suite, in run order
#[must_use]
pub fn all_suites() -> Vec<TestSuite> {
    vec![
        auth_suite(),
        inventory_suite(),
        cart_suite(),
        checkout_suite(),
        navigation_suite(),
        data_layer_suite(),
    ]
}

/// Look up a suite by name
pub fn suite_by_name(name: &str) -> ProbeResult<TestSuite> {
    match name {
        "auth" => Ok(auth_suite()),
        "inventory" => Ok(inventory_suite()),
        "cart" => Ok(cart_suite()),
        "checkout" => Ok(checkout_suite()),
        "navigation" => Ok(navigation_suite()),
        "data_layer" => Ok(data_layer_suite()),
        other => Err(ProbeError::config(format!(
            "unknown suite '{other}' (expected one of: {})",
            SUITE_NAMES.join(", ")
        ))),
    }
}

fn check(result: AssertionResult, what: &str) -> ProbeResult<()> {
    result.context(what).into_result()
}

async fn login_as(driver: &SharedDriver, user: &TestUser) -> ProbeResult<InventoryPage> {
    let login = LoginPage::new(driver.clone());
    login.navigate().await?;
    login.login_as(user).await?;
    Ok(InventoryPage::new(driver.clone()))
}

async fn logged_in(driver: &SharedDriver) -> ProbeResult<InventoryPage> {
    login_as(driver, &TestUser::STANDARD).await
}

async fn on_cart_with(driver: &SharedDriver, products: &[Product]) -> ProbeResult<CartPage> {
    let inventory = logged_in(driver).await?;
    inventory.add_multiple_items_to_cart(products).await?;
    inventory.nav().go_to_cart().await?;
    Ok(CartPage::new(driver.clone()))
}

async fn on_overview_with(driver: &SharedDriver, products: &[Product]) -> ProbeResult<CheckoutStepTwoPage> {
    let cart = on_cart_with(driver, products).await?;
    cart.checkout().await?;
    CheckoutStepOnePage::new(driver.clone())
        .complete_step_one(&CheckoutInfo::VALID)
        .await?;
    let overview = CheckoutStepTwoPage::new(driver.clone());
    overview.wait_until_loaded().await?;
    Ok(overview)
}

async fn expect_path(page: &impl PageObject, path: &str) -> ProbeResult<()> {
    let url = page.nav().current_url().await?;
    check(Assertion::url_ends_with(&url, path), "current URL")
}

// --- auth ---

/// Login, logout and login-form validation
#[must_use]
pub fn auth_suite() -> TestSuite {
    let mut suite = TestSuite::new("auth");
    for user in TestUser::ACCEPTED {
        suite.add_test(TestCase::new(format!("login lands on inventory: {}", user.username), move |driver| {
            login_lands_on_inventory(driver, user)
        }));
    }
    for invalid in InvalidCredentials::ALL {
        suite.add_test(TestCase::new(
            format!("login rejected: {}", invalid.label),
            move |driver| login_rejected(driver, invalid),
        ));
    }
    suite
        .with_test(TestCase::new("locked out user sees lockout", locked_out_user))
        .with_test(TestCase::new("error banner closes", error_banner_closes))
        .with_test(TestCase::new("logout returns to login", logout_returns_to_login))
        .with_test(TestCase::new("inventory is protected after logout", inventory_protected_after_logout))
        .with_test(TestCase::new("login fields clear", login_fields_clear))
}

async fn login_lands_on_inventory(driver: SharedDriver, user: TestUser) -> ProbeResult<()> {
    let inventory = login_as(&driver, &user).await?;
    inventory.wait_until_loaded().await?;
    expect_path(&inventory, paths::INVENTORY).await
}

async fn login_rejected(driver: SharedDriver, invalid: InvalidCredentials) -> ProbeResult<()> {
    let login = LoginPage::new(driver);
    login.navigate().await?;
    login.login(invalid.username, invalid.password).await?;
    check(Assertion::is_true(login.is_error_message_visible().await, "banner hidden"), "error banner")?;
    let message = login.error_message().await?.required("login error")?;
    check(Assertion::equals(&message.as_str(), &invalid.expected_error), "login error")?;
    check(Assertion::is_true(login.is_loaded().await?, "left the login page"), "location")
}

async fn locked_out_user(driver: SharedDriver) -> ProbeResult<()> {
    let login = LoginPage::new(driver);
    login.navigate().await?;
    login.login_as(&TestUser::LOCKED_OUT).await?;
    let message = login.error_message().await?.required("lockout error")?;
    check(Assertion::contains(&message, "locked out"), "lockout error")?;
    check(Assertion::equals(&message.as_str(), &errors::LOCKED_OUT), "lockout error")
}

async fn error_banner_closes(driver: SharedDriver) -> ProbeResult<()> {
    let login = LoginPage::new(driver);
    login.navigate().await?;
    login.login("", "").await?;
    check(Assertion::is_true(login.is_error_message_visible().await, "no banner"), "error banner")?;
    login.close_error_message().await?;
    check(Assertion::is_false(login.is_error_message_visible().await, "still shown"), "closed banner")
}

async fn logout_returns_to_login(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.nav().logout().await?;
    let login = LoginPage::new(driver);
    login.wait_until_loaded().await?;
    check(Assertion::is_true(login.is_login_button_enabled().await?, "login disabled"), "login button")
}

async fn inventory_protected_after_logout(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.nav().logout().await?;
    inventory.navigate().await?;
    let login = LoginPage::new(driver);
    check(Assertion::is_true(login.is_loaded().await?, "inventory reachable"), "redirect")?;
    let message = login.error_message().await?.required("protected page error")?;
    check(Assertion::contains(&message, paths::INVENTORY), "protected page error")
}

async fn login_fields_clear(driver: SharedDriver) -> ProbeResult<()> {
    let login = LoginPage::new(driver);
    login.navigate().await?;
    login.enter_username("standard_user").await?;
    login.enter_password("secret_sauce").await?;
    check(Assertion::equals(&login.username_value().await?.as_str(), &"standard_user"), "username")?;
    login.clear_username().await?;
    login.clear_password().await?;
    check(Assertion::equals(&login.username_value().await?, &String::new()), "cleared username")?;
    check(Assertion::equals(&login.password_value().await?, &String::new()), "cleared password")
}

// --- inventory ---

/// Listing, sorting, details page and add/remove from the listing
#[must_use]
pub fn inventory_suite() -> TestSuite {
    let mut suite = TestSuite::new("inventory")
        .with_test(TestCase::new("lists every product", lists_every_product))
        .with_test(TestCase::new("rows show name, description and price", rows_show_details));
    for option in SortOption::ALL {
        suite.add_test(TestCase::new(format!("sort {}", option.value()), move |driver| {
            sorts_products(driver, option)
        }));
    }
    suite
        .with_test(TestCase::new("details page matches catalog", details_page_matches_catalog))
        .with_test(TestCase::new("details page toggles cart", details_page_toggles_cart))
        .with_test(TestCase::new("add and remove restores badge", add_then_remove))
        .with_test(TestCase::new("add every product", add_every_product))
}

async fn lists_every_product(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    check(Assertion::equals(&inventory.product_count().await?, &Product::ALL.len()), "product count")?;
    let names = inventory.product_names().await?;
    let expected: Vec<String> = Product::ALL.iter().map(|p| p.display_name().to_string()).collect();
    check(Assertion::equals(&names, &expected), "default order")
}

async fn rows_show_details(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    for index in 0..inventory.product_count().await? {
        let row = inventory.product_details(index).await?;
        check(Assertion::is_false(row.name.is_empty(), "empty name"), "row name")?;
        check(Assertion::is_false(row.description.is_empty(), "empty description"), "row description")?;
        check(Assertion::is_true(row.price > 0.0, "non-positive price"), "row price")?;
    }
    Ok(())
}

async fn sorts_products(driver: SharedDriver, option: SortOption) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.sort_products(option).await?;
    check(Assertion::equals(&inventory.current_sort_option().await?, &option), "selected sort")?;
    let names = inventory.product_names().await?;
    let prices = inventory.product_prices().await?;
    let ordered = match option {
        SortOption::NameAsc => Assertion::non_decreasing(&names),
        SortOption::NameDesc => Assertion::non_increasing(&names),
        SortOption::PriceAsc => Assertion::non_decreasing(&prices),
        SortOption::PriceDesc => Assertion::non_increasing(&prices),
    };
    check(ordered, option.label())
}

async fn details_page_matches_catalog(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.click_product_by_name(Product::Backpack.display_name()).await?;
    let details = ProductDetailsPage::new(driver);
    details.wait_until_loaded().await?;
    let shown = details.details().await?;
    check(Assertion::equals(&shown.name.as_str(), &Product::Backpack.display_name()), "name")?;
    check(Assertion::money_eq(shown.price, Product::Backpack.price()), "price")?;
    details.back_to_products().await?;
    inventory.wait_until_loaded().await
}

async fn details_page_toggles_cart(driver: SharedDriver) -> ProbeResult<()> {
    logged_in(&driver).await?;
    let details = ProductDetailsPage::new(driver);
    details.navigate_to(Product::BikeLight).await?;
    details.add_to_cart().await?;
    check(Assertion::is_true(details.is_product_in_cart().await?, "not added"), "details toggle")?;
    check(Assertion::equals(&details.nav().cart_item_count().await, &1), "badge")?;
    details.remove_from_cart().await?;
    check(Assertion::is_false(details.is_product_in_cart().await?, "not removed"), "details toggle")?;
    check(Assertion::is_false(details.nav().is_cart_badge_visible().await, "badge shown"), "badge")
}

async fn add_then_remove(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    let before = inventory.nav().cart_item_count().await;
    inventory.add_item_to_cart(Product::Onesie).await?;
    check(Assertion::equals(&inventory.nav().cart_item_count().await, &(before + 1)), "badge after add")?;
    inventory.remove_item_from_cart(Product::Onesie).await?;
    check(Assertion::equals(&inventory.nav().cart_item_count().await, &before), "badge after remove")?;
    check(Assertion::is_false(inventory.is_item_in_cart(Product::Onesie).await?, "still in cart"), "cart")
}

async fn add_every_product(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.add_multiple_items_to_cart(&Product::ALL).await?;
    check(Assertion::equals(&inventory.nav().cart_item_count().await, &6), "badge")?;
    for product in Product::ALL {
        check(Assertion::is_true(inventory.is_item_in_cart(product).await?, product.display_name()), "in cart")?;
    }
    Ok(())
}

// --- cart ---

/// Cart contents, removal and persistence
#[must_use]
pub fn cart_suite() -> TestSuite {
    TestSuite::new("cart")
        .with_test(TestCase::new("empty cart has no rows and no badge", empty_cart))
        .with_test(TestCase::new("backpack appears in cart", backpack_in_cart))
        .with_test(TestCase::new("rows carry catalog prices", cart_prices_and_subtotal))
        .with_test(TestCase::new("row details", cart_row_details))
        .with_test(TestCase::new("remove one item", remove_one_item))
        .with_test(TestCase::new("remove all items", remove_all_items))
        .with_test(TestCase::new("cart survives navigation", cart_survives_navigation))
        .with_test(TestCase::new("continue shopping", continue_shopping))
        .with_test(TestCase::new("checkout from cart", checkout_from_cart))
}

async fn empty_cart(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[]).await?;
    check(Assertion::is_true(cart.is_cart_empty().await?, "rows present"), "empty cart")?;
    check(Assertion::is_false(cart.nav().is_cart_badge_visible().await, "badge shown"), "badge")
}

async fn backpack_in_cart(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::Backpack]).await?;
    let names = cart.cart_item_names().await?;
    check(Assertion::has_length(&names, 1), "cart rows")?;
    check(Assertion::contains(&names[0], "Backpack"), "cart row")?;
    check(Assertion::is_true(cart.is_item_in_cart("Backpack").await?, "missing"), "cart lookup")?;
    check(Assertion::is_false(cart.is_item_in_cart("Onesie").await?, "unexpected"), "cart lookup")
}

async fn cart_prices_and_subtotal(driver: SharedDriver) -> ProbeResult<()> {
    let products = [Product::Backpack, Product::BikeLight, Product::Onesie];
    let cart = on_cart_with(&driver, &products).await?;
    let prices = cart.cart_item_prices().await?;
    let expected: Vec<f64> = products.iter().map(|p| p.price()).collect();
    for (shown, listed) in prices.iter().zip(&expected) {
        check(Assertion::money_eq(*shown, *listed), "row price")?;
    }
    check(Assertion::money_eq(cart.cart_subtotal().await?, sum_prices(&expected)), "subtotal")?;
    check(Assertion::equals(&(cart.nav().cart_item_count().await as usize), &products.len()), "badge")
}

async fn cart_row_details(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::FleeceJacket]).await?;
    let row = cart.cart_item_details(0).await?;
    check(Assertion::equals(&row.name.as_str(), &Product::FleeceJacket.display_name()), "name")?;
    check(Assertion::money_eq(row.price, Product::FleeceJacket.price()), "price")?;
    check(Assertion::equals(&row.quantity, &1), "quantity")
}

async fn remove_one_item(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::Backpack, Product::BikeLight]).await?;
    cart.remove_item_by_name(Product::Backpack).await?;
    check(Assertion::equals(&cart.cart_item_count().await?, &1), "rows")?;
    check(Assertion::equals(&cart.nav().cart_item_count().await, &1), "badge")?;
    check(Assertion::is_false(cart.is_item_in_cart("Backpack").await?, "still listed"), "removed row")
}

async fn remove_all_items(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::Backpack, Product::BikeLight, Product::Onesie]).await?;
    cart.remove_all_items().await?;
    check(Assertion::is_true(cart.is_cart_empty().await?, "rows left"), "empty cart")?;
    check(Assertion::is_false(cart.nav().is_cart_badge_visible().await, "badge shown"), "badge")
}

async fn cart_survives_navigation(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::BoltTShirt, Product::RedTShirt]).await?;
    cart.continue_shopping().await?;
    ProductDetailsPage::new(driver.clone())
        .navigate_to(Product::Onesie)
        .await?;
    cart.navigate().await?;
    check(Assertion::equals(&cart.cart_item_count().await?, &2), "rows after navigation")
}

async fn continue_shopping(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::Onesie]).await?;
    cart.continue_shopping().await?;
    expect_path(&cart, paths::INVENTORY).await
}

async fn checkout_from_cart(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::Onesie]).await?;
    cart.checkout().await?;
    CheckoutStepOnePage::new(driver).wait_until_loaded().await
}

// --- checkout ---

/// Checkout form validation, overview arithmetic and confirmation
#[must_use]
pub fn checkout_suite() -> TestSuite {
    let mut suite = TestSuite::new("checkout");
    for info in [
        CheckoutInfo::MISSING_FIRST_NAME,
        CheckoutInfo::MISSING_LAST_NAME,
        CheckoutInfo::MISSING_POSTAL_CODE,
    ] {
        if let Some(expected) = info.expected_error() {
            suite.add_test(TestCase::new(format!("step one rejects: {expected}"), move |driver| {
                step_one_rejects(driver, info, expected)
            }));
        }
    }
    suite
        .with_test(TestCase::new("step one keeps typed values", step_one_keeps_values))
        .with_test(TestCase::new("step one cancel returns to cart", step_one_cancel))
        .with_test(TestCase::new("overview totals add up", overview_totals))
        .with_test(TestCase::new("overview cancel returns to inventory", overview_cancel))
        .with_test(TestCase::new("complete checkout", complete_checkout))
        .with_test(TestCase::new("back home after order", back_home_after_order))
}

async fn step_one_rejects(driver: SharedDriver, info: CheckoutInfo, expected: &'static str) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::Backpack]).await?;
    cart.checkout().await?;
    let step_one = CheckoutStepOnePage::new(driver);
    step_one.complete_step_one(&info).await?;
    check(Assertion::is_true(step_one.is_loaded().await?, "advanced"), "step one")?;
    let message = step_one.error_message().await?.required("checkout error")?;
    check(Assertion::equals(&message.as_str(), &expected), "checkout error")
}

async fn step_one_keeps_values(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::Backpack]).await?;
    cart.checkout().await?;
    let step_one = CheckoutStepOnePage::new(driver);
    let info = CheckoutInfo::VALID;
    step_one
        .fill_checkout_info(info.first_name, info.last_name, info.postal_code)
        .await?;
    check(Assertion::equals(&step_one.first_name_value().await?.as_str(), &info.first_name), "first name")?;
    check(Assertion::equals(&step_one.last_name_value().await?.as_str(), &info.last_name), "last name")?;
    check(Assertion::equals(&step_one.postal_code_value().await?.as_str(), &info.postal_code), "postal code")?;
    check(Assertion::is_false(step_one.is_error_message_visible().await, "error shown"), "error banner")
}

async fn step_one_cancel(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::Backpack]).await?;
    cart.checkout().await?;
    CheckoutStepOnePage::new(driver).cancel().await?;
    cart.wait_until_loaded().await?;
    check(Assertion::equals(&cart.cart_item_count().await?, &1), "rows kept")
}

async fn overview_totals(driver: SharedDriver) -> ProbeResult<()> {
    let products = [Product::Backpack, Product::BikeLight];
    let overview = on_overview_with(&driver, &products).await?;
    let summary = overview.order_summary().await?;
    let expected_total = sum_prices(&products.map(Product::price));
    check(Assertion::money_eq(summary.item_total, expected_total), "item total")?;
    check(Assertion::money_eq(summary.tax, calculate_tax(summary.item_total)), "tax")?;
    check(Assertion::money_eq(summary.total, summary.item_total + summary.tax), "total")?;
    check(Assertion::equals(&summary.item_count, &products.len()), "rows")?;
    check(Assertion::equals(&summary.payment_info.as_str(), &PAYMENT_INFO), "payment")?;
    check(Assertion::equals(&summary.shipping_info.as_str(), &SHIPPING_INFO), "shipping")
}

async fn overview_cancel(driver: SharedDriver) -> ProbeResult<()> {
    let overview = on_overview_with(&driver, &[Product::Onesie]).await?;
    overview.cancel().await?;
    expect_path(&overview, paths::INVENTORY).await?;
    check(Assertion::equals(&overview.nav().cart_item_count().await, &1), "cart kept")
}

async fn complete_checkout(driver: SharedDriver) -> ProbeResult<()> {
    let overview = on_overview_with(&driver, &[Product::Backpack, Product::FleeceJacket]).await?;
    overview.finish().await?;
    let complete = CheckoutCompletePage::new(driver);
    complete.wait_until_loaded().await?;
    let url = complete.nav().current_url().await?;
    check(Assertion::equals(&CheckoutStep::from_url(&url), &Some(CheckoutStep::Complete)), "step")?;
    let header = complete.complete_header_text().await?.required("confirmation header")?;
    check(Assertion::contains(&header, messages::ORDER_COMPLETE), "confirmation header")?;
    let body = complete.complete_message_text().await?.required("confirmation text")?;
    check(Assertion::contains(&body, messages::ORDER_DISPATCHED), "confirmation text")?;
    check(Assertion::is_true(complete.verify_checkout_complete().await, "not thanked"), "confirmation")?;
    check(Assertion::is_false(complete.nav().is_cart_badge_visible().await, "badge shown"), "badge")
}

async fn back_home_after_order(driver: SharedDriver) -> ProbeResult<()> {
    let overview = on_overview_with(&driver, &[Product::Onesie]).await?;
    overview.finish().await?;
    let complete = CheckoutCompletePage::new(driver.clone());
    complete.back_home().await?;
    InventoryPage::new(driver).wait_until_loaded().await?;
    check(Assertion::equals(&complete.nav().cart_item_count().await, &0), "cart emptied")
}

// --- navigation ---

/// Menu, header, footer and browser history
#[must_use]
pub fn navigation_suite() -> TestSuite {
    TestSuite::new("navigation")
        .with_test(TestCase::new("menu opens and closes", menu_opens_and_closes))
        .with_test(TestCase::new("all items from cart", all_items_from_cart))
        .with_test(TestCase::new("reset app state empties cart", reset_app_state))
        .with_test(TestCase::new("reset app state on empty cart", reset_empty_cart))
        .with_test(
            TestCase::new("about leaves the storefront", about_leaves_storefront)
                .with_timeout(EXTERNAL_SCENARIO_TIMEOUT_MS),
        )
        .with_test(TestCase::new("page title", page_title))
        .with_test(TestCase::new("badge follows across pages", badge_across_pages))
        .with_test(TestCase::new("browser back and forward", back_and_forward))
        .with_test(TestCase::new("footer is shown", footer_is_shown))
        .with_test(TestCase::new("direct URLs", direct_urls))
}

async fn menu_opens_and_closes(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    let nav = inventory.nav();
    nav.open_menu().await?;
    for item in [Element::AllItemsLink, Element::AboutLink, Element::LogoutLink, Element::ResetAppLink] {
        check(Assertion::is_true(nav.is_menu_item_visible(item).await, item.name()), "menu item")?;
    }
    nav.close_menu().await?;
    check(Assertion::is_false(nav.is_menu_item_visible(Element::LogoutLink).await, "still open"), "menu")
}

async fn all_items_from_cart(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[]).await?;
    cart.nav().go_to_all_items().await?;
    expect_path(&cart, paths::INVENTORY).await
}

async fn reset_app_state(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.add_multiple_items_to_cart(&[Product::Backpack, Product::BikeLight]).await?;
    inventory.nav().reset_app_state().await?;
    check(Assertion::is_false(inventory.nav().is_cart_badge_visible().await, "badge shown"), "badge")?;
    check(Assertion::equals(&inventory.nav().cart_item_count().await, &0), "count")
}

async fn reset_empty_cart(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.nav().reset_app_state().await?;
    check(Assertion::is_false(inventory.nav().is_cart_badge_visible().await, "badge shown"), "badge")
}

async fn about_leaves_storefront(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.nav().open_about().await?;
    let url = inventory.nav().current_url().await?;
    check(Assertion::contains(&url, ABOUT_HOST), "about URL")
}

async fn page_title(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    let title = inventory.nav().page_title().await?;
    check(Assertion::equals(&title.as_str(), &PAGE_TITLE), "title")
}

async fn badge_across_pages(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.add_multiple_items_to_cart(&[Product::Backpack, Product::Onesie]).await?;
    let details = ProductDetailsPage::new(driver.clone());
    details.navigate_to(Product::RedTShirt).await?;
    check(Assertion::equals(&details.nav().cart_item_count().await, &2), "badge on details")?;
    details.nav().go_to_cart().await?;
    let cart = CartPage::new(driver);
    check(Assertion::equals(&cart.nav().cart_item_count().await, &2), "badge on cart")?;
    cart.remove_all_items().await?;
    check(Assertion::is_false(cart.nav().is_cart_badge_visible().await, "badge shown"), "badge after removal")
}

async fn back_and_forward(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.add_item_to_cart(Product::Backpack).await?;
    inventory.nav().go_to_cart().await?;
    driver.go_back().await?;
    inventory.wait_until_loaded().await?;
    driver.go_forward().await?;
    let cart = CartPage::new(driver);
    cart.wait_until_loaded().await?;
    check(Assertion::equals(&cart.cart_item_count().await?, &1), "rows after history")
}

async fn footer_is_shown(driver: SharedDriver) -> ProbeResult<()> {
    logged_in(&driver).await?;
    for link in [Element::SocialTwitter, Element::SocialFacebook, Element::SocialLinkedin] {
        check(Assertion::is_true(driver.is_visible(&link.locator()).await?, link.name()), "footer link")?;
    }
    let copy = driver
        .text_content(&Element::FooterCopy.locator())
        .await?
        .required("footer copy")?;
    check(Assertion::contains(&copy, "Sauce Labs"), "footer copy")
}

async fn direct_urls(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.nav().goto_path(paths::CART).await?;
    CartPage::new(driver.clone()).wait_until_loaded().await?;
    inventory
        .nav()
        .goto_path(&paths::inventory_item(Product::Onesie.id()))
        .await?;
    let details = ProductDetailsPage::new(driver);
    let name = details.product_name().await?;
    check(Assertion::equals(&name.as_str(), &Product::Onesie.display_name()), "details name")
}

// --- data layer ---

/// Web storage behind the cart and storefront state
#[must_use]
pub fn data_layer_suite() -> TestSuite {
    TestSuite::new("data_layer")
        .with_test(TestCase::new("cart persists as JSON ids", cart_persists_as_ids))
        .with_test(TestCase::new("cart survives reload", cart_survives_reload))
        .with_test(TestCase::new("seeded storage fills the cart", seeded_storage_fills_cart))
        .with_test(TestCase::new("reset app state clears storage", reset_clears_storage))
        .with_test(TestCase::new("listing and details agree", listing_and_details_agree))
        .with_test(TestCase::new("validation error keeps cart", validation_error_keeps_cart))
        .with_test(TestCase::new("empty cart can start checkout", empty_cart_checkout))
}

async fn stored_cart(driver: &SharedDriver) -> ProbeResult<Vec<u32>> {
    match driver.storage_get(StorageArea::Local, CART_STORAGE_KEY).await? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

async fn cart_persists_as_ids(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.add_multiple_items_to_cart(&[Product::Backpack, Product::BikeLight]).await?;
    let mut ids = stored_cart(&driver).await?;
    ids.sort_unstable();
    check(
        Assertion::equals(&ids, &vec![Product::BikeLight.id(), Product::Backpack.id()]),
        "stored cart",
    )
}

async fn cart_survives_reload(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.add_item_to_cart(Product::Backpack).await?;
    let before = inventory.nav().cart_item_count().await;
    driver.reload().await?;
    check(Assertion::equals(&inventory.nav().cart_item_count().await, &before), "badge after reload")
}

async fn seeded_storage_fills_cart(driver: SharedDriver) -> ProbeResult<()> {
    logged_in(&driver).await?;
    let ids = serde_json::to_string(&[Product::Onesie.id(), Product::FleeceJacket.id()])?;
    driver
        .storage_set(StorageArea::Local, CART_STORAGE_KEY, &ids)
        .await?;
    let cart = CartPage::new(driver);
    cart.navigate().await?;
    check(Assertion::equals(&cart.cart_item_count().await?, &2), "rows")?;
    check(Assertion::is_true(cart.is_item_in_cart("Fleece Jacket").await?, "missing"), "seeded row")
}

async fn reset_clears_storage(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    inventory.add_multiple_items_to_cart(&[Product::Backpack, Product::BikeLight]).await?;
    inventory.nav().reset_app_state().await?;
    check(Assertion::equals(&stored_cart(&driver).await?, &Vec::new()), "stored cart")
}

async fn listing_and_details_agree(driver: SharedDriver) -> ProbeResult<()> {
    let inventory = logged_in(&driver).await?;
    let listed = inventory.product_details(0).await?;
    inventory.click_product_by_name(&listed.name).await?;
    let details = ProductDetailsPage::new(driver).details().await?;
    check(Assertion::equals(&details.name, &listed.name), "name")?;
    check(Assertion::equals(&details.description, &listed.description), "description")?;
    check(Assertion::money_eq(details.price, listed.price), "price")
}

async fn validation_error_keeps_cart(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[Product::Backpack]).await?;
    let before = cart.nav().cart_item_count().await;
    cart.checkout().await?;
    let step_one = CheckoutStepOnePage::new(driver);
    step_one.click_continue().await?;
    let message = step_one.error_message().await?.required("checkout error")?;
    check(Assertion::contains_ignore_case(&message, "error"), "checkout error")?;
    step_one.cancel().await?;
    check(Assertion::equals(&(cart.cart_item_count().await? as u32), &before), "rows")
}

async fn empty_cart_checkout(driver: SharedDriver) -> ProbeResult<()> {
    let cart = on_cart_with(&driver, &[]).await?;
    check(Assertion::is_true(cart.is_cart_empty().await?, "rows present"), "empty cart")?;
    cart.checkout().await?;
    let url = cart.nav().current_url().await?;
    check(Assertion::equals(&CheckoutStep::from_url(&url), &Some(CheckoutStep::StepOne)), "step")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_lookup() {
        for name in SUITE_NAMES {
            assert_eq!(suite_by_name(name).unwrap().name, name);
        }
        assert!(matches!(suite_by_name("smoke"), Err(ProbeError::Config { .. })));
    }

    #[test]
    fn test_suites_are_populated() {
        let suites = all_suites();
        assert_eq!(suites.len(), SUITE_NAMES.len());
        assert!(suites.iter().all(|s| s.test_count() > 0));
        assert_eq!(auth_suite().test_count(), 5 + 4 + 5);
    }

    #[test]
    fn test_only_about_scenario_gets_extended_timeout() {
        let extended: Vec<String> = all_suites()
            .into_iter()
            .flat_map(|s| s.tests)
            .filter(|t| t.timeout_ms == EXTERNAL_SCENARIO_TIMEOUT_MS)
            .map(|t| t.name)
            .collect();
        assert_eq!(extended, vec!["about leaves the storefront".to_string()]);
    }

    #[test]
    fn test_case_names_are_unique_within_suites() {
        for suite in all_suites() {
            let mut names = suite.test_names();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(names.len(), before, "duplicate case in {}", suite.name);
        }
    }
}
