//! Checkout flow against the in-memory storefront.

mod common;

use common::{cart_with, storefront};
use sauce_probe::fixtures::{messages, CheckoutInfo, TAX_RATE};
use sauce_probe::money::{approx_eq, round_cents};
use sauce_probe::pages::{
    CheckoutCompletePage, CheckoutStep, CheckoutStepOnePage, CheckoutStepTwoPage,
};
use sauce_probe::{Observation, PageObject, Product, SharedDriver};

async fn overview(driver: &SharedDriver, products: &[Product]) -> CheckoutStepTwoPage {
    let cart = cart_with(driver, products).await;
    cart.checkout().await.unwrap();
    CheckoutStepOnePage::new(driver.clone())
        .complete_step_one(&CheckoutInfo::VALID)
        .await
        .unwrap();
    CheckoutStepTwoPage::new(driver.clone())
}

#[tokio::test]
async fn test_totals_are_consistent_for_every_product() {
    for product in Product::ALL {
        let (_store, driver) = storefront();
        let summary = overview(&driver, &[product]).await.order_summary().await.unwrap();
        assert!(approx_eq(summary.item_total, product.price()));
        assert!(approx_eq(summary.tax, round_cents(summary.item_total * TAX_RATE)));
        assert!((summary.total - (summary.item_total + summary.tax)).abs() < 0.01);
        assert!(summary.is_consistent(), "{summary:?}");
    }
}

#[tokio::test]
async fn test_each_missing_field_blocks_step_one() {
    for info in [
        CheckoutInfo::MISSING_FIRST_NAME,
        CheckoutInfo::MISSING_LAST_NAME,
        CheckoutInfo::MISSING_POSTAL_CODE,
    ] {
        let (_store, driver) = storefront();
        let cart = cart_with(&driver, &[Product::Onesie]).await;
        cart.checkout().await.unwrap();
        let step_one = CheckoutStepOnePage::new(driver);
        step_one.complete_step_one(&info).await.unwrap();
        assert!(step_one.is_loaded().await.unwrap());
        assert_eq!(
            step_one.error_message().await.unwrap(),
            Observation::Present(info.expected_error().unwrap().to_string())
        );
    }
}

#[tokio::test]
async fn test_full_checkout_hides_badge() {
    let (store, driver) = storefront();
    let page = overview(&driver, &[Product::Backpack, Product::BikeLight, Product::Onesie]).await;
    assert_eq!(page.cart_item_count().await.unwrap(), 3);
    page.finish().await.unwrap();

    let complete = CheckoutCompletePage::new(driver);
    assert!(complete.is_order_complete().await.unwrap());
    let header = complete.complete_header_text().await.unwrap().or_default();
    assert!(header.contains(messages::ORDER_COMPLETE));
    assert!(complete.verify_checkout_complete().await);
    assert!(!complete.nav().is_cart_badge_visible().await);
    assert!(store.cart_ids().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancel_targets_per_step() {
    let (_store, driver) = storefront();
    let page = overview(&driver, &[Product::Backpack]).await;
    page.cancel().await.unwrap();
    let url = page.nav().current_url().await.unwrap();
    assert_eq!(CheckoutStep::StepTwo.on_cancel(), Some(sauce_probe::url_path(&url)));

    let cart = cart_with(&driver, &[]).await;
    cart.checkout().await.unwrap();
    CheckoutStepOnePage::new(driver.clone()).cancel().await.unwrap();
    let url = cart.nav().current_url().await.unwrap();
    assert_eq!(CheckoutStep::StepOne.on_cancel(), Some(sauce_probe::url_path(&url)));
}
