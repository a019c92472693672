//! Login and logout flows against the in-memory storefront.

mod common;

use common::{login_as, logged_in, storefront};
use sauce_probe::fixtures::{errors, paths, InvalidCredentials, TestUser};
use sauce_probe::pages::LoginPage;
use sauce_probe::{url_path, Observation, PageObject};

#[tokio::test]
async fn test_every_accepted_user_lands_on_inventory() {
    for user in TestUser::ACCEPTED {
        let (store, driver) = storefront();
        login_as(&driver, &user).await;
        let url = driver.current_url().await.unwrap();
        assert_eq!(url_path(&url), paths::INVENTORY, "{}", user.username);
        assert_eq!(store.session_user().unwrap(), Some(user.username));
    }
}

#[tokio::test]
async fn test_locked_out_user_sees_lockout() {
    let (store, driver) = storefront();
    let login = login_as(&driver, &TestUser::LOCKED_OUT).await;
    assert!(login.is_loaded().await.unwrap());
    assert!(login.is_error_message_visible().await);
    let message = login.error_message().await.unwrap().required("error").unwrap();
    assert!(message.contains("locked out"));
    assert_eq!(store.session_user().unwrap(), None);
}

#[tokio::test]
async fn test_invalid_credentials_show_exact_copy() {
    for invalid in InvalidCredentials::ALL {
        let (_store, driver) = storefront();
        let login = LoginPage::new(driver);
        login.navigate().await.unwrap();
        login.login(invalid.username, invalid.password).await.unwrap();
        assert_eq!(
            login.error_message().await.unwrap(),
            Observation::Present(invalid.expected_error.to_string()),
            "{}",
            invalid.label
        );
    }
}

#[tokio::test]
async fn test_logout_then_protected_page_bounces() {
    let (store, driver) = storefront();
    let inventory = logged_in(&driver).await;
    inventory.nav().logout().await.unwrap();
    assert_eq!(store.session_user().unwrap(), None);

    inventory.navigate().await.unwrap();
    let login = LoginPage::new(driver);
    assert!(login.is_loaded().await.unwrap());
    assert_eq!(
        login.error_message().await.unwrap(),
        Observation::Present(errors::protected_page(paths::INVENTORY))
    );
}

#[tokio::test]
async fn test_error_banner_can_be_dismissed() {
    let (_store, driver) = storefront();
    let login = LoginPage::new(driver);
    login.navigate().await.unwrap();
    login.click_login().await.unwrap();
    assert!(login.is_error_message_visible().await);
    login.close_error_message().await.unwrap();
    assert!(!login.is_error_message_visible().await);
    assert_eq!(login.error_message().await.unwrap(), Observation::Absent);
}
