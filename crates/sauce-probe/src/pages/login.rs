//! Login page.

use crate::driver::SharedDriver;
use crate::fixtures::{paths, TestUser};
use crate::page_object::{NavBar, PageObject};
use crate::result::{Observation, ProbeResult};
use crate::selectors::Element;
use tracing::debug;

/// The login form at `/`
#[derive(Debug, Clone)]
pub struct LoginPage {
    nav: NavBar,
}

impl PageObject for LoginPage {
    fn nav(&self) -> &NavBar {
        &self.nav
    }

    fn url_path(&self) -> &'static str {
        paths::LOGIN
    }

    fn page_name(&self) -> &'static str {
        "login"
    }
}

impl LoginPage {
    /// Bind the page to a driver
    #[must_use]
    pub fn new(driver: SharedDriver) -> Self {
        Self {
            nav: NavBar::new(driver),
        }
    }

    /// Open the login page
    pub async fn navigate(&self) -> ProbeResult<()> {
        self.nav.goto_path(paths::LOGIN).await
    }

    /// Fill both fields and submit. A failure leaves whatever was typed so far.
    pub async fn login(&self, username: &str, password: &str) -> ProbeResult<()> {
        debug!(username, "logging in");
        self.enter_username(username).await?;
        self.enter_password(password).await?;
        self.click_login().await
    }

    /// Log in with fixture credentials
    pub async fn login_as(&self, user: &TestUser) -> ProbeResult<()> {
        self.login(user.username, user.password).await
    }

    /// Type into the username field
    pub async fn enter_username(&self, username: &str) -> ProbeResult<()> {
        self.driver()
            .fill(&Element::UsernameInput.locator(), username)
            .await
    }

    /// Type into the password field
    pub async fn enter_password(&self, password: &str) -> ProbeResult<()> {
        self.driver()
            .fill(&Element::PasswordInput.locator(), password)
            .await
    }

    /// Submit the form
    pub async fn click_login(&self) -> ProbeResult<()> {
        self.driver().click(&Element::LoginButton.locator()).await
    }

    /// Empty the username field
    pub async fn clear_username(&self) -> ProbeResult<()> {
        self.driver().clear(&Element::UsernameInput.locator()).await
    }

    /// Empty the password field
    pub async fn clear_password(&self) -> ProbeResult<()> {
        self.driver().clear(&Element::PasswordInput.locator()).await
    }

    /// Current content of the username field
    pub async fn username_value(&self) -> ProbeResult<String> {
        self.driver()
            .input_value(&Element::UsernameInput.locator())
            .await
    }

    /// Current content of the password field
    pub async fn password_value(&self) -> ProbeResult<String> {
        self.driver()
            .input_value(&Element::PasswordInput.locator())
            .await
    }

    /// Whether the submit button accepts clicks
    pub async fn is_login_button_enabled(&self) -> ProbeResult<bool> {
        self.driver()
            .is_enabled(&Element::LoginButton.locator())
            .await
    }

    /// Text of the error banner
    pub async fn error_message(&self) -> ProbeResult<Observation<String>> {
        self.driver()
            .text_content(&Element::ErrorMessage.locator())
            .await
    }

    /// Whether the error banner is shown; false when it does not exist
    pub async fn is_error_message_visible(&self) -> bool {
        self.nav
            .visible_or_closed(&Element::ErrorMessage.locator())
            .await
    }

    /// Dismiss the error banner
    pub async fn close_error_message(&self) -> ProbeResult<()> {
        self.driver().click(&Element::ErrorButton.locator()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{errors, InvalidCredentials};
    use crate::storefront::MockStorefront;
    use std::sync::Arc;

    async fn login_page() -> LoginPage {
        let page = LoginPage::new(Arc::new(MockStorefront::new()));
        page.navigate().await.unwrap();
        page
    }

    #[tokio::test]
    async fn test_valid_login_leaves_page() {
        let page = login_page().await;
        assert!(page.is_loaded().await.unwrap());
        page.login_as(&TestUser::STANDARD).await.unwrap();
        assert!(!page.is_loaded().await.unwrap());
        assert!(!page.is_error_message_visible().await);
    }

    #[tokio::test]
    async fn test_locked_out_shows_error() {
        let page = login_page().await;
        page.login_as(&TestUser::LOCKED_OUT).await.unwrap();
        assert!(page.is_error_message_visible().await);
        assert_eq!(
            page.error_message().await.unwrap(),
            Observation::Present(errors::LOCKED_OUT.to_string())
        );
    }

    #[tokio::test]
    async fn test_close_error_message() {
        let page = login_page().await;
        let invalid = InvalidCredentials::EMPTY_PASSWORD;
        page.login(invalid.username, invalid.password).await.unwrap();
        assert!(page.is_error_message_visible().await);
        page.close_error_message().await.unwrap();
        assert!(!page.is_error_message_visible().await);
        assert_eq!(page.error_message().await.unwrap(), Observation::Absent);
    }

    #[tokio::test]
    async fn test_error_visibility_fails_closed_on_closed_page() {
        let page = login_page().await;
        page.login_as(&TestUser::LOCKED_OUT).await.unwrap();
        assert!(page.is_error_message_visible().await);
        page.driver().close().await.unwrap();
        assert!(!page.is_error_message_visible().await);
    }

    #[tokio::test]
    async fn test_field_values_and_clear() {
        let page = login_page().await;
        page.enter_username("standard_user").await.unwrap();
        page.enter_password("secret").await.unwrap();
        assert_eq!(page.username_value().await.unwrap(), "standard_user");
        assert_eq!(page.password_value().await.unwrap(), "secret");
        page.clear_username().await.unwrap();
        page.clear_password().await.unwrap();
        assert_eq!(page.username_value().await.unwrap(), "");
        assert_eq!(page.password_value().await.unwrap(), "");
        assert!(page.is_login_button_enabled().await.unwrap());
    }
}
