//! Checkout step one: buyer information.

use super::CheckoutStep;
use crate::driver::SharedDriver;
use crate::fixtures::CheckoutInfo;
use crate::page_object::{NavBar, PageObject};
use crate::result::{Observation, ProbeResult};
use crate::selectors::Element;
use tracing::debug;

/// The information form at `/checkout-step-one.html`
#[derive(Debug, Clone)]
pub struct CheckoutStepOnePage {
    nav: NavBar,
}

impl PageObject for CheckoutStepOnePage {
    fn nav(&self) -> &NavBar {
        &self.nav
    }

    fn url_path(&self) -> &'static str {
        CheckoutStep::StepOne.path()
    }

    fn page_name(&self) -> &'static str {
        "checkout step one"
    }
}

impl CheckoutStepOnePage {
    /// Bind the page to a driver
    #[must_use]
    pub fn new(driver: SharedDriver) -> Self {
        Self {
            nav: NavBar::new(driver),
        }
    }

    /// Open the form directly
    pub async fn navigate(&self) -> ProbeResult<()> {
        self.nav.goto_path(CheckoutStep::StepOne.path()).await
    }

    /// Fill the three fields in form order
    pub async fn fill_checkout_info(
        &self,
        first_name: &str,
        last_name: &str,
        postal_code: &str,
    ) -> ProbeResult<()> {
        debug!(first_name, last_name, postal_code, "filling checkout info");
        let driver = self.driver();
        driver
            .fill(&Element::FirstNameInput.locator(), first_name)
            .await?;
        driver
            .fill(&Element::LastNameInput.locator(), last_name)
            .await?;
        driver
            .fill(&Element::PostalCodeInput.locator(), postal_code)
            .await
    }

    /// Fill the form from a fixture and continue
    pub async fn complete_step_one(&self, info: &CheckoutInfo) -> ProbeResult<()> {
        self.fill_checkout_info(info.first_name, info.last_name, info.postal_code)
            .await?;
        self.click_continue().await
    }

    /// Submit the form
    pub async fn click_continue(&self) -> ProbeResult<()> {
        self.driver().click(&Element::ContinueButton.locator()).await
    }

    /// Leave checkout; lands on the cart
    pub async fn cancel(&self) -> ProbeResult<()> {
        self.driver().click(&Element::CancelButton.locator()).await
    }

    /// Content of the first name field
    pub async fn first_name_value(&self) -> ProbeResult<String> {
        self.driver()
            .input_value(&Element::FirstNameInput.locator())
            .await
    }

    /// Content of the last name field
    pub async fn last_name_value(&self) -> ProbeResult<String> {
        self.driver()
            .input_value(&Element::LastNameInput.locator())
            .await
    }

    /// Content of the postal code field
    pub async fn postal_code_value(&self) -> ProbeResult<String> {
        self.driver()
            .input_value(&Element::PostalCodeInput.locator())
            .await
    }

    /// Validation message
    pub async fn error_message(&self) -> ProbeResult<Observation<String>> {
        self.driver()
            .text_content(&Element::ErrorMessage.locator())
            .await
    }

    /// Whether a validation message is shown; false when it does not exist
    pub async fn is_error_message_visible(&self) -> bool {
        self.nav
            .visible_or_closed(&Element::ErrorMessage.locator())
            .await
    }
}
