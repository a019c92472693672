//! Renders the storefront double's state into an element tree.
//!
//! Markup mirrors the hooks of the live storefront: the classes, ids and
//! `data-test` attributes are the same ones the selector registry targets.

use super::dom::{Action, Field, Node};
use super::state::{Route, StoreState};
use crate::catalog::{Product, SortOption};
use crate::fixtures::{messages, PAGE_TITLE, PAYMENT_INFO, SHIPPING_INFO};
use crate::money::{calculate_tax, format_price, round_cents, sum_prices};

const ABOUT_TITLE: &str = "Sauce Labs: Cross Browser Testing, Selenium Testing & Mobile Testing";

const ITEM_NOT_FOUND_DESC: &str = "We're sorry, but your call could not be completed as dialled. \
     Please check your number, and try your call again.";

/// Document title for the current page
pub(crate) fn title(state: &StoreState) -> String {
    match state.route {
        Route::Blank => String::new(),
        Route::External(_) => ABOUT_TITLE.to_string(),
        _ => PAGE_TITLE.to_string(),
    }
}

/// Element tree for the current page, rooted at a document node
pub(crate) fn render(state: &StoreState) -> Node {
    let body = match &state.route {
        Route::Blank => Node::new("body"),
        Route::Login => Node::new("body").child(login_page(state)),
        Route::Inventory => shell(
            state,
            "Products",
            Some(sort_select(state.sort)),
            inventory_list(state),
        ),
        Route::Item(id) => shell(state, "", Some(back_to_products()), product_details(state, id)),
        Route::Cart => shell(state, "Your Cart", None, cart_contents(state)),
        Route::CheckoutStepOne => shell(
            state,
            "Checkout: Your Information",
            None,
            checkout_info(state),
        ),
        Route::CheckoutStepTwo => shell(state, "Checkout: Overview", None, checkout_summary(state)),
        Route::CheckoutComplete => shell(
            state,
            "Checkout: Complete!",
            None,
            checkout_complete(),
        ),
        Route::NotFound(_) => Node::new("body").child(Node::new("h1").text("404 Not Found")),
        Route::External(_) => Node::new("body").child(
            Node::new("main").child(Node::new("h1").text("Sauce Labs")),
        ),
    };
    Node::new("#document").child(body)
}

// --- login ---

fn login_page(state: &StoreState) -> Node {
    let error = state.login.error.clone();
    let form = Node::new("form")
        .child(
            Node::div("form_group").child(
                Node::new("input")
                    .id("user-name")
                    .class("input_error form_input")
                    .data_test("username")
                    .value(state.login.username.clone())
                    .bind(Field::Username),
            ),
        )
        .child(
            Node::div("form_group").child(
                Node::new("input")
                    .id("password")
                    .class("input_error form_input")
                    .data_test("password")
                    .value(state.login.password.clone())
                    .bind(Field::Password),
            ),
        )
        .child(error_banner(error))
        .child(
            Node::new("input")
                .id("login-button")
                .class("submit-button btn_action")
                .data_test("login-button")
                .value("Login")
                .on_click(Action::Login),
        );

    Node::div("login_container")
        .child(Node::div("login_logo").text(PAGE_TITLE))
        .child(Node::div("login_wrapper").child(Node::div("login-box").child(form)))
        .child(
            Node::div("login_credentials_wrap").child(
                Node::div("login_credentials")
                    .data_test("login-credentials")
                    .child(Node::new("h4").text("Accepted usernames are:"))
                    .children(
                        crate::fixtures::TestUser::ALL
                            .iter()
                            .map(|u| Node::new("span").text(u.username)),
                    ),
            ),
        )
}

fn error_banner(error: Option<String>) -> Node {
    let container = Node::div("error-message-container");
    match error {
        Some(message) => container.class("error").child(
            Node::new("h3")
                .data_test("error")
                .text(message)
                .child(
                    Node::new("button")
                        .class("error-button")
                        .data_test("error-button")
                        .on_click(Action::CloseError),
                ),
        ),
        None => container,
    }
}

// --- shared chrome ---

fn shell(state: &StoreState, title: &str, secondary: Option<Node>, content: Node) -> Node {
    let count = state.cart_ids().len();
    let menu = Node::new("div")
        .id("menu_button_container")
        .child(
            Node::div("bm-burger-button").child(
                Node::new("button")
                    .id("react-burger-menu-btn")
                    .text("Open Menu")
                    .on_click(Action::OpenMenu),
            ),
        )
        .child(
            Node::div("bm-menu-wrap")
                .hidden_if(!state.menu_open)
                .child(
                    Node::div("bm-menu").child(
                        Node::new("nav")
                            .class("bm-item-list")
                            .child(menu_link("inventory_sidebar_link", "All Items", Action::AllItems))
                            .child(menu_link("about_sidebar_link", "About", Action::About))
                            .child(menu_link("logout_sidebar_link", "Logout", Action::Logout))
                            .child(menu_link("reset_sidebar_link", "Reset App State", Action::ResetApp)),
                    ),
                )
                .child(
                    Node::div("bm-cross-button").child(
                        Node::new("button")
                            .id("react-burger-cross-btn")
                            .text("Close Menu")
                            .on_click(Action::CloseMenu),
                    ),
                ),
        );

    let cart_link = Node::new("a")
        .class("shopping_cart_link")
        .data_test("shopping-cart-link")
        .child_if(count > 0, || {
            Node::new("span")
                .class("shopping_cart_badge")
                .data_test("shopping-cart-badge")
                .text(count.to_string())
        })
        .on_click(Action::OpenCart);

    let mut secondary_header = Node::div("header_secondary_container")
        .child(Node::new("span").class("title").data_test("title").text(title));
    if let Some(extra) = secondary {
        secondary_header = secondary_header.child(extra);
    }

    Node::new("body").child(
        Node::div("page_wrapper")
            .id("page_wrapper")
            .child(
                Node::new("div")
                    .id("contents_wrapper")
                    .child(
                        Node::div("header_container")
                            .id("header_container")
                            .child(
                                Node::div("primary_header")
                                    .child(menu)
                                    .child(Node::div("header_label").child(Node::div("app_logo").text(PAGE_TITLE)))
                                    .child(
                                        Node::div("shopping_cart_container")
                                            .id("shopping_cart_container")
                                            .child(cart_link),
                                    ),
                            )
                            .child(secondary_header),
                    )
                    .child(content),
            )
            .child(footer()),
    )
}

fn menu_link(id: &'static str, label: &'static str, action: Action) -> Node {
    Node::new("a")
        .id(id)
        .class("bm-item menu-item")
        .data_test(id.replace('_', "-"))
        .text(label)
        .on_click(action)
}

fn footer() -> Node {
    Node::new("footer")
        .class("footer")
        .child(
            Node::new("ul")
                .class("social")
                .child(Node::new("li").class("social_twitter").child(Node::new("a").text("Twitter")))
                .child(Node::new("li").class("social_facebook").child(Node::new("a").text("Facebook")))
                .child(Node::new("li").class("social_linkedin").child(Node::new("a").text("LinkedIn"))),
        )
        .child(
            Node::div("footer_copy")
                .data_test("footer-copy")
                .text("\u{a9} 2025 Sauce Labs. All Rights Reserved. Terms of Service | Privacy Policy"),
        )
}

fn back_to_products() -> Node {
    Node::new("button")
        .id("back-to-products")
        .class("btn btn_secondary back btn_large inventory_details_back_button")
        .data_test("back-to-products")
        .text("Back to products")
        .on_click(Action::BackToProducts)
}

// --- inventory ---

fn sort_select(current: SortOption) -> Node {
    Node::new("select")
        .class("product_sort_container")
        .data_test("product-sort-container")
        .value(current.value())
        .bind(Field::Sort)
        .children(
            SortOption::ALL
                .iter()
                .map(|o| Node::new("option").value(o.value()).text(o.label())),
        )
}

/// Products in the order the dropdown selection implies
fn sorted_products(sort: SortOption) -> Vec<Product> {
    let mut products = Product::ALL.to_vec();
    match sort {
        SortOption::NameAsc => products.sort_by_key(|p| p.display_name()),
        SortOption::NameDesc => {
            products.sort_by_key(|p| p.display_name());
            products.reverse();
        }
        SortOption::PriceAsc => products.sort_by(|a, b| a.price().total_cmp(&b.price())),
        SortOption::PriceDesc => products.sort_by(|a, b| b.price().total_cmp(&a.price())),
    }
    products
}

fn inventory_list(state: &StoreState) -> Node {
    let items = sorted_products(state.sort).into_iter().map(|product| {
        let id = product.id();
        let button = if state.in_cart(product) {
            Node::new("button")
                .class("btn btn_secondary btn_small btn_inventory")
                .data_test(format!("remove-{}", product.key()))
                .text("Remove")
                .on_click(Action::RemoveFromCart(product))
        } else {
            Node::new("button")
                .class("btn btn_primary btn_small btn_inventory")
                .data_test(format!("add-to-cart-{}", product.key()))
                .text("Add to cart")
                .on_click(Action::AddToCart(product))
        };
        Node::div("inventory_item")
            .data_test("inventory-item")
            .child(
                Node::div("inventory_item_img").child(
                    Node::new("a")
                        .id(format!("item_{id}_img_link"))
                        .child(Node::new("img").class("inventory_item_img"))
                        .on_click(Action::OpenProduct(product)),
                ),
            )
            .child(
                Node::div("inventory_item_description")
                    .child(
                        Node::div("inventory_item_label")
                            .child(
                                Node::new("a")
                                    .id(format!("item_{id}_title_link"))
                                    .child(
                                        Node::div("inventory_item_name")
                                            .data_test("inventory-item-name")
                                            .text(product.display_name()),
                                    )
                                    .on_click(Action::OpenProduct(product)),
                            )
                            .child(
                                Node::div("inventory_item_desc")
                                    .data_test("inventory-item-desc")
                                    .text(product.description()),
                            ),
                    )
                    .child(
                        Node::div("pricebar")
                            .child(
                                Node::div("inventory_item_price")
                                    .data_test("inventory-item-price")
                                    .text(format_price(product.price())),
                            )
                            .child(button),
                    ),
            )
    });
    Node::new("div")
        .id("inventory_container")
        .child(Node::div("inventory_list").data_test("inventory-list").children(items))
}

// --- product details ---

fn product_details(state: &StoreState, id: &str) -> Node {
    let product = id.parse::<u32>().ok().and_then(Product::from_id);
    let body = match product {
        Some(product) => {
            let in_cart = state.in_cart(product);
            Node::div("inventory_details_desc_container")
                .child(
                    Node::div("inventory_details_name large_size")
                        .data_test("inventory-item-name")
                        .text(product.display_name()),
                )
                .child(
                    Node::div("inventory_details_desc large_size")
                        .data_test("inventory-item-desc")
                        .text(product.description()),
                )
                .child(
                    Node::div("inventory_details_price")
                        .data_test("inventory-item-price")
                        .text(format_price(product.price())),
                )
                .child(
                    Node::new("button")
                        .id(if in_cart { "remove" } else { "add-to-cart" })
                        .class("btn btn_primary btn_small btn_inventory")
                        .data_test(if in_cart { "remove" } else { "add-to-cart" })
                        .text(if in_cart { "Remove" } else { "Add to cart" })
                        .on_click(Action::ToggleDetails(product)),
                )
        }
        None => Node::div("inventory_details_desc_container")
            .child(Node::div("inventory_details_name large_size").text("ITEM NOT FOUND"))
            .child(Node::div("inventory_details_desc large_size").text(ITEM_NOT_FOUND_DESC)),
    };
    Node::div("inventory_details")
        .id("inventory_item_container")
        .child(Node::div("inventory_details_container").child(body))
}

// --- cart & checkout ---

fn cart_row(product: Product, removable: bool) -> Node {
    let id = product.id();
    let mut pricebar = Node::div("item_pricebar").child(
        Node::div("inventory_item_price")
            .data_test("inventory-item-price")
            .text(format_price(product.price())),
    );
    if removable {
        pricebar = pricebar.child(
            Node::new("button")
                .class("btn btn_secondary btn_small cart_button")
                .data_test(format!("remove-{}", product.key()))
                .text("Remove")
                .on_click(Action::RemoveFromCart(product)),
        );
    }
    Node::div("cart_item")
        .data_test("inventory-item")
        .child(Node::div("cart_quantity").data_test("item-quantity").text("1"))
        .child(
            Node::div("cart_item_label")
                .child(
                    Node::new("a")
                        .id(format!("item_{id}_title_link"))
                        .child(
                            Node::div("inventory_item_name")
                                .data_test("inventory-item-name")
                                .text(product.display_name()),
                        )
                        .on_click(Action::OpenProduct(product)),
                )
                .child(
                    Node::div("inventory_item_desc")
                        .data_test("inventory-item-desc")
                        .text(product.description()),
                )
                .child(pricebar),
        )
}

fn cart_list(state: &StoreState, removable: bool) -> Node {
    Node::div("cart_list")
        .data_test("cart-list")
        .child(Node::div("cart_quantity_label").text("QTY"))
        .child(Node::div("cart_desc_label").text("Description"))
        .children(state.cart().into_iter().map(|p| cart_row(p, removable)))
}

fn cart_contents(state: &StoreState) -> Node {
    Node::div("cart_contents_container")
        .id("cart_contents_container")
        .child(cart_list(state, true))
        .child(
            Node::div("cart_footer")
                .child(
                    Node::new("button")
                        .id("continue-shopping")
                        .class("btn btn_secondary back btn_medium")
                        .data_test("continue-shopping")
                        .text("Continue Shopping")
                        .on_click(Action::ContinueShopping),
                )
                .child(
                    Node::new("button")
                        .id("checkout")
                        .class("btn btn_action btn_medium checkout_button")
                        .data_test("checkout")
                        .text("Checkout")
                        .on_click(Action::Checkout),
                ),
        )
}

fn checkout_info(state: &StoreState) -> Node {
    let form = &state.checkout;
    let input = |id: &'static str, data_test: &'static str, value: &str, field: Field| {
        Node::div("form_group").child(
            Node::new("input")
                .id(id)
                .class("input_error form_input")
                .data_test(data_test)
                .value(value)
                .bind(field),
        )
    };
    Node::new("div").id("checkout_info_container").child(
        Node::div("checkout_info_wrapper").child(
            Node::new("form")
                .child(
                    Node::div("checkout_info")
                        .child(input("first-name", "firstName", form.first_name.as_str(), Field::FirstName))
                        .child(input("last-name", "lastName", form.last_name.as_str(), Field::LastName))
                        .child(input("postal-code", "postalCode", form.postal_code.as_str(), Field::PostalCode))
                        .child(error_banner(form.error.clone())),
                )
                .child(
                    Node::div("checkout_buttons")
                        .child(
                            Node::new("button")
                                .id("cancel")
                                .class("btn btn_secondary back btn_medium cart_cancel_link")
                                .data_test("cancel")
                                .text("Cancel")
                                .on_click(Action::Cancel),
                        )
                        .child(
                            Node::new("input")
                                .id("continue")
                                .class("submit-button btn btn_primary cart_button btn_action")
                                .data_test("continue")
                                .value("Continue")
                                .on_click(Action::ContinueCheckout),
                        ),
                ),
        ),
    )
}

fn checkout_summary(state: &StoreState) -> Node {
    let prices: Vec<f64> = state.cart().iter().map(|p| p.price()).collect();
    let subtotal = sum_prices(&prices);
    let tax = calculate_tax(subtotal);
    let total = round_cents(subtotal + tax);
    let label = |class: &'static str, data_test: &'static str, text: String| {
        Node::div(class).data_test(data_test).text(text)
    };
    Node::new("div").id("checkout_summary_container").child(
        Node::div("checkout_summary_container")
            .child(cart_list(state, false))
            .child(
                Node::div("summary_info")
                    .child(label("summary_info_label", "payment-info-label", "Payment Information:".into()))
                    .child(label("summary_value_label", "payment-info-value", PAYMENT_INFO.into()))
                    .child(label("summary_info_label", "shipping-info-label", "Shipping Information:".into()))
                    .child(label("summary_value_label", "shipping-info-value", SHIPPING_INFO.into()))
                    .child(label("summary_info_label", "total-info-label", "Price Total".into()))
                    .child(label(
                        "summary_subtotal_label",
                        "subtotal-label",
                        format!("Item total: {}", format_price(subtotal)),
                    ))
                    .child(label("summary_tax_label", "tax-label", format!("Tax: {}", format_price(tax))))
                    .child(label(
                        "summary_total_label",
                        "total-label",
                        format!("Total: {}", format_price(total)),
                    ))
                    .child(
                        Node::div("cart_footer")
                            .child(
                                Node::new("button")
                                    .id("cancel")
                                    .class("btn btn_secondary back btn_medium cart_cancel_link")
                                    .data_test("cancel")
                                    .text("Cancel")
                                    .on_click(Action::Cancel),
                            )
                            .child(
                                Node::new("button")
                                    .id("finish")
                                    .class("btn btn_action btn_medium cart_button")
                                    .data_test("finish")
                                    .text("Finish")
                                    .on_click(Action::Finish),
                            ),
                    ),
            ),
    )
}

fn checkout_complete() -> Node {
    Node::new("div")
        .id("checkout_complete_container")
        .class("checkout_complete_container")
        .child(Node::new("img").class("pony_express"))
        .child(
            Node::new("h2")
                .class("complete-header")
                .data_test("complete-header")
                .text(messages::ORDER_COMPLETE),
        )
        .child(
            Node::div("complete-text")
                .data_test("complete-text")
                .text(messages::ORDER_DISPATCHED),
        )
        .child(
            Node::new("button")
                .id("back-to-products")
                .class("btn btn_primary btn_small")
                .data_test("back-to-products")
                .text("Back Home")
                .on_click(Action::BackToProducts),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_sort_keeps_name_order_for_ties() {
        let ascending = sorted_products(SortOption::PriceAsc);
        assert_eq!(ascending.first(), Some(&Product::Onesie));
        let bolt = ascending.iter().position(|p| *p == Product::BoltTShirt);
        let red = ascending.iter().position(|p| *p == Product::RedTShirt);
        assert!(bolt < red);

        let descending = sorted_products(SortOption::PriceDesc);
        assert_eq!(descending.first(), Some(&Product::FleeceJacket));
        assert_eq!(descending.last(), Some(&Product::Onesie));
    }

    #[test]
    fn test_name_sort_orders() {
        assert_eq!(sorted_products(SortOption::NameAsc), Product::ALL.to_vec());
        let mut reversed = Product::ALL.to_vec();
        reversed.reverse();
        assert_eq!(sorted_products(SortOption::NameDesc), reversed);
    }
}
