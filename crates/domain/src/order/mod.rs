//! Order submission, relay and export.

mod checkout;
mod export;
mod relay;

pub use checkout::{
    CONFIRMATION_PATH, MAX_ORDER_QUANTITY, OrderConfirmation, OrderDraft, OrderService,
    REDIRECT_DELAY_MS,
};
pub use export::orders_to_csv;
pub use relay::{encode_uri_component, product_whatsapp_link, relay_text, whatsapp_link};
