use crate::core::ticket::qr_code_url;
use crate::models::{Event, PaymentIntentResponse};

/// Pixel size of the QR code shown on the payment screen
pub const PAYMENT_QR_SIZE: u32 = 200;

pub const CURRENCY: &str = "INR";

/// UPI deep link for paying `amount` to `upi_id`
pub fn upi_payment_link(upi_id: &str, payee: &str, amount: f64, event_title: &str) -> String {
    format!(
        "upi://pay?pa={}&pn={}&am={:.2}&cu={}&tn={}",
        upi_id,
        urlencoding::encode(payee),
        amount,
        CURRENCY,
        urlencoding::encode(&format!("Ticket for {}", event_title))
    )
}

/// Payment instructions for booking `event`; free events need none
pub fn payment_intent(event: &Event, upi_id: &str, payee: &str) -> PaymentIntentResponse {
    if event.is_free() {
        return PaymentIntentResponse {
            event_id: event.id.clone(),
            required: false,
            amount: 0.0,
            currency: CURRENCY.to_string(),
            upi_link: None,
            qr_code_url: None,
        };
    }

    let link = upi_payment_link(upi_id, payee, event.price, &event.title);

    PaymentIntentResponse {
        event_id: event.id.clone(),
        required: true,
        amount: event.price,
        currency: CURRENCY.to_string(),
        qr_code_url: Some(qr_code_url(&link, PAYMENT_QR_SIZE)),
        upi_link: Some(link),
    }
}
