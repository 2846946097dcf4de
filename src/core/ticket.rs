/// Third-party endpoint that renders QR code images
pub const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Pixel size of the QR code printed on a ticket
pub const TICKET_QR_SIZE: u32 = 150;

const FRAGMENT_LEN: usize = 4;

/// Entry-verification token stored on a booking.
///
/// Format `tkt-<userId fragment>-<eventId fragment>`. Not unique across
/// repeat bookings of the same event by the same user.
pub fn ticket_token(user_id: &str, event_id: &str) -> String {
    format!("tkt-{}-{}", fragment(user_id), fragment(event_id))
}

/// URL of a QR image encoding `data`
pub fn qr_code_url(data: &str, size: u32) -> String {
    format!(
        "{}?size={}x{}&data={}",
        QR_ENDPOINT,
        size,
        size,
        urlencoding::encode(data)
    )
}

// Char-based so multi-byte ids never split mid-codepoint
fn fragment(id: &str) -> String {
    id.chars().take(FRAGMENT_LEN).collect()
}
