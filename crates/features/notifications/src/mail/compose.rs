//! Message templates. Every message has a plain-text body and an HTML body carrying the
//! same content.

use super::Email;
use atelier_kernel::domain::config::StorefrontConfig;
use atelier_kernel::domain::events::{ContactSubmitted, ProductRequested, QuoteRequested, QuoteUpdated};
use std::fmt::Write as _;

/// `123456` cents in `USD` becomes `USD 1,234.56`.
#[must_use]
pub fn format_price(cents: u64, currency: &str) -> String {
    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{currency} {grouped}.{:02}", cents % 100)
}

/// HTML-escapes a customer-supplied value. Bodies are built from the fixed [`Layout`]
/// below, so there is no template engine to escape for us.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Renders paragraphs and a key/value table into both bodies.
struct Layout<'a> {
    store: &'a StorefrontConfig,
    greeting: String,
    paragraphs: Vec<String>,
    details: Vec<(&'static str, String)>,
}

impl<'a> Layout<'a> {
    fn new(store: &'a StorefrontConfig, greeting: String) -> Self {
        Self { store, greeting, paragraphs: Vec::new(), details: Vec::new() }
    }

    fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    fn detail(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.details.push((label, value.into()));
        self
    }

    fn detail_opt(self, label: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.detail(label, value),
            None => self,
        }
    }

    fn render(self, to: &str, subject: String) -> Email {
        let mut text = format!("{}\n\n", self.greeting);
        let mut html = format!(
            "<div style=\"font-family:Georgia,serif;color:#1c1c1c\"><p>{}</p>",
            escape(&self.greeting)
        );

        for paragraph in &self.paragraphs {
            let _ = write!(text, "{paragraph}\n\n");
            let _ = write!(html, "<p>{}</p>", escape(paragraph));
        }
        if !self.details.is_empty() {
            html.push_str("<table cellpadding=\"4\">");
            for (label, value) in &self.details {
                let _ = writeln!(text, "{label}: {value}");
                let _ = write!(html, "<tr><th align=\"left\">{label}</th><td>{}</td></tr>", escape(value));
            }
            html.push_str("</table>");
            text.push('\n');
        }

        let _ = write!(text, "{}\n{}", self.store.name, self.store.base_url);
        let _ = write!(
            html,
            "<p><a href=\"{url}\">{name}</a></p></div>",
            url = escape(&self.store.base_url),
            name = escape(&self.store.name)
        );

        Email { to: to.to_owned(), subject, text, html }
    }
}

/// Sent to the customer right after a quote request is stored.
#[must_use]
pub fn quote_confirmation(store: &StorefrontConfig, quote: &QuoteRequested) -> Email {
    Layout::new(store, format!("Dear {},", quote.name))
        .paragraph(format!(
            "Thank you for your interest in the {}. Our specialists are reviewing your request and will \
             come back to you with a quote shortly.",
            quote.product_name
        ))
        .paragraph(format!(
            "You can follow your request at {}/quote/track with the reference below and this email address.",
            store.base_url.trim_end_matches('/')
        ))
        .detail("Reference", quote.reference_number.clone())
        .detail("Item", quote.product_name.clone())
        .render(&quote.email, format!("Your quote request {}", quote.reference_number))
}

/// Sent to the customer once a price has been quoted.
#[must_use]
pub fn quote_sent(store: &StorefrontConfig, quote: &QuoteUpdated) -> Email {
    let price = quote
        .quoted_price_cents
        .map_or_else(|| "on request".to_owned(), |cents| format_price(cents, &store.currency));

    Layout::new(store, format!("Dear {},", quote.name))
        .paragraph(format!("Your quote for the {} is ready.", quote.product_name))
        .paragraph("Reply to this email or contact our concierge to reserve the piece.")
        .detail("Reference", quote.reference_number.clone())
        .detail("Item", quote.product_name.clone())
        .detail("Price", price)
        .render(&quote.email, format!("Your quote {} is ready", quote.reference_number))
}

/// Back-office alert for a new quote request.
#[must_use]
pub fn admin_alert(store: &StorefrontConfig, admin_email: &str, quote: &QuoteRequested) -> Email {
    Layout::new(store, "New quote request".to_owned())
        .detail("Reference", quote.reference_number.clone())
        .detail("Item", quote.product_name.clone())
        .detail("Customer", quote.name.clone())
        .detail("Email", quote.email.clone())
        .detail_opt("Phone", quote.phone.as_deref())
        .detail_opt("Message", quote.message.as_deref())
        .render(admin_email, format!("[Quote] {} from {}", quote.product_name, quote.name))
}

/// Short admin SMS for a new quote request.
#[must_use]
pub fn quote_alert_sms(quote: &QuoteRequested) -> String {
    format!("New quote {}: {} for {} ({})", quote.reference_number, quote.product_name, quote.name, quote.email)
}

/// Back-office alert for a new sourcing request.
#[must_use]
pub fn product_request_alert(store: &StorefrontConfig, admin_email: &str, request: &ProductRequested) -> Email {
    Layout::new(store, "New product request".to_owned())
        .detail("Brand", request.brand.clone())
        .detail("Item", request.product_name.clone())
        .detail("Customer", request.name.clone())
        .detail("Email", request.email.clone())
        .detail_opt("Phone", request.phone.as_deref())
        .render(admin_email, format!("[Sourcing] {} {}", request.brand, request.product_name))
}

/// Back-office alert for a contact form message.
#[must_use]
pub fn contact_alert(store: &StorefrontConfig, admin_email: &str, message: &ContactSubmitted) -> Email {
    let subject = message.subject.as_deref().unwrap_or("Contact form");
    Layout::new(store, "New contact message".to_owned())
        .detail("From", message.name.clone())
        .detail("Email", message.email.clone())
        .detail("Subject", subject)
        .render(admin_email, format!("[Contact] {subject}"))
}
