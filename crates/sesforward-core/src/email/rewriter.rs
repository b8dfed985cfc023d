/// Header rewrite applied to every forwarded message
use crate::email::encoding::{encode_address_list, encode_unstructured, format_mailbox};
use crate::email::{MailEnvelope, RewriteError};
use crate::models::MailConfig;
use crate::utils::logging::{redact_email, redact_subject};

/// Rewrites sender, recipient, bounce path, reply-to and subject
///
/// The original `From`, `To` and `Subject` are captured before any header is
/// touched: `Reply-To` receives the original sender and the subject becomes
/// `Fwd: (<original To>) <original Subject>`. Every rewritten header is
/// emitted as ASCII: raw 8-bit text from the original is carried over as
/// encoded-words. Rewriting an already rewritten message is not a no-op; it
/// captures whatever is present at call time.
pub fn rewrite_mail(raw: &[u8], config: &MailConfig) -> Result<Vec<u8>, RewriteError> {
    let mut envelope = MailEnvelope::parse(raw)?;

    let current_subject = envelope.header("Subject").unwrap_or_default();
    let current_from = envelope.header("From").unwrap_or_default();
    let current_to = envelope.header("To").unwrap_or_default();

    // SES only accepts verified identities as sender
    envelope.set_header(
        "From",
        &format_mailbox(&config.forward_as_name, &config.forward_as_mail),
    )?;
    envelope.set_header(
        "To",
        &format_mailbox(&config.forward_to_name, &config.forward_to_mail),
    )?;
    envelope.set_header("Return-Path", &config.bounce_path)?;
    envelope.set_header("Reply-To", &encode_address_list(&current_from))?;
    envelope.set_header(
        "Subject",
        &encode_unstructured(&format!("Fwd: ({}) {}", current_to, current_subject)),
    )?;

    tracing::debug!(
        original_from = %redact_email(&current_from),
        original_to = %redact_email(&current_to),
        subject = %redact_subject(&current_subject),
        "Rewrote mail headers"
    );

    envelope.encode()
}
