/// Application constants
///
/// This module contains all hardcoded values used throughout the application.
// ============================================================================
// Storage Constants
// ============================================================================
/// Prefix under which the SES receipt rule stores inbound messages
pub const EMAIL_KEY_PREFIX: &str = "emails/";

// ============================================================================
// SES Constants
// ============================================================================

/// Configuration set every forwarded message is sent under
pub const SES_CONFIGURATION_SET: &str = "mailing-default";

// ============================================================================
// Environment Variables
// ============================================================================

pub const ENV_MAIL_BUCKET: &str = "MAIL_BUCKET";
pub const ENV_BOUNCE_PATH: &str = "FORWARD_BOUNCE_PATH";
pub const ENV_FORWARD_AS_NAME: &str = "FORWARD_AS_NAME";
pub const ENV_FORWARD_AS_EMAIL: &str = "FORWARD_AS_EMAIL";
pub const ENV_FORWARD_TO_NAME: &str = "FORWARD_TO_NAME";
pub const ENV_FORWARD_TO_EMAIL: &str = "FORWARD_TO_EMAIL";

// ============================================================================
// Header Limits (RFC 5322 section 2.1.1)
// ============================================================================

/// Preferred maximum line length, excluding CRLF
pub const HEADER_FOLD_WIDTH: usize = 78;

/// Hard maximum line length, excluding CRLF
pub const MAX_HEADER_LINE_LENGTH: usize = 998;

/// Maximum UTF-8 bytes carried by one RFC 2047 encoded-word
///
/// 45 bytes encode to 60 base64 characters; with the `=?UTF-8?B?` / `?=`
/// framing the word stays under the 75 character limit.
pub const ENCODED_WORD_CHUNK_BYTES: usize = 45;
