//! Translation of diagnostic codes into user-facing messages.
//!
//! The table is closed: codes not listed here get the generic fallback.

use common::{Diagnostic, codes};
use serde_json::Value;

/// Shown for store failures a retry may fix.
pub const RETRY_MESSAGE: &str =
    "We could not reach the inventory system right now. Please try again in a moment.";

/// Shown for anything the table does not recognise.
pub const FALLBACK_MESSAGE: &str = "Something went wrong while placing your order.";

/// Returns true for codes the message table has an entry for.
pub fn is_known(code: &str) -> bool {
    matches!(
        code,
        codes::INSUFFICIENT_INVENTORY | codes::ITEM_NOT_FOUND | codes::VALIDATION_ERROR
    ) || codes::is_infrastructure(code)
}

/// Returns the outermost diagnostic in the chain the table recognises.
///
/// Wrapping codes such as `ORDER_FAILED` are skipped in favour of the
/// reason underneath them.
pub fn reason(diagnostic: &Diagnostic) -> Option<&Diagnostic> {
    diagnostic.chain().find(|d| is_known(d.code()))
}

/// Builds the message shown to the user for a failed request.
pub fn user_message(diagnostic: &Diagnostic) -> String {
    let Some(reason) = reason(diagnostic) else {
        return FALLBACK_MESSAGE.to_string();
    };

    match reason.code() {
        codes::INSUFFICIENT_INVENTORY => format!(
            "Only {} unit(s) of item {} are available, but {} were requested.",
            context_text(reason, "availableQuantity"),
            context_text(reason, "itemId"),
            context_text(reason, "requestedQuantity"),
        ),
        codes::ITEM_NOT_FOUND => format!(
            "Item {} is currently unavailable.",
            context_text(reason, "itemId")
        ),
        codes::VALIDATION_ERROR => reason.message().to_string(),
        code if codes::is_infrastructure(code) => RETRY_MESSAGE.to_string(),
        _ => FALLBACK_MESSAGE.to_string(),
    }
}

fn context_text(diagnostic: &Diagnostic, key: &str) -> String {
    match diagnostic.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "?".to_string(),
    }
}
