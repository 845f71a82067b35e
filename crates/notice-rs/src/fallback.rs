//! Template document used when the provider path fails.
//!
//! The output depends only on the notice fields: no clock, no randomness,
//! and no failure mode.

use crate::Notice;
use crate::prompt::OPENING_PHRASE;

const COOPERATION_CLOSING: &str = "All concerned parties are requested to take note of this \
information. Cooperation from everyone is expected for the smooth functioning of the institution.";

const CONTACT_LINE: &str = "For any further clarifications, please contact the administrative office.";

const PARAGRAPH_BREAK: &str = "<br><br>\n";

/// Compose the template notice body.
///
/// The summary is inserted verbatim. The signatory block is included only
/// when the notice has a signatory.
pub fn fallback_notice(notice: &Notice<'_>) -> String {
    let mut paragraphs = vec![
        format!(
            "{OPENING_PHRASE} regarding <strong>{}</strong>.",
            notice.title
        ),
        notice.summary.to_string(),
        COOPERATION_CLOSING.to_string(),
        CONTACT_LINE.to_string(),
    ];

    if !notice.sign.trim().is_empty() {
        paragraphs.push(format!("<strong>{}</strong>", notice.sign));
    }

    format!(
        "<div style=\"text-align: justify; font-family: 'Times New Roman', serif;\">\n{}\n</div>",
        paragraphs.join(PARAGRAPH_BREAK)
    )
}
