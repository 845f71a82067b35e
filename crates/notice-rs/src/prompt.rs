//! Prompt rendering for the provider.

use crate::Notice;

/// Opening sentence every generated notice starts with.
pub const OPENING_PHRASE: &str = "This is to inform all students, faculty, and staff members";

/// Render the drafting instructions for a notice.
///
/// Pure: the same notice always yields byte-identical text.
pub fn build_prompt(notice: &Notice<'_>) -> String {
    let sign = if notice.sign.trim().is_empty() {
        "(none)"
    } else {
        notice.sign
    };

    format!(
        "\
Act as a strict college administrator. Write the body of a formal {kind}.

Details:
- Title: {title}
- Summary: {summary}
- Signatories: {sign}

Rules:
- Begin with: \"{OPENING_PHRASE} regarding ...\"
- Return ONLY the body text as plain paragraphs. No markdown.
- Use HTML <br> for line breaks.
- Do not include a subject line, a date, or a signature block.
- Keep a formal, institutional tone.
- End with a request for cooperation from all concerned.",
        kind = notice.kind,
        title = notice.title,
        summary = notice.summary,
    )
}
