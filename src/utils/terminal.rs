//! Display sanitization.
//!
//! Email files and server replies are untrusted. Escape sequences embedded in them
//! would be interpreted by the terminal when rendered, so they are stripped first.

/// Remove terminal escape sequences and control characters.
///
/// Handles CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`)
/// sequences, drops a lone `ESC` plus the following character, and removes other
/// control characters except tab and newline. Carriage returns are dropped so CRLF
/// files render as plain lines.
///
/// ```
/// use email_classifier::utils::sanitize_for_display;
///
/// assert_eq!(sanitize_for_display("\x1b[31mUrgente\x1b[0m"), "Urgente");
/// assert_eq!(sanitize_for_display("linha 1\r\nlinha 2"), "linha 1\nlinha 2");
/// ```
pub fn sanitize_for_display(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => match chars.next() {
                Some('[') => {
                    // Parameters and intermediates, then one final byte in @..~
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\t' | '\n' => result.push(ch),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}
