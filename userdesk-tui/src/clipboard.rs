//! Clipboard writes through the terminal (OSC 52), so copying works over
//! SSH without a display server.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::{self, Write};

/// Escape sequence asking the terminal to put `text` on the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

pub fn copy_to_clipboard<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}
