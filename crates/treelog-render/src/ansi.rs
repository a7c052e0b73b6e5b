#![forbid(unsafe_code)]

//! ANSI SGR byte generation.
//!
//! Pure byte writers with no state tracking; whether color is enabled at all
//! is decided by the caller.
//!
//! | Sequence | Meaning |
//! |----------|---------|
//! | `ESC [ 1 ; n m` | bold + color `n` |
//! | `ESC [ 0 m` | reset all attributes |
//! | `BS` | cursor one column left |

use std::io::{self, Write};

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Backspace control byte.
pub const BACKSPACE: u8 = 0x08;

/// Stamp color (cyan).
pub const STAMP_COLOR: u8 = 36;
/// `OK` bracket color (green).
pub const OK_COLOR: u8 = 32;
/// `FAIL` bracket color (red).
pub const FAIL_COLOR: u8 = 31;
/// Tick and percent bracket color (yellow).
pub const PROGRESS_COLOR: u8 = 33;

#[inline]
fn write_u8_dec(buf: &mut [u8], n: u8) -> usize {
    if n >= 100 {
        buf[0] = b'0' + n / 100;
        buf[1] = b'0' + (n / 10) % 10;
        buf[2] = b'0' + n % 10;
        3
    } else if n >= 10 {
        buf[0] = b'0' + n / 10;
        buf[1] = b'0' + n % 10;
        2
    } else {
        buf[0] = b'0' + n;
        1
    }
}

/// Write `CSI 1 ; code m`.
#[inline]
pub fn sgr_color<W: Write>(w: &mut W, code: u8) -> io::Result<()> {
    let mut buf = [0u8; 8];
    buf[..4].copy_from_slice(b"\x1b[1;");
    let len = write_u8_dec(&mut buf[4..], code);
    buf[4 + len] = b'm';
    w.write_all(&buf[..4 + len + 1])
}

/// Write SGR reset sequence.
#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}
