//! Line framing for the UART-attached radio bridge.
//!
//! The bridge forwards every received radio frame as one text line:
//!
//! ```text
//! a4cf12e5f001 Driving3
//! ```
//!
//! The first token is the sender address as 12 hex digits, followed by a
//! single space and the raw payload. After power-up the bridge prints
//! `READY` once.

use heapless::Vec;

use crate::config::MAX_PAYLOAD_LEN;
use crate::radio::MacAddress;

/// Line the bridge prints once it is up.
pub const READY_LINE: &[u8] = b"READY";

/// Longest accepted line: address, separator and a full payload.
pub const MAX_LINE_LEN: usize = 12 + 1 + MAX_PAYLOAD_LEN;

/// One complete line from the bridge, without the terminator.
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Accumulates bytes into newline-terminated lines.
///
/// A carriage return directly before the newline is dropped; one anywhere
/// else stays part of the line. Lines longer than [`MAX_LINE_LEN`] are
/// discarded up to the next newline.
pub struct LineAssembler {
    line: Line,
    discarding: bool,
    pending_cr: bool,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            discarding: false,
            pending_cr: false,
        }
    }

    /// Feed one byte. Returns a line when `byte` terminates it.
    pub fn feed(
        &mut self,
        byte: u8,
    ) -> Option<Line> {
        if byte == b'\n' {
            self.pending_cr = false;
            let discarded = core::mem::replace(&mut self.discarding, false);
            let line = core::mem::take(&mut self.line);
            return if discarded || line.is_empty() { None } else { Some(line) };
        }
        // Held back until the next byte shows it is not a terminator
        if core::mem::replace(&mut self.pending_cr, false) {
            self.push(b'\r');
        }
        if byte == b'\r' {
            self.pending_cr = true;
        } else {
            self.push(byte);
        }
        None
    }

    fn push(
        &mut self,
        byte: u8,
    ) {
        if !self.discarding && self.line.push(byte).is_err() {
            self.line.clear();
            self.discarding = true;
        }
    }
}

impl Default for LineAssembler {
    fn default() -> Self { Self::new() }
}

/// Split a bridge line into sender address and payload.
///
/// Returns `None` if the address is not 12 hex digits followed by a space.
pub fn parse_line(line: &[u8]) -> Option<(MacAddress, &[u8])> {
    if line.len() < 13 || line[12] != b' ' {
        return None;
    }
    let mut mac = [0u8; 6];
    for (i, byte) in mac.iter_mut().enumerate() {
        let hi = hex_value(line[i * 2])?;
        let lo = hex_value(line[i * 2 + 1])?;
        *byte = (hi << 4) | lo;
    }
    Some((mac, &line[13..]))
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(
        assembler: &mut LineAssembler,
        bytes: &[u8],
    ) -> std::vec::Vec<std::vec::Vec<u8>> {
        bytes
            .iter()
            .filter_map(|&b| assembler.feed(b))
            .map(|line| line.to_vec())
            .collect()
    }

    #[test]
    fn test_assembles_lines_and_strips_crlf() {
        let mut assembler = LineAssembler::new();
        let lines = feed_all(&mut assembler, b"READY\r\na4cf12e5f001 Driving3\n");
        assert_eq!(lines, vec![b"READY".to_vec(), b"a4cf12e5f001 Driving3".to_vec()]);
    }

    #[test]
    fn test_inner_carriage_return_is_kept() {
        let mut assembler = LineAssembler::new();
        let lines = feed_all(&mut assembler, b"a4cf12e5f001 A\rB\r\r\n");
        assert_eq!(lines, vec![b"a4cf12e5f001 A\rB\r".to_vec()]);
    }

    #[test]
    fn test_full_line_with_crlf_is_not_discarded() {
        let mut assembler = LineAssembler::new();
        let mut input = std::vec![b'x'; MAX_LINE_LEN];
        input.extend_from_slice(b"\r\n");
        let lines = feed_all(&mut assembler, &input);
        assert_eq!(lines, vec![std::vec![b'x'; MAX_LINE_LEN]]);
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let mut assembler = LineAssembler::new();
        assert!(feed_all(&mut assembler, b"\n\r\n").is_empty());
    }

    #[test]
    fn test_overlong_line_discarded_until_newline() {
        let mut assembler = LineAssembler::new();
        let mut input = std::vec![b'x'; MAX_LINE_LEN + 5];
        input.extend_from_slice(b"\nREADY\n");
        let lines = feed_all(&mut assembler, &input);
        assert_eq!(lines, vec![b"READY".to_vec()]);
    }

    #[test]
    fn test_parse_line() {
        let (mac, payload) = parse_line(b"A4cf12e5F001 -2 1 11.8").unwrap();
        assert_eq!(mac, [0xA4, 0xCF, 0x12, 0xE5, 0xF0, 0x01]);
        assert_eq!(payload, b"-2 1 11.8");
    }

    #[test]
    fn test_parse_line_rejects_bad_address() {
        assert!(parse_line(b"READY").is_none());
        assert!(parse_line(b"a4cf12e5f0zz Driving1").is_none());
        assert!(parse_line(b"a4cf12e5f001Driving1").is_none());
    }
}
