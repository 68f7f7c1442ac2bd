//! Radio transport seam.
//!
//! The dashboard only needs to broadcast short text payloads to every peer.
//! Delivery is best effort: a failed broadcast is logged by the caller and
//! never retried.

use core::fmt::Write;

use heapless::String;

use crate::config::MAX_PAYLOAD_LEN;
use crate::message::StatusEvent;

/// A 6-byte radio sender address.
pub type MacAddress = [u8; 6];

/// Errors from the radio transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Payload exceeds the radio frame limit.
    PayloadTooLong,
    /// Outbound queue is full.
    Busy,
}

/// Broadcast-only radio.
pub trait Radio {
    /// Send `payload` to the broadcast address.
    fn broadcast(
        &mut self,
        payload: &[u8],
    ) -> Result<(), RadioError>;
}

/// Rebroadcast a keyword event verbatim to every peer.
pub fn relay<R: Radio>(
    radio: &mut R,
    event: StatusEvent,
) -> Result<(), RadioError> {
    let keyword = event.keyword();
    if keyword.len() > MAX_PAYLOAD_LEN {
        return Err(RadioError::PayloadTooLong);
    }
    radio.broadcast(keyword.as_bytes())
}

/// Format a sender address as `AA:BB:CC:DD:EE:FF` for diagnostics.
pub fn format_mac(mac: &MacAddress) -> String<17> {
    let mut text = String::new();
    for (i, byte) in mac.iter().enumerate() {
        if i > 0 {
            text.push(':').ok();
        }
        write!(text, "{byte:02X}").ok();
    }
    text
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;
    use crate::message::EventKind;

    #[derive(Default)]
    struct RecordingRadio {
        sent: Vec<Vec<u8>>,
        fail: bool,
    }

    impl Radio for RecordingRadio {
        fn broadcast(
            &mut self,
            payload: &[u8],
        ) -> Result<(), RadioError> {
            if self.fail {
                return Err(RadioError::Busy);
            }
            self.sent.push(payload.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_relay_sends_keyword_verbatim() {
        let mut radio = RecordingRadio::default();
        relay(&mut radio, StatusEvent::new(1, EventKind::Stuck)).unwrap();
        assert_eq!(radio.sent, vec![b"StuckDetector1".to_vec()]);
    }

    #[test]
    fn test_format_mac() {
        let mac = format_mac(&[0xA4, 0xCF, 0x12, 0x05, 0xF0, 0x01]);
        assert_eq!(mac.as_str(), "A4:CF:12:05:F0:01");
    }

    #[test]
    fn test_relay_surfaces_send_failure() {
        let mut radio = RecordingRadio {
            fail: true,
            ..Default::default()
        };
        let result = relay(&mut radio, StatusEvent::new(1, EventKind::Stuck));
        assert_eq!(result, Err(RadioError::Busy));
    }
}
