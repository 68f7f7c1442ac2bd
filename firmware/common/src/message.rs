//! Radio message decoding.
//!
//! Two payload grammars share the radio channel:
//!
//! - **Keywords** announce a liveness transition for one vehicle:
//!   `StuckDetector<N>` or `Driving<N>` with `N` in `1..=ENTITY_COUNT`.
//! - **Structured telemetry** from the selected vehicle:
//!
//!   ```text
//!   -<id> <status> <vBatt> <vCharge> <iCharge> <chargeStatus> <statusBits> <temperature> <radius> <v5v> <pidOutput> [<lapFlag>]
//!   ```
//!
//! Numeric fields are kept as text and only converted when read. A field that
//! does not parse reads as zero, so a garbled sensor value shows up as `0` on
//! the panel rather than dropping the whole record.

use core::str::FromStr;

use heapless::String;

use crate::config::{ENTITY_COUNT, MAX_PAYLOAD_LEN};
use crate::config::telemetry::RELAY_STUCK_ENTITIES;

/// Prefix of a structured telemetry line.
pub const STRUCTURED_PREFIX: char = '-';

/// Fields after the entity id that a structured line must carry.
pub const REQUIRED_FIELDS: usize = 10;

/// Longest token kept for a numeric field.
pub const FIELD_LEN: usize = 12;

const STUCK_KEYWORDS: [&str; ENTITY_COUNT] = [
    "StuckDetector1",
    "StuckDetector2",
    "StuckDetector3",
    "StuckDetector4",
    "StuckDetector5",
    "StuckDetector6",
];

const DRIVING_KEYWORDS: [&str; ENTITY_COUNT] = ["Driving1", "Driving2", "Driving3", "Driving4", "Driving5", "Driving6"];

// =============================================================================
// Errors
// =============================================================================

/// Why a payload was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Nothing left after normalisation.
    Empty,
    /// Payload is not valid UTF-8.
    NotText,
    /// Neither a known keyword nor a structured line.
    MissingPrefix,
    /// Entity id is not a small positive integer.
    InvalidEntity,
    /// Structured line has fewer than [`REQUIRED_FIELDS`] fields.
    MissingFields,
}

// =============================================================================
// Keyword Events
// =============================================================================

/// Transition announced by a keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    Stuck,
    Driving,
}

/// A decoded keyword: one vehicle reporting stuck or driving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusEvent {
    /// Vehicle id in `1..=ENTITY_COUNT`.
    pub entity: u8,
    pub kind: EventKind,
}

impl StatusEvent {
    pub const fn new(
        entity: u8,
        kind: EventKind,
    ) -> Self {
        Self { entity, kind }
    }

    /// The keyword that encodes this event on the wire.
    pub fn keyword(&self) -> &'static str {
        let index = usize::from(self.entity.clamp(1, ENTITY_COUNT as u8) - 1);
        match self.kind {
            EventKind::Stuck => STUCK_KEYWORDS[index],
            EventKind::Driving => DRIVING_KEYWORDS[index],
        }
    }

    /// True if this event is rebroadcast to every peer.
    pub fn should_relay(&self) -> bool {
        self.kind == EventKind::Stuck && RELAY_STUCK_ENTITIES.contains(&self.entity)
    }
}

fn parse_keyword(text: &str) -> Option<StatusEvent> {
    let find = |table: &[&str; ENTITY_COUNT]| table.iter().position(|k| *k == text);
    if let Some(i) = find(&STUCK_KEYWORDS) {
        return Some(StatusEvent::new(i as u8 + 1, EventKind::Stuck));
    }
    find(&DRIVING_KEYWORDS).map(|i| StatusEvent::new(i as u8 + 1, EventKind::Driving))
}

// =============================================================================
// Structured Telemetry
// =============================================================================

/// Status code of a telemetry record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Stuck,
    Driving,
    Charging,
    /// Any other code, kept for display.
    Unknown(u8),
}

impl Status {
    fn from_token(token: &str) -> Self {
        match token.parse::<u8>() {
            Ok(0) => Self::Stuck,
            Ok(1) => Self::Driving,
            Ok(2) => Self::Charging,
            Ok(code) => Self::Unknown(code),
            Err(_) => Self::Unknown(u8::MAX),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Stuck => "STUCK",
            Self::Driving => "DRIVING",
            Self::Charging => "CHARGING",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

/// A numeric field kept as received.
///
/// Tokens longer than [`FIELD_LEN`] are stored empty and read as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Field(String<FIELD_LEN>);

impl Field {
    pub fn new(token: &str) -> Self {
        let mut text = String::new();
        if text.push_str(token).is_err() {
            text.clear();
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed value, or zero if the text is not a finite number.
    ///
    /// `inf`, `NaN` and out-of-range text such as `1e39` read as zero too.
    pub fn as_f32(&self) -> f32 {
        self.0.parse::<f32>().ok().filter(|v| v.is_finite()).unwrap_or_default()
    }

    /// Parsed value, or zero if the text is not an integer.
    pub fn as_i32(&self) -> i32 {
        parse_or_zero(&self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Field {
    fn format(
        &self,
        f: defmt::Formatter,
    ) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}

fn parse_or_zero<T: FromStr + Default>(text: &str) -> T {
    text.parse().unwrap_or_default()
}

/// One structured telemetry line from a vehicle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryRecord {
    pub entity: u8,
    pub status: Status,
    pub battery_voltage: Field,
    pub charge_voltage: Field,
    pub charge_current: Field,
    pub charge_status: Field,
    pub status_bits: Field,
    pub temperature: Field,
    pub radius: Field,
    pub rail_5v: Field,
    pub pid_output: Field,
    /// Set when the vehicle completed a lap with this message.
    pub lap: bool,
}

fn parse_structured(body: &str) -> Result<TelemetryRecord, DecodeError> {
    let mut tokens = body.split_ascii_whitespace();

    let entity = tokens
        .next()
        .and_then(|id| id.parse::<u8>().ok())
        .filter(|&id| id > 0)
        .ok_or(DecodeError::InvalidEntity)?;

    let mut fields: [&str; REQUIRED_FIELDS] = [""; REQUIRED_FIELDS];
    for slot in &mut fields {
        *slot = tokens.next().ok_or(DecodeError::MissingFields)?;
    }
    let lap = tokens.next().is_some_and(|flag| parse_or_zero::<i32>(flag) != 0);

    let [status, v_batt, v_charge, i_charge, charge_status, bits, temp, radius, v5, pid] = fields;
    Ok(TelemetryRecord {
        entity,
        status: Status::from_token(status),
        battery_voltage: Field::new(v_batt),
        charge_voltage: Field::new(v_charge),
        charge_current: Field::new(i_charge),
        charge_status: Field::new(charge_status),
        status_bits: Field::new(bits),
        temperature: Field::new(temp),
        radius: Field::new(radius),
        rail_5v: Field::new(v5),
        pid_output: Field::new(pid),
        lap,
    })
}

// =============================================================================
// Decoding
// =============================================================================

/// A decoded payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Event(StatusEvent),
    Telemetry(TelemetryRecord),
}

/// Trim a raw payload to what the decoder looks at.
///
/// Caps the length at [`MAX_PAYLOAD_LEN`], stops at the first NUL and drops
/// trailing line terminators.
pub fn normalize(payload: &[u8]) -> &[u8] {
    let payload = &payload[..payload.len().min(MAX_PAYLOAD_LEN)];
    let end = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());
    let mut payload = &payload[..end];
    while let [rest @ .., b'\r' | b'\n'] = payload {
        payload = rest;
    }
    payload
}

/// Decode one radio payload.
pub fn decode(payload: &[u8]) -> Result<Message, DecodeError> {
    let bytes = normalize(payload);
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    let text = core::str::from_utf8(bytes).map_err(|_| DecodeError::NotText)?;

    if let Some(event) = parse_keyword(text) {
        return Ok(Message::Event(event));
    }
    match text.strip_prefix(STRUCTURED_PREFIX) {
        Some(body) => parse_structured(body).map(Message::Telemetry),
        None => Err(DecodeError::MissingPrefix),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
