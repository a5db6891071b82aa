use crate::model::Record;
use crate::parsing::normalize::{fold_marker, normalize, TIMESTAMP};
use regex::Regex;
use std::sync::LazyLock;

static SPEED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("speed pattern is valid"));

static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d+\.\d+)\s+(-?\d+\.\d+)").expect("coordinate pattern is valid")
});

/// Folded form of the column label that separates status fields from the
/// address ("Posição").
const POSITION_MARKER: &str = "posicao";

/// Why a block produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer than three timestamps in the block.
    MissingTimestamps(usize),
    /// No "Posição" token after the timestamps.
    MissingMarker,
}

/// Parse one concatenated block into a record.
///
/// The record may still lack coordinates; callers decide whether to keep it.
pub fn parse_block(block: &str) -> Result<Record, Rejection> {
    let mut stamps = TIMESTAMP.find_iter(block).take(3);
    let (Some(position), Some(event), Some(communication)) =
        (stamps.next(), stamps.next(), stamps.next())
    else {
        return Err(Rejection::MissingTimestamps(TIMESTAMP.find_iter(block).count()));
    };

    let tokens: Vec<&str> = block[communication.end()..].split_whitespace().collect();

    let marker = tokens
        .iter()
        .position(|t| fold_marker(t).starts_with(POSITION_MARKER))
        .ok_or(Rejection::MissingMarker)?;
    let (status_tokens, rest) = tokens.split_at(marker);
    let address_tokens = &rest[1..];

    let speed = status_tokens
        .iter()
        .find(|t| SPEED.is_match(t))
        .map(|t| t.to_string());

    let (address, latitude, longitude) = split_address(&address_tokens.join(" "));

    Ok(Record {
        position_timestamp: position.as_str().to_string(),
        event_timestamp: event.as_str().to_string(),
        communication_timestamp: communication.as_str().to_string(),
        speed,
        address,
        latitude,
        longitude,
    })
}

/// Pull the first coordinate pair out of the address region and clean up
/// what is left.
fn split_address(joined: &str) -> (String, Option<String>, Option<String>) {
    let (rest, latitude, longitude) = match COORDINATES.captures(joined) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let rest = format!("{}{}", &joined[..whole.start], &joined[whole.end..]);
            (
                rest,
                caps.get(1).map(|m| m.as_str().to_string()),
                caps.get(2).map(|m| m.as_str().to_string()),
            )
        }
        None => (joined.to_string(), None, None),
    };

    let mut address = normalize(&rest);
    if address.starts_with('-') {
        address = address.trim_start_matches('-').trim().to_string();
    }
    (address, latitude, longitude)
}
