use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One of the two stars a puzzle awards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum Star {
    First = 1,
    Second = 2,
}

impl Star {
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for Star {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(format!("star must be 1 or 2, got {}", other)),
        }
    }
}

impl From<Star> for u8 {
    fn from(star: Star) -> Self {
        star.number()
    }
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Stars earned on a single day. `star2` does not imply `star1` here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub star1: bool,
    pub star2: bool,
}

impl Completion {
    pub fn is_empty(&self) -> bool {
        !self.star1 && !self.star2
    }

    pub fn has(&self, star: Star) -> bool {
        match star {
            Star::First => self.star1,
            Star::Second => self.star2,
        }
    }

    pub fn set(&mut self, star: Star) {
        match star {
            Star::First => self.star1 = true,
            Star::Second => self.star2 = true,
        }
    }

    pub fn star_count(&self) -> u32 {
        u32::from(self.star1) + u32::from(self.star2)
    }
}

/// Sparse day -> completion map. Days without any star are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet(BTreeMap<u32, Completion>);

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: u32, completion: Completion) {
        if completion.is_empty() {
            self.0.remove(&day);
        } else {
            self.0.insert(day, completion);
        }
    }

    pub fn mark(&mut self, day: u32, star: Star) {
        self.0.entry(day).or_default().set(star);
    }

    pub fn get(&self, day: u32) -> Option<&Completion> {
        self.0.get(&day)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Completion)> {
        self.0.iter().map(|(day, completion)| (*day, completion))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_stars(&self) -> u32 {
        self.0.values().map(Completion::star_count).sum()
    }

    /// Renders the set as `"01d1,01d2,02d1"`.
    pub fn encode(&self) -> String {
        let mut tokens = Vec::with_capacity(self.0.len() * 2);

        for (day, completion) in &self.0 {
            for star in [Star::First, Star::Second] {
                if completion.has(star) {
                    tokens.push(encode_slot(*day, star));
                }
            }
        }

        tokens.join(",")
    }

    /// Best-effort inverse of [`CompletionSet::encode`]. Malformed tokens are
    /// logged and skipped; the rest of the record is kept.
    pub fn decode(encoded: &str) -> Self {
        let mut set = Self::new();

        for token in encoded.split(',') {
            if token.is_empty() {
                continue;
            }

            match decode_slot(token) {
                Some((day, star)) => set.mark(day, star),
                None => warn!("Got invalid completion format: {}", token),
            }
        }

        set
    }
}

impl FromIterator<(u32, Completion)> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = (u32, Completion)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (day, completion) in iter {
            set.insert(day, completion);
        }
        set
    }
}

/// Encodes a single (day, star) slot as `"{day:02}d{star}"`.
///
/// The same token format is used for completion strings and for the slot
/// column of stored submissions.
pub fn encode_slot(day: u32, star: Star) -> String {
    format!("{:02}d{}", day, star)
}

/// Parses a `"{day}d{star}"` token, returning `None` when it is malformed.
pub fn decode_slot(token: &str) -> Option<(u32, Star)> {
    let parts: Vec<&str> = token.split('d').collect();
    let [day, star] = parts.as_slice() else {
        return None;
    };

    let day = day.parse::<u32>().ok()?;
    let star = match *star {
        "1" => Star::First,
        "2" => Star::Second,
        _ => return None,
    };

    Some((day, star))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(star1: bool, star2: bool) -> Completion {
        Completion { star1, star2 }
    }

    #[test]
    fn test_encode_orders_days_and_pads() {
        let set: CompletionSet = [(12, completion(true, false)), (3, completion(true, true))]
            .into_iter()
            .collect();

        assert_eq!(set.encode(), "03d1,03d2,12d1");
    }

    #[test]
    fn test_empty_set_encodes_to_empty_string() {
        assert_eq!(CompletionSet::new().encode(), "");
        assert!(CompletionSet::decode("").is_empty());
    }

    #[test]
    fn test_round_trip() {
        let set: CompletionSet = [
            (1, completion(true, true)),
            (2, completion(true, false)),
            (7, completion(false, true)),
            (25, completion(true, true)),
        ]
        .into_iter()
        .collect();

        assert_eq!(CompletionSet::decode(&set.encode()), set);
    }

    #[test]
    fn test_decode_skips_malformed_tokens() {
        let set = CompletionSet::decode("01d1,garbage,03d2");

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1), Some(&completion(true, false)));
        assert_eq!(set.get(3), Some(&completion(false, true)));
    }

    #[test]
    fn test_decode_rejects_bad_star_and_day() {
        let set = CompletionSet::decode("04d3,xxd1,05d1d2,-1d1,,06d2");

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(6), Some(&completion(false, true)));
        assert!(set.get(4).is_none());
    }

    #[test]
    fn test_decode_accumulates_same_day() {
        let set = CompletionSet::decode("09d2,09d1");
        assert_eq!(set.get(9), Some(&completion(true, true)));
        assert_eq!(set.total_stars(), 2);
    }

    #[test]
    fn test_insert_drops_empty_completion() {
        let mut set = CompletionSet::new();
        set.insert(2, completion(true, false));
        set.insert(2, Completion::default());
        assert!(set.is_empty());
    }

    #[test]
    fn test_slot_codec() {
        assert_eq!(encode_slot(1, Star::Second), "01d2");
        assert_eq!(decode_slot("01d2"), Some((1, Star::Second)));
        assert_eq!(decode_slot("1d1"), Some((1, Star::First)));
        assert_eq!(decode_slot("01d0"), None);
        assert_eq!(decode_slot("01"), None);
    }

    #[test]
    fn test_star_conversions() {
        assert_eq!(Star::try_from(1), Ok(Star::First));
        assert_eq!(Star::try_from(2), Ok(Star::Second));
        assert!(Star::try_from(3).is_err());
        assert!(Star::try_from(0).is_err());
        assert_eq!(u8::from(Star::Second), 2);
    }
}
