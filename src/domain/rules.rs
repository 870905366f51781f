use std::fmt;
use std::str::FromStr;

use super::RuleParseError;

/// Outer-totalistic birth/survival rule.
/// Bit `n` of each mask is set when `n` live neighbors trigger the transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleSet {
    name: &'static str,
    birth: u16,
    survival: u16,
}

const fn mask(counts: &[u8]) -> u16 {
    let mut bits = 0u16;
    let mut i = 0;
    while i < counts.len() {
        bits |= 1u16 << counts[i];
        i += 1;
    }
    bits
}

impl RuleSet {
    /// Conway's Game of Life (B3/S23)
    pub const CONWAY: RuleSet = RuleSet::preset("Conway", &[3], &[2, 3]);
    /// Replicators appear with 6-neighbor births (B36/S23)
    pub const HIGHLIFE: RuleSet = RuleSet::preset("HighLife", &[3, 6], &[2, 3]);
    /// Nothing survives, everything explodes (B2/S)
    pub const SEEDS: RuleSet = RuleSet::preset("Seeds", &[2], &[]);
    /// Symmetric under inversion (B3678/S34678)
    pub const DAY_AND_NIGHT: RuleSet =
        RuleSet::preset("Day&Night", &[3, 6, 7, 8], &[3, 4, 6, 7, 8]);

    const fn preset(name: &'static str, birth: &[u8], survival: &[u8]) -> Self {
        Self {
            name,
            birth: mask(birth),
            survival: mask(survival),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a dead cell with `neighbors` live neighbors comes alive.
    #[inline]
    pub fn is_born(&self, neighbors: u8) -> bool {
        self.birth & (1u16 << neighbors) != 0
    }

    /// Whether a live cell with `neighbors` live neighbors stays alive.
    #[inline]
    pub fn survives(&self, neighbors: u8) -> bool {
        self.survival & (1u16 << neighbors) != 0
    }

    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survives(neighbors)
        } else {
            self.is_born(neighbors)
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::CONWAY
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |bits: u16| -> String {
            (0..=8u8)
                .filter(|n| bits & (1u16 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };
        write!(f, "B{}/S{}", digits(self.birth), digits(self.survival))
    }
}

fn parse_counts(digits: &str) -> Result<u16, RuleParseError> {
    digits.chars().try_fold(0u16, |bits, c| match c.to_digit(10) {
        Some(n) if n <= 8 => Ok(bits | 1u16 << n),
        _ => Err(RuleParseError::InvalidCount(c)),
    })
}

impl FromStr for RuleSet {
    type Err = RuleParseError;

    /// Parses `B3/S23` style notation (case-insensitive). Named presets keep their name;
    /// anything else is reported as "Custom".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RuleParseError::Malformed(s.to_owned());
        let upper = s.trim().to_ascii_uppercase();
        let (b, s_part) = upper.split_once('/').ok_or_else(malformed)?;
        let birth = parse_counts(b.strip_prefix('B').ok_or_else(malformed)?)?;
        let survival = parse_counts(s_part.strip_prefix('S').ok_or_else(malformed)?)?;

        if birth & 1 != 0 {
            return Err(RuleParseError::BirthOnZero);
        }

        let parsed = RuleSet {
            name: "Custom",
            birth,
            survival,
        };
        Ok(all_rules()
            .into_iter()
            .find(|preset| preset.birth == birth && preset.survival == survival)
            .unwrap_or(parsed))
    }
}

/// Every built-in rule, in display order.
pub fn all_rules() -> Vec<RuleSet> {
    vec![
        RuleSet::CONWAY,
        RuleSet::HIGHLIFE,
        RuleSet::SEEDS,
        RuleSet::DAY_AND_NIGHT,
    ]
}
