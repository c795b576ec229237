//! Parameter structs for the take-away game and the random state space.
//!
//! Both structs can only be obtained through their validating constructors,
//! so the rest of the crate may assume every field is in range.

use crate::error::{Error, Result};

/// Parameters of the take-away game.
///
/// Every pile starts with `m` tokens. A player removes either a single token
/// from one pile, or `k1`/`k2`/`k3` tokens from the red/green/yellow pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameConfig {
    m: u32,
    k1: u32,
    k2: u32,
    k3: u32,
}

impl GameConfig {
    /// Validates and builds a game configuration.
    ///
    /// # Arguments
    /// * `m`: Initial size of each pile. Must be 3 or more.
    /// * `k1`, `k2`, `k3`: Bulk removal amounts for the red, green and yellow
    ///   piles. Each must lie in `[2, m-1]`.
    ///
    /// # Returns
    /// * `Ok(GameConfig)` when every parameter is in range.
    /// * `Err(Error::Configuration)` naming the first offending parameter.
    ///
    /// # Examples
    /// ```
    /// use pile_search::config::GameConfig;
    /// assert!(GameConfig::new(3, 2, 2, 2).is_ok());
    /// assert!(GameConfig::new(2, 2, 2, 2).is_err());
    /// assert!(GameConfig::new(5, 2, 5, 2).is_err());
    /// ```
    pub fn new(m: u32, k1: u32, k2: u32, k3: u32) -> Result<Self> {
        if m < 3 {
            return Err(Error::Configuration {
                parameter: "M",
                value: m.into(),
                range: "[3, +inf)".to_string(),
            });
        }
        for (parameter, k) in [("K1", k1), ("K2", k2), ("K3", k3)] {
            if k < 2 || k >= m {
                return Err(Error::Configuration {
                    parameter,
                    value: k.into(),
                    range: format!("interval [2,{}]", m - 1),
                });
            }
        }
        Ok(GameConfig { m, k1, k2, k3 })
    }

    pub fn m(&self) -> u32 {
        self.m
    }

    pub fn k1(&self) -> u32 {
        self.k1
    }

    pub fn k2(&self) -> u32 {
        self.k2
    }

    pub fn k3(&self) -> u32 {
        self.k3
    }

    /// Base of the depth-sensitive terminal score: `3M + 1`.
    ///
    /// A tree never starts with more than `M` tokens in a pile, so no game
    /// lasts longer than `3M` moves and `horizon - depth` is always positive
    /// for a terminal node.
    pub fn horizon(&self) -> i32 {
        (3 * self.m + 1) as i32
    }
}

/// Parameters of a random state space of symbol vectors.
///
/// A vertex has `length` symbols. The first half is drawn from the first
/// `letters` capital letters, the second half from the first `digits`
/// decimal digits. The space holds `size` distinct vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpaceConfig {
    letters: u8,
    digits: u8,
    length: usize,
    size: usize,
}

impl SpaceConfig {
    /// Validates and builds a state-space configuration.
    ///
    /// `letters` and `digits` must be in `[1, 9]`, `length` even and at least
    /// 2, and `size` in `[3, (letters * digits)^(length/2)]` so that a source
    /// and two goals fit and rejection sampling can terminate.
    ///
    /// # Examples
    /// ```
    /// use pile_search::config::SpaceConfig;
    /// assert!(SpaceConfig::new(2, 2, 2, 4).is_ok());
    /// assert!(SpaceConfig::new(2, 2, 2, 5).is_err()); // only 4 vectors exist
    /// assert!(SpaceConfig::new(2, 2, 3, 4).is_err()); // odd length
    /// ```
    pub fn new(letters: u8, digits: u8, length: usize, size: usize) -> Result<Self> {
        if !(1..=9).contains(&letters) {
            return Err(Error::Configuration {
                parameter: "L",
                value: letters.into(),
                range: "interval [1,9]".to_string(),
            });
        }
        if !(1..=9).contains(&digits) {
            return Err(Error::Configuration {
                parameter: "M",
                value: digits.into(),
                range: "interval [1,9]".to_string(),
            });
        }
        if length < 2 || length % 2 != 0 {
            return Err(Error::Configuration {
                parameter: "d",
                value: length as u64,
                range: "{x: EVEN(x) && x>=2}".to_string(),
            });
        }
        let capacity = capacity_of(letters, digits, length);
        if size < 3 || (size as u64) > capacity {
            return Err(Error::Configuration {
                parameter: "N",
                value: size as u64,
                range: format!("[3, {}]", capacity),
            });
        }
        Ok(SpaceConfig {
            letters,
            digits,
            length,
            size,
        })
    }

    pub fn letters(&self) -> u8 {
        self.letters
    }

    pub fn digits(&self) -> u8 {
        self.digits
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct vectors the alphabet can produce, `(L*M)^(d/2)`.
    ///
    /// Saturates at `u64::MAX` for alphabets too large to count.
    pub fn capacity(&self) -> u64 {
        capacity_of(self.letters, self.digits, self.length)
    }
}

fn capacity_of(letters: u8, digits: u8, length: usize) -> u64 {
    let base = u64::from(letters) * u64::from(digits);
    u32::try_from(length / 2)
        .ok()
        .and_then(|half| base.checked_pow(half))
        .unwrap_or(u64::MAX)
}
