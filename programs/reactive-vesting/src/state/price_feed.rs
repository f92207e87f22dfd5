use anchor_lang::prelude::*;

use crate::constants::MAX_OBSERVATIONS;
use crate::error::{VestingError, VestingResult};

/// Anything that can quote the vested asset in the reference unit.
pub trait PriceSource {
    /// Raw reading at `now`; zero means the source has no usable price.
    fn read_price(&self, now: i64) -> u64;

    /// Reading at `now`, rejecting the zero sentinel.
    fn current_price(&self, now: i64) -> VestingResult<u64> {
        match self.read_price(now) {
            0 => Err(VestingError::OracleError),
            price => Ok(price),
        }
    }
}

#[zero_copy]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Observation {
    pub timestamp: i64,
    pub price: u64,
}

/// Push-based price feed that averages its observations over a time window.
#[account(zero_copy)]
pub struct PriceFeed {
    /// Signer allowed to publish observations.
    pub authority: Pubkey,
    /// Averaging window; zero reports the latest observation as-is.
    pub window_seconds: i64,
    /// Ring index of the next write.
    pub head: u32,
    /// Number of live observations (<= MAX_OBSERVATIONS).
    pub len: u32,
    pub observations: [Observation; MAX_OBSERVATIONS],
}

impl PriceFeed {
    /// Space for discriminator + fixed ring (no vec header).
    pub const fn space() -> usize {
        8 + core::mem::size_of::<PriceFeed>()
    }

    pub fn init(&mut self, authority: Pubkey, window_seconds: i64) -> VestingResult<()> {
        if authority == Pubkey::default() {
            return Err(VestingError::ZeroAddress);
        }
        if window_seconds < 0 {
            return Err(VestingError::InvalidParams);
        }
        self.authority = authority;
        self.window_seconds = window_seconds;
        self.head = 0;
        self.len = 0;
        self.observations = [Observation::default(); MAX_OBSERVATIONS];
        Ok(())
    }

    pub fn latest(&self) -> Option<Observation> {
        if self.len == 0 {
            return None;
        }
        let idx = (self.head as usize + MAX_OBSERVATIONS - 1) % MAX_OBSERVATIONS;
        Some(self.observations[idx])
    }

    fn chronological(&self) -> impl Iterator<Item = &Observation> {
        let len = self.len as usize;
        let start = (self.head as usize + MAX_OBSERVATIONS - len) % MAX_OBSERVATIONS;
        (0..len).map(move |i| &self.observations[(start + i) % MAX_OBSERVATIONS])
    }

    /// Appends an observation. A second observation at the same timestamp
    /// replaces the first; timestamps never move backwards.
    pub fn record(&mut self, caller: &Pubkey, price: u64, now: i64) -> VestingResult<()> {
        if *caller != self.authority {
            return Err(VestingError::NotAuthorized);
        }
        if price == 0 {
            return Err(VestingError::OracleError);
        }
        if let Some(last) = self.latest() {
            if now < last.timestamp {
                return Err(VestingError::InvalidParams);
            }
            if now == last.timestamp {
                let idx = (self.head as usize + MAX_OBSERVATIONS - 1) % MAX_OBSERVATIONS;
                self.observations[idx].price = price;
                return Ok(());
            }
        }
        self.observations[self.head as usize] = Observation {
            timestamp: now,
            price,
        };
        self.head = ((self.head as usize + 1) % MAX_OBSERVATIONS) as u32;
        self.len = (self.len + 1).min(MAX_OBSERVATIONS as u32);
        Ok(())
    }

    /// Time-weighted average over `[now - window, now]`. Each observation
    /// holds until the next one; time before the first retained observation
    /// carries no weight.
    pub fn twap(&self, now: i64) -> u64 {
        let Some(latest) = self.latest() else {
            return 0;
        };
        if self.window_seconds == 0 {
            return latest.price;
        }
        let window_start = now.saturating_sub(self.window_seconds);
        let obs: Vec<Observation> = self.chronological().copied().collect();

        let mut weighted: u128 = 0;
        let mut covered: u128 = 0;
        for (i, o) in obs.iter().enumerate() {
            let end = obs.get(i + 1).map_or(now, |next| next.timestamp).min(now);
            let start = o.timestamp.max(window_start);
            if end > start {
                let dt = (end - start) as u128;
                weighted += o.price as u128 * dt;
                covered += dt;
            }
        }
        if covered == 0 {
            return latest.price;
        }
        (weighted / covered) as u64
    }
}

impl PriceSource for PriceFeed {
    fn read_price(&self, now: i64) -> u64 {
        self.twap(now)
    }
}
