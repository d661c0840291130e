use super::registers::{DEFAULT_THRESHOLD, LUT_SIZE, SCRATCHPAD_TEST};

/// 8-bit pixel lookup table, one entry per input pixel value.
///
/// Entries are pushed to the coefficient port highest index first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut {
    entries: [u8; LUT_SIZE],
}

impl Lut {
    pub fn from_fn(f: impl Fn(u8) -> u8) -> Self {
        let mut entries = [0u8; LUT_SIZE];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = f(i as u8);
        }
        Self { entries }
    }

    /// Every entry equal to its index. Written out this is 255, 254, .. 0,
    /// which the reference design loads as the inverse luminance set.
    pub fn identity() -> Self {
        Self::from_fn(|i| i)
    }

    pub fn inverted() -> Self {
        Self::from_fn(|i| u8::MAX - i)
    }

    pub fn write_order(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.iter().rev().copied()
    }
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

/// Values applied by one configuration pass.
#[derive(Debug, Clone)]
pub struct Cfg {
    pub scratchpad: String,
    pub lut: Lut,
    pub threshold: u8,
}

impl Cfg {
    pub fn new() -> Self {
        Self {
            scratchpad: String::from(SCRATCHPAD_TEST),
            lut: Lut::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_lut(mut self, lut: Lut) -> Self {
        self.lut = lut;
        self
    }
}

impl Default for Cfg {
    fn default() -> Self {
        Self::new()
    }
}
