use std::collections::BTreeMap;
use std::fmt;

use crate::constants::SYMBOL_COUNT;

/// One byte value.
pub type Symbol = u8;

/// Symbol -> occurrence count, present symbols only.
///
/// Ordered by symbol so iteration (and therefore the serialized header) is
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count for `symbol`, returning the previous one. A zero count removes it.
    pub fn insert(&mut self, symbol: Symbol, count: u64) -> Option<u64> {
        if count == 0 {
            return self.counts.remove(&symbol);
        }
        self.counts.insert(symbol, count)
    }

    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the analysed input length.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(s, c)| (*s, *c))
    }
}

impl FromIterator<(Symbol, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (symbol, count) in iter {
            table.insert(symbol, count);
        }
        table
    }
}

/// Guard-bit-prefixed code.
///
/// `value` read MSB-first is a `1` guard bit followed by the root-to-leaf path
/// (0 = left, 1 = right); `length` counts the guard bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    pub value: u64,
    pub length: u32,
}

impl Code {
    /// The root's synthetic code: just the guard bit.
    pub const GUARD: Code = Code { value: 1, length: 1 };

    #[inline]
    pub fn left(self) -> Code {
        Code { value: self.value << 1, length: self.length + 1 }
    }

    #[inline]
    pub fn right(self) -> Code {
        Code { value: (self.value << 1) | 1, length: self.length + 1 }
    }

    /// Path bits without the guard bit.
    pub fn path(&self) -> u64 {
        if self.length <= 1 {
            return 0;
        }
        self.value & ((1u64 << (self.length - 1)) - 1)
    }

    /// True if the guard bit sits at position `length - 1`.
    pub fn has_guard_bit(&self) -> bool {
        self.length >= 1 && self.length <= 64 && (self.value >> (self.length - 1)) == 1
    }

    /// True if this code's path is a proper or equal prefix of `other`'s path.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.length > other.length {
            return false;
        }
        (other.value >> (other.length - self.length)) == self.value
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.length as usize)
    }
}

/// Symbol -> code, at most 256 entries.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOL_COUNT],
    len: usize,
}

impl Default for CodeTable {
    fn default() -> Self {
        Self { codes: [None; SYMBOL_COUNT], len: 0 }
    }
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol, code: Code) {
        if self.codes[symbol as usize].replace(code).is_none() {
            self.len += 1;
        }
    }

    #[inline]
    pub fn get(&self, symbol: Symbol) -> Option<Code> {
        self.codes[symbol as usize]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Longest code in the table, guard bit included.
    pub fn max_length(&self) -> u32 {
        self.iter().map(|(_, c)| c.length).max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.map(|code| (s as Symbol, code)))
    }
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(s, c)| (s, c.to_string())))
            .finish()
    }
}
