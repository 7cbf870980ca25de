//! Core type aliases and constants for contract storage addressing.
//!
//! Storage words are big-endian, matching how the interpreter's stack
//! serializes 256-bit values into slot keys and slot values.

/// 20-byte account address owning a storage trie.
pub type Address = [u8; ADDRESS_LEN];

/// 32-byte storage key, already hash-normalized by the caller.
pub type SlotKey = [u8; HASH_LEN];

/// 32-byte storage value.
pub type Word = [u8; WORD_LEN];

/// Length of an account address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Length of a hash (and therefore of a storage key) in bytes.
pub const HASH_LEN: usize = 32;

/// Length of a storage value in bytes.
pub const WORD_LEN: usize = 32;

/// A zero-valued storage word. Unset slots read as this value.
pub const ZERO_WORD: Word = [0u8; WORD_LEN];

/// A zero-valued address (20 zero bytes).
pub const ZERO_ADDRESS: Address = [0u8; ADDRESS_LEN];

/// Render bytes as a `0x`-prefixed lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Encode a u64 as a big-endian storage word.
pub fn word_from_u64(v: u64) -> Word {
    let mut word = ZERO_WORD;
    word[WORD_LEN - 8..].copy_from_slice(&v.to_be_bytes());
    word
}

/// Decode a storage word as a u64.
///
/// Returns `None` if any of the high 24 bytes are set.
pub fn word_to_u64(word: &Word) -> Option<u64> {
    if word[..WORD_LEN - 8].iter().any(|b| *b != 0) {
        return None;
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[WORD_LEN - 8..]);
    Some(u64::from_be_bytes(buf))
}

/// Build a slot key from a small slot index (e.g. the position of a
/// statically laid out state variable).
pub fn slot_from_index(index: u64) -> SlotKey {
    word_from_u64(index)
}

/// Copy an address out of a slice.
///
/// Returns `None` if the slice is not exactly [`ADDRESS_LEN`] bytes.
pub fn address_from_slice(bytes: &[u8]) -> Option<Address> {
    bytes.try_into().ok()
}

/// Copy a 32-byte word out of a slice.
///
/// Returns `None` if the slice is not exactly [`WORD_LEN`] bytes.
pub fn word_from_slice(bytes: &[u8]) -> Option<Word> {
    bytes.try_into().ok()
}

/// Parse a hex string (with or without `0x`) into a fixed-width array.
pub fn parse_hex<const N: usize>(s: &str) -> Option<[u8; N]> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let mut out = [0u8; N];
    hex::decode_to_slice(s, &mut out).ok()?;
    Some(out)
}
