//! Minimal ABI codec for the credit registry contract.
//!
//! The registry's interface only ever exchanges 32-byte words: static
//! values (`uint256`, `bool`, `address`, `bytes32`) and dynamic arrays of
//! those. This module encodes call data for that shape and decodes return
//! data back out, with every access bounds-checked so malformed node
//! responses surface as errors instead of panics.
//!
//! Call data layout:
//!
//! ```text
//! [ 4-byte selector | arg word 0 | arg word 1 | ... ]
//! ```
//!
//! Dynamic arrays in return data are referenced indirectly: the head word
//! holds a byte offset to the array body, which starts with a length word.

use sha3::{Digest, Keccak256};

use crate::document::{DocumentHash, WalletAddress};
use crate::error::{Error, Result};

/// Width of one ABI word in bytes.
pub const WORD: usize = 32;

/// Selector of the standard `Error(string)` revert payload.
pub const ERROR_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Keccak-256 digest.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// First four bytes of the Keccak-256 of a canonical function signature.
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Call data builder: a selector followed by 32-byte argument words.
#[derive(Debug, Clone)]
pub struct CallData {
    bytes: Vec<u8>,
}

impl CallData {
    /// Start call data for a function signature.
    #[must_use]
    pub fn new(signature: &str) -> Self {
        Self {
            bytes: selector(signature).to_vec(),
        }
    }

    /// Append an address, left-padded to a word.
    #[must_use]
    pub fn push_address(mut self, address: &WalletAddress) -> Self {
        self.bytes.extend_from_slice(&[0u8; 12]);
        self.bytes.extend_from_slice(address.as_bytes());
        self
    }

    /// Append a `uint256` from a `u64`.
    #[must_use]
    pub fn push_u64(mut self, value: u64) -> Self {
        self.bytes.extend_from_slice(&[0u8; 24]);
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Append a `bool`.
    #[must_use]
    pub fn push_bool(mut self, value: bool) -> Self {
        self.bytes.extend_from_slice(&[0u8; 31]);
        self.bytes.push(u8::from(value));
        self
    }

    /// Append raw 32 bytes.
    #[must_use]
    pub fn push_bytes32(mut self, bytes: &[u8; 32]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Finish as a `0x`-prefixed hex string for `eth_call` or
    /// `eth_sendTransaction`.
    #[must_use]
    pub fn build(self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }
}

/// Typed reader over contract return data.
#[derive(Debug, Clone)]
pub struct ReturnData {
    data: Vec<u8>,
}

impl ReturnData {
    /// Wrap raw return bytes.
    #[must_use]
    pub const fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Parse a `0x`-prefixed hex payload.
    pub fn from_hex(payload: &str) -> Result<Self> {
        let body = payload.strip_prefix("0x").unwrap_or(payload);
        let data = hex::decode(body)
            .map_err(|e| Error::Abi(format!("return data is not valid hex: {e}")))?;
        Ok(Self { data })
    }

    /// True when the contract returned nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of complete head words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.data.len() / WORD
    }

    fn word(&self, index: usize) -> Result<&[u8]> {
        let start = index
            .checked_mul(WORD)
            .ok_or_else(|| Error::Abi(format!("word index {index} overflows")))?;
        let end = start
            .checked_add(WORD)
            .ok_or_else(|| Error::Abi(format!("word index {index} overflows")))?;
        self.data.get(start..end).ok_or_else(|| {
            Error::Abi(format!(
                "return data too short: wanted word {index}, have {} bytes",
                self.data.len()
            ))
        })
    }

    fn u64_from_word(word: &[u8], index: usize) -> Result<u64> {
        if word[..WORD - 8].iter().any(|&b| b != 0) {
            return Err(Error::Abi(format!("uint at word {index} exceeds u64 range")));
        }
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&word[WORD - 8..]);
        Ok(u64::from_be_bytes(raw))
    }

    /// Read a `uint256` head word as a `u64`.
    pub fn u64_at(&self, index: usize) -> Result<u64> {
        Self::u64_from_word(self.word(index)?, index)
    }

    /// Read a `bool` head word. Anything but canonical 0 or 1 is an error.
    pub fn bool_at(&self, index: usize) -> Result<bool> {
        let word = self.word(index)?;
        if word[..WORD - 1].iter().any(|&b| b != 0) || word[WORD - 1] > 1 {
            return Err(Error::Abi(format!("word {index} is not a canonical bool")));
        }
        Ok(word[WORD - 1] == 1)
    }

    /// Read an `address` head word.
    pub fn address_at(&self, index: usize) -> Result<WalletAddress> {
        let word = self.word(index)?;
        if word[..12].iter().any(|&b| b != 0) {
            return Err(Error::Abi(format!("word {index} is not a canonical address")));
        }
        let mut raw = [0u8; 20];
        raw.copy_from_slice(&word[12..]);
        Ok(WalletAddress::from_bytes(raw))
    }

    /// Read a `bytes32` head word as a document hash.
    pub fn bytes32_at(&self, index: usize) -> Result<DocumentHash> {
        let word = self.word(index)?;
        let mut raw = [0u8; 32];
        raw.copy_from_slice(word);
        Ok(DocumentHash::from_bytes(raw))
    }

    fn array_body(&self, index: usize) -> Result<(usize, usize)> {
        let offset = usize::try_from(self.u64_at(index)?)
            .map_err(|_| Error::Abi(format!("array offset at word {index} overflows")))?;
        if offset % WORD != 0 {
            return Err(Error::Abi(format!(
                "array offset at word {index} is not word-aligned"
            )));
        }
        let length_end = offset
            .checked_add(WORD)
            .ok_or_else(|| Error::Abi(format!("array offset at word {index} overflows")))?;
        let length_word = self.data.get(offset..length_end).ok_or_else(|| {
            Error::Abi(format!("array offset at word {index} is outside return data"))
        })?;
        let length = usize::try_from(Self::u64_from_word(length_word, index)?)
            .map_err(|_| Error::Abi(format!("array length at word {index} overflows")))?;
        let body_bytes = length
            .checked_mul(WORD)
            .ok_or_else(|| Error::Abi(format!("array length at word {index} overflows")))?;
        let body_end = length_end
            .checked_add(body_bytes)
            .ok_or_else(|| Error::Abi(format!("array length at word {index} overflows")))?;
        if body_end > self.data.len() {
            return Err(Error::Abi(format!(
                "array at word {index} claims {length} items beyond return data"
            )));
        }
        Ok((length_end, length))
    }

    fn array_at<T>(
        &self,
        index: usize,
        read: impl Fn(&Self, usize) -> Result<T>,
    ) -> Result<Vec<T>> {
        let (body_start, length) = self.array_body(index)?;
        let first_word = body_start / WORD;
        let mut items = Vec::with_capacity(length);
        for i in 0..length {
            items.push(read(self, first_word + i)?);
        }
        Ok(items)
    }

    /// Read a `uint256[]` referenced from a head word.
    pub fn u64_array_at(&self, index: usize) -> Result<Vec<u64>> {
        self.array_at(index, Self::u64_at)
    }

    /// Read a `bool[]` referenced from a head word.
    pub fn bool_array_at(&self, index: usize) -> Result<Vec<bool>> {
        self.array_at(index, Self::bool_at)
    }

    /// Read a `bytes32[]` referenced from a head word.
    pub fn bytes32_array_at(&self, index: usize) -> Result<Vec<DocumentHash>> {
        self.array_at(index, Self::bytes32_at)
    }
}

/// Extract the human reason from `Error(string)` revert data. Returns
/// `None` when the payload has another shape.
#[must_use]
pub fn decode_revert(data: &[u8]) -> Option<String> {
    let payload = data.strip_prefix(ERROR_SELECTOR.as_slice())?;
    let reader = ReturnData::from_bytes(payload.to_vec());
    let offset = usize::try_from(reader.u64_at(0).ok()?).ok()?;
    let length_word = reader.data.get(offset..offset.checked_add(WORD)?)?;
    let length = usize::try_from(ReturnData::u64_from_word(length_word, 0).ok()?).ok()?;
    let start = offset.checked_add(WORD)?;
    let bytes = reader.data.get(start..start.checked_add(length)?)?;
    Some(String::from_utf8_lossy(bytes).into_owned())
}
