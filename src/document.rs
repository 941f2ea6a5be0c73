//! Core document and credit types shared across the dashboard.
//!
//! Everything the contract and the storage layer exchange about a document
//! is defined here: wallet addresses, 32-byte content identifiers, document
//! kinds, declared financial attributes, and the merged per-account view
//! (credit profile plus document records).

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::error::{Error, Result};

/// A 20-byte Ethereum-style account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WalletAddress([u8; 20]);

impl WalletAddress {
    /// Parse a `0x`-prefixed 40-hex-character address. Case-insensitive.
    pub fn parse(s: &str) -> Result<Self> {
        let body = s
            .strip_prefix("0x")
            .ok_or_else(|| Error::Wallet(format!("address must start with 0x: {s}")))?;
        if body.len() != 40 {
            return Err(Error::Wallet(format!(
                "address must be 40 hex characters, got {}",
                body.len()
            )));
        }
        let bytes =
            hex::decode(body).map_err(|e| Error::Wallet(format!("address is not valid hex: {e}")))?;
        let raw: [u8; 20] = bytes
            .try_into()
            .map_err(|_| Error::Wallet("address must encode 20 bytes".into()))?;
        Ok(Self(raw))
    }

    /// Wrap raw address bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Abbreviated form for display: `0x1234...cdef`.
    #[must_use]
    pub fn short(&self) -> String {
        format!(
            "0x{}...{}",
            hex::encode(&self.0[..2]),
            hex::encode(&self.0[18..])
        )
    }

    /// First eight hex characters of the address body. Used as the leading
    /// component of storage keys so objects group by uploader.
    #[must_use]
    pub fn key_prefix(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// The first three big-endian 32-bit words of the address. These seed
    /// the placeholder attribute derivation in [`DeclaredAttributes::derive`].
    #[must_use]
    pub fn seed_words(&self) -> [u32; 3] {
        let b = &self.0;
        [
            u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            u32::from_be_bytes([b[4], b[5], b[6], b[7]]),
            u32::from_be_bytes([b[8], b[9], b[10], b[11]]),
        ]
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::str::FromStr for WalletAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A 32-byte content identifier, displayed as `0x`-prefixed lowercase hex.
///
/// Two digests share this type: the SHA-256 of raw document bytes (storage
/// integrity) and the Keccak-256 submission identifier recorded on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentHash([u8; 32]);

impl DocumentHash {
    /// SHA-256 digest of the document content.
    #[must_use]
    pub fn of_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self(hasher.finalize().into())
    }

    /// Keccak-256 identifier recorded on-chain for a submission.
    ///
    /// Hashes the UTF-8 concatenation of the storage location, the original
    /// file name, and the submission timestamp in decimal milliseconds. The
    /// timestamp makes resubmissions of the same file distinct.
    #[must_use]
    pub fn submission_identifier(location: &str, file_name: &str, timestamp_millis: u64) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(location.as_bytes());
        hasher.update(file_name.as_bytes());
        hasher.update(timestamp_millis.to_string().as_bytes());
        Self(hasher.finalize().into())
    }

    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a `0x`-prefixed 64-hex-character digest.
    pub fn parse(s: &str) -> Result<Self> {
        let body = s
            .strip_prefix("0x")
            .ok_or_else(|| Error::Validation(format!("digest must start with 0x: {s}")))?;
        let bytes = hex::decode(body)
            .map_err(|e| Error::Validation(format!("digest is not valid hex: {e}")))?;
        let raw: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::Validation("digest must encode 32 bytes".into()))?;
        Ok(Self(raw))
    }
}

impl std::fmt::Display for DocumentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::str::FromStr for DocumentHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The document kinds the registry accepts, in contract code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Bank statement (code 0).
    BankStatement,
    /// Utility bill (code 1).
    UtilityBill,
    /// Salary slip (code 2).
    SalarySlip,
}

impl DocumentType {
    /// Every kind, in code order.
    pub const ALL: [Self; 3] = [Self::BankStatement, Self::UtilityBill, Self::SalarySlip];

    /// Numeric code used in contract calls.
    #[must_use]
    pub const fn code(self) -> u64 {
        match self {
            Self::BankStatement => 0,
            Self::UtilityBill => 1,
            Self::SalarySlip => 2,
        }
    }

    /// Decode a contract code. Unknown codes return `None`.
    #[must_use]
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::BankStatement),
            1 => Some(Self::UtilityBill),
            2 => Some(Self::SalarySlip),
            _ => None,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BankStatement => "Bank Statement",
            Self::UtilityBill => "Utility Bill",
            Self::SalarySlip => "Salary Slip",
        }
    }

    /// Whether validators require this kind for a complete profile.
    #[must_use]
    pub const fn required(self) -> bool {
        !matches!(self, Self::SalarySlip)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Financial attributes declared alongside a submission.
///
/// Until validators extract real figures from the document during review,
/// submissions carry placeholder values derived deterministically from the
/// wallet address and the submission timestamp. The derivation spreads
/// accounts across realistic ranges so every account sees distinct numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclaredAttributes {
    /// Annual salary, 30 000 to 99 999.
    pub salary: u64,
    /// Years in current employment, 1 to 15.
    pub employment_years: u64,
    /// Repayment history score, 60 to 99.
    pub repayment_score: u64,
    /// Current account balance, 5 000 to 99 999.
    pub current_balance: u64,
    /// Most recent total utility billing, 100 to 1 999.
    pub utility_total: u64,
}

impl DeclaredAttributes {
    /// Derive placeholder attributes from the account and submission time.
    ///
    /// Each field mixes a different address seed word with a different
    /// multiple of the timestamp, so the fields vary independently.
    #[must_use]
    pub fn derive(account: &WalletAddress, timestamp_millis: u64) -> Self {
        let [s1, s2, s3] = account.seed_words();
        let (s1, s2, s3) = (u64::from(s1), u64::from(s2), u64::from(s3));
        let ts = timestamp_millis;
        Self {
            salary: 30_000 + ((s1 + ts) % 70_000),
            employment_years: 1 + ((s2 + ts * 2) % 15),
            repayment_score: 60 + ((s3 + ts * 3) % 40),
            current_balance: 5_000 + ((s1 + s2 + ts) % 95_000),
            utility_total: 100 + ((s2 + s3 + ts * 4) % 1_900),
        }
    }
}

/// An account's credit standing as reported by the registry contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreditProfile {
    /// Current credit score. Zero for accounts with no validated documents.
    pub score: u64,
    /// Number of documents validators have accepted.
    pub validated_documents: u64,
}

impl CreditProfile {
    /// The display band for the current score.
    #[must_use]
    pub const fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Credit score display bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 800 and above.
    Excellent,
    /// 700 to 799.
    Good,
    /// 600 to 699.
    Fair,
    /// Below 600, including brand-new accounts.
    Building,
}

impl ScoreBand {
    /// Band for a raw score.
    #[must_use]
    pub const fn from_score(score: u64) -> Self {
        match score {
            800.. => Self::Excellent,
            700..=799 => Self::Good,
            600..=699 => Self::Fair,
            _ => Self::Building,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Building => "Building",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One submitted document as the dashboard presents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// On-chain submission identifier.
    pub hash: DocumentHash,
    /// Document kind.
    pub doc_type: DocumentType,
    /// Declared financial attributes. Zeroed when per-document details
    /// could not be fetched.
    pub attributes: DeclaredAttributes,
    /// Authenticity flag declared at submission.
    pub authentic: bool,
    /// Whether a validator has accepted the document.
    pub validated: bool,
    /// When the document was submitted.
    pub submitted_at: DateTime<Utc>,
    /// When the document was validated, if it has been.
    pub validated_at: Option<DateTime<Utc>>,
}

/// What validators review for one document kind.
#[derive(Debug, Clone, Copy)]
pub struct DocumentCriteria {
    /// The document kind this entry describes.
    pub doc_type: DocumentType,
    /// Whether the kind is required for a complete profile.
    pub required: bool,
    /// What validators look for.
    pub review_points: [&'static str; 4],
    /// How the document feeds the credit score.
    pub contribution: &'static str,
}

/// Validator review criteria for every document kind, in code order.
#[must_use]
pub const fn criteria() -> [DocumentCriteria; 3] {
    [
        DocumentCriteria {
            doc_type: DocumentType::BankStatement,
            required: true,
            review_points: [
                "Current account balance",
                "Transaction history",
                "Account activity patterns",
                "Overdraft usage",
            ],
            contribution: "Balance stability, transaction patterns",
        },
        DocumentCriteria {
            doc_type: DocumentType::UtilityBill,
            required: true,
            review_points: [
                "Bill payment history",
                "Consistent payment amounts",
                "No late payment fees",
                "Service continuity",
            ],
            contribution: "Payment reliability, consistency",
        },
        DocumentCriteria {
            doc_type: DocumentType::SalarySlip,
            required: false,
            review_points: [
                "Monthly salary amount",
                "Employment duration",
                "Employer information",
                "Regular income pattern",
            ],
            contribution: "Income stability, employment history",
        },
    ]
}
