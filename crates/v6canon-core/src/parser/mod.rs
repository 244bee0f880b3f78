//! Address parser — tokenizer and the fully expanded `Address` type
//!
//! Converts `xxxx:xxxx:...:xxxx` text into exactly eight lower-cased
//! hexadecimal groups. Compressed (`::`) and IPv4-suffixed forms are not
//! accepted as input.

pub mod tokenizer;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};
use tokenizer::Tokenizer;

/// Number of groups in a fully expanded IPv6 address
pub const GROUP_COUNT: usize = 8;

/// A fully expanded IPv6 address kept in textual group form
///
/// Serializes as its original text; deserializing goes through `parse`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    original: String,
    groups: [String; GROUP_COUNT],
}

impl Address {
    /// Parse address text into eight groups
    ///
    /// # Errors
    /// Returns `InvalidAddressFormat` when the text is not exactly eight
    /// colon-separated groups of 1-4 hex digits.
    pub fn parse(text: &str) -> Result<Self> {
        parse(text)
    }

    /// The eight groups, lower-cased, leading zeros preserved
    pub fn groups(&self) -> &[String; GROUP_COUNT] {
        &self.groups
    }

    /// The text this address was parsed from
    pub fn original(&self) -> &str {
        &self.original
    }

    /// RFC 5952 style compressed representation
    pub fn simplified(&self) -> String {
        crate::normalizer::simplify_groups(&self.groups)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(text: String) -> Result<Self> {
        parse(&text)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.original
    }
}

impl std::str::FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Parse address text into an `Address`
///
/// # Guarantees
/// - Deterministic: same input always produces the same groups
/// - Case-insensitive: groups are stored lower-cased
///
/// # Example
/// ```
/// let addr = v6canon_core::parser::parse("2001:0DB8:0:0:0:0:2:1").unwrap();
/// assert_eq!(addr.groups()[1], "0db8");
/// ```
pub fn parse(text: &str) -> Result<Address> {
    let tokens = Tokenizer::new(text).tokenize()?;
    let found = tokens.len();
    let groups: Vec<String> = tokens.into_iter().map(|t| t.text).collect();
    let groups: [String; GROUP_COUNT] = groups.try_into().map_err(|_| {
        Error::InvalidAddressFormat(format!(
            "expected {} groups, found {}",
            GROUP_COUNT, found
        ))
    })?;

    tracing::debug!(address = text, "parsed address");

    Ok(Address {
        original: text.to_string(),
        groups,
    })
}
