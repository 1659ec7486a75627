//! Reference tokens.
//!
//! A token is the opaque string a client receives in place of an object
//! that cannot be flattened into JSON: the reserved `object:` prefix, an
//! 8-character base-36 encoding of the wall-clock millisecond timestamp,
//! and an 8-character random lowercase alphanumeric suffix.
//!
//! The timestamp prefix makes tokens chronologically sortable and, combined
//! with the random suffix, collision-resistant. It is *not* the source of
//! truth for creation time; entries store their timestamp explicitly and
//! the embedded one is never decoded.
//!
//! The prefix is reserved on the wire: any string starting with `object:`
//! is treated as a reference by the decoder, so clients that need such a
//! literal must avoid or escape it.

use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Reserved prefix distinguishing tokens from ordinary string values.
pub const TOKEN_PREFIX: &str = "object:";

/// Fixed width of the base-36 timestamp component.
const TIMESTAMP_LEN: usize = 8;

/// Length of the random suffix.
const SUFFIX_LEN: usize = 8;

/// Alphabet for both components.
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// An opaque, URL-safe reference to a registered object.
///
/// Tokens are minted by the registry and compare/hash as plain strings;
/// they serialize as their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Mints a fresh token from the current wall clock and a random suffix.
    pub fn mint() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let mut id = String::with_capacity(TOKEN_PREFIX.len() + TIMESTAMP_LEN + SUFFIX_LEN);
        id.push_str(TOKEN_PREFIX);
        push_base36(&mut id, millis);

        let mut rng = rand::thread_rng();
        for _ in 0..SUFFIX_LEN {
            id.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
        }

        Token(id)
    }

    /// Interprets a wire string as a token.
    ///
    /// Returns `None` when the string does not carry the reserved prefix;
    /// such strings are ordinary values. Anything prefixed parses - whether
    /// it resolves is the registry's call, and an unresolvable prefixed
    /// string is a client error, never a literal.
    pub fn parse(s: &str) -> Option<Self> {
        if Self::is_reference(s) {
            Some(Token(s.to_string()))
        } else {
            None
        }
    }

    /// True if the string claims the reserved reference prefix.
    pub fn is_reference(s: &str) -> bool {
        s.starts_with(TOKEN_PREFIX)
    }

    /// The token's wire form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error for strings that are not reference-shaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParseError;

impl fmt::Display for TokenParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing '{}' prefix", TOKEN_PREFIX)
    }
}

impl std::error::Error for TokenParseError {}

impl FromStr for Token {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::parse(s).ok_or(TokenParseError)
    }
}

/// Appends `n` in base 36, zero-padded to the fixed timestamp width.
fn push_base36(out: &mut String, mut n: u64) {
    let mut buf = [ALPHABET[0]; TIMESTAMP_LEN];
    let mut i = TIMESTAMP_LEN;
    while n > 0 && i > 0 {
        i -= 1;
        buf[i] = ALPHABET[(n % 36) as usize];
        n /= 36;
    }
    for b in buf {
        out.push(b as char);
    }
}
