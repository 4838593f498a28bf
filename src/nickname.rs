//! Nickname validation, done before any connection is opened.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Longest accepted nickname, in characters.
pub const MAX_NICKNAME_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NicknameError {
    /// The entry URL carries no `nick=` parameter.
    Missing,
    Empty,
    TooLong { len: usize },
    InvalidChar(char),
}

impl fmt::Display for NicknameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NicknameError::Missing => write!(f, "no nick= parameter in the entry URL"),
            NicknameError::Empty => write!(f, "nickname must not be empty"),
            NicknameError::TooLong { len } => write!(
                f,
                "nickname is {len} characters long (max {MAX_NICKNAME_LEN})"
            ),
            NicknameError::InvalidChar(c) => {
                write!(f, "nickname may only contain letters and digits, found {c:?}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NicknameError {}

/// A validated nickname: 1 to 10 ASCII letters or digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    pub fn parse(raw: &str) -> Result<Self, NicknameError> {
        if raw.is_empty() {
            return Err(NicknameError::Empty);
        }
        if let Some(c) = raw.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(NicknameError::InvalidChar(c));
        }
        if raw.len() > MAX_NICKNAME_LEN {
            return Err(NicknameError::TooLong { len: raw.len() });
        }
        Ok(Self(raw.to_string()))
    }

    /// Validate the `nick` query parameter of an entry URL.
    pub fn from_url(url: &str) -> Result<Self, NicknameError> {
        let raw = nickname_from_query(url).ok_or(NicknameError::Missing)?;
        Self::parse(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Nickname {
    type Err = NicknameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw value of the `nick` parameter in a URL's query string, undecoded.
pub fn nickname_from_query(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once('?')?;
    let query = rest.split('#').next().unwrap_or(rest);
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("nick="))
}
