use thiserror::Error;

/// Rejected at model construction: the token can never be an atom.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("atom token is empty")]
    EmptyToken,
    #[error("atom token contains forbidden character {0:?}")]
    ForbiddenChar(char),
}

/// Rejected while parsing operator text. No partial expression is ever
/// returned alongside one of these.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("input is empty or contains only whitespace")]
    Empty,
    #[error("unexpected ')' at byte {at}")]
    UnexpectedCloseParen { at: usize },
    #[error("unclosed '(': input ended inside a group")]
    UnclosedGroup,
    #[error("trailing content at byte {at} after a complete expression")]
    TrailingContent { at: usize },
    #[error("groups nested deeper than the maximum of {}", crate::MAX_DEPTH)]
    TooDeep,
    #[error("zero-length atom token")]
    EmptyAtom,
}

/// Rejected while decoding wire bytes. Each variant is one distinct
/// corruption class; the transport layer decides whether to request a
/// retransmit.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown tag byte {0:#04x}")]
    UnknownTag(u8),
    #[error("truncated input: a length, count, or tag declared more bytes than remain")]
    Truncated,
    #[error("atom with a declared length of zero")]
    EmptyAtom,
    #[error("groups nested deeper than the maximum of {}", crate::MAX_DEPTH)]
    TooDeep,
    #[error("{trailing} trailing byte(s) after a complete expression")]
    TrailingBytes { trailing: usize },
    #[error("varint does not fit in 64 bits")]
    VarintOverflow,
    #[error("atom bytes are not valid UTF-8")]
    InvalidUtf8,
    #[error("decoded atom violates the token rules: {0}")]
    Construction(#[from] ConstructionError),
}
