use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConstructionError;

/// One command or sub-term: a leaf token, or an ordered group of child
/// expressions. Immutable once built; equality is structural.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sexp {
    Atom(String),
    Group(Vec<Sexp>),
}

/// Space, tab, newline, and carriage return separate tokens. CR is
/// included so CRLF-terminated operator input parses the same as LF.
pub(crate) fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

pub(crate) fn is_delimiter(b: u8) -> bool {
    matches!(b, b'(' | b')')
}

impl Sexp {
    /// Builds an atom, rejecting tokens the grammar could never have
    /// produced: the empty token, and tokens containing a separator or
    /// a paren. Everything else is kept verbatim, printable or not.
    pub fn atom(token: impl Into<String>) -> Result<Sexp, ConstructionError> {
        let token = token.into();

        if token.is_empty() {
            return Err(ConstructionError::EmptyToken);
        }

        // All forbidden characters are ASCII, so bytes of a multi-byte
        // character can never match.
        for ch in token.chars() {
            if ch.is_ascii() && (is_separator(ch as u8) || is_delimiter(ch as u8)) {
                return Err(ConstructionError::ForbiddenChar(ch));
            }
        }

        Ok(Sexp::Atom(token))
    }

    /// Builds a group. Any children are legal, including none.
    pub fn group(children: Vec<Sexp>) -> Sexp {
        Sexp::Group(children)
    }

    /// Group-nesting depth: 0 for an atom, 1 + deepest child for a group.
    pub fn depth(&self) -> usize {
        match self {
            Sexp::Atom(_) => 0,
            Sexp::Group(children) => 1 + children.iter().map(Sexp::depth).max().unwrap_or(0),
        }
    }

    /// The name-and-arguments reading the dispatch layer uses: a group
    /// whose first element is an atom yields that token as the command
    /// name and the remaining elements as positional arguments. This is
    /// a convention, not an invariant; anything else yields `None`.
    pub fn command(&self) -> Option<(&str, &[Sexp])> {
        match self {
            Sexp::Group(children) => match children.split_first() {
                Some((Sexp::Atom(name), args)) => Some((name, args)),
                _ => None,
            },
            Sexp::Atom(_) => None,
        }
    }
}

// Hosting applications embed commands in their own serde-encoded config
// and telemetry as the canonical text form; the binary wire format in
// `wire` stays the only machine encoding this crate defines.

impl Serialize for Sexp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Sexp {
    fn deserialize<D>(deserializer: D) -> Result<Sexp, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SexpVisitor;

        impl<'de> Visitor<'de> for SexpVisitor {
            type Value = Sexp;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an s-expression in its text form")
            }

            fn visit_str<E>(self, v: &str) -> Result<Sexp, E>
            where
                E: de::Error,
            {
                crate::parser::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(SexpVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(s: &str) -> Sexp {
        Sexp::atom(s).unwrap()
    }

    #[test]
    fn test_atom_token_rules() {
        assert!(Sexp::atom("add").is_ok());
        assert!(Sexp::atom("-1.5").is_ok());
        assert!(Sexp::atom("αβγ").is_ok());
        assert!(Sexp::atom("\x01\x02").is_ok());

        assert_eq!(Sexp::atom(""), Err(ConstructionError::EmptyToken));
        assert_eq!(Sexp::atom("a b"), Err(ConstructionError::ForbiddenChar(' ')));
        assert_eq!(Sexp::atom("a\tb"), Err(ConstructionError::ForbiddenChar('\t')));
        assert_eq!(Sexp::atom("a\nb"), Err(ConstructionError::ForbiddenChar('\n')));
        assert_eq!(Sexp::atom("a\rb"), Err(ConstructionError::ForbiddenChar('\r')));
        assert_eq!(Sexp::atom("("), Err(ConstructionError::ForbiddenChar('(')));
        assert_eq!(Sexp::atom("x)"), Err(ConstructionError::ForbiddenChar(')')));
    }

    #[test]
    fn test_structural_equality() {
        let left = Sexp::group(vec![a("add"), a("1")]);
        let right = Sexp::group(vec![a("add"), a("1")]);
        assert_eq!(left, right);

        // Order is semantic.
        assert_ne!(left, Sexp::group(vec![a("1"), a("add")]));
        assert_ne!(a("add"), Sexp::group(vec![a("add")]));
        assert_ne!(Sexp::group(vec![]), Sexp::group(vec![Sexp::group(vec![])]));
    }

    #[test]
    fn test_depth() {
        assert_eq!(a("x").depth(), 0);
        assert_eq!(Sexp::group(vec![]).depth(), 1);
        assert_eq!(Sexp::group(vec![a("x")]).depth(), 1);
        assert_eq!(
            Sexp::group(vec![a("x"), Sexp::group(vec![Sexp::group(vec![])])]).depth(),
            3
        );
    }

    #[test]
    fn test_command_convention() {
        let cmd = Sexp::group(vec![a("set-mode"), a("safe"), a("300")]);
        let (name, args) = cmd.command().unwrap();
        assert_eq!(name, "set-mode");
        assert_eq!(args, &[a("safe"), a("300")]);

        let ping = Sexp::group(vec![a("ping")]);
        let (name, args) = ping.command().unwrap();
        assert_eq!(name, "ping");
        assert!(args.is_empty());

        assert_eq!(a("ping").command(), None);
        assert_eq!(Sexp::group(vec![]).command(), None);
        assert_eq!(
            Sexp::group(vec![Sexp::group(vec![]), a("x")]).command(),
            None
        );
    }

    #[test]
    fn test_serde_text_form() {
        let cmd = Sexp::group(vec![a("set-mode"), a("safe")]);

        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#""(set-mode safe)""#);

        let back: Sexp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);

        let err = serde_json::from_str::<Sexp>(r#""(set-mode safe""#).unwrap_err();
        assert!(err.to_string().contains("unclosed"));
    }
}
