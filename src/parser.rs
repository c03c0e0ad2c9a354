use crate::error::ParseError;
use crate::sexp::{is_delimiter, is_separator, Sexp};
use crate::MAX_DEPTH;

/// Parses one complete expression from operator-typed text.
///
/// Surrounding whitespace is ignored; the rest of the input must reduce
/// to exactly one expression. Single forward pass, one byte of lookahead,
/// no backtracking. Scanning is byte-oriented: every structural character
/// is ASCII, so the bytes of a multi-byte UTF-8 character are always
/// plain atom content.
pub fn parse(text: &str) -> Result<Sexp, ParseError> {
    let mut cursor = Cursor::new(text);

    cursor.skip_separators();
    if cursor.peek().is_none() {
        return Err(ParseError::Empty);
    }

    let sexp = cursor.parse_expr(0)?;

    cursor.skip_separators();
    if cursor.peek().is_some() {
        return Err(ParseError::TrailingContent { at: cursor.pos });
    }

    Ok(sexp)
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Cursor<'a> {
        Cursor { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek(), Some(b) if is_separator(b)) {
            self.pos += 1;
        }
    }

    // `depth` is the number of groups already open around this position.
    fn parse_expr(&mut self, depth: usize) -> Result<Sexp, ParseError> {
        match self.peek() {
            Some(b'(') => self.parse_group(depth),
            Some(b')') => Err(ParseError::UnexpectedCloseParen { at: self.pos }),
            Some(_) => self.parse_atom(),
            None => Err(ParseError::UnclosedGroup),
        }
    }

    fn parse_group(&mut self, depth: usize) -> Result<Sexp, ParseError> {
        if depth + 1 > MAX_DEPTH {
            return Err(ParseError::TooDeep);
        }

        // Consume the '('.
        self.pos += 1;

        let mut children = Vec::new();
        loop {
            self.skip_separators();
            match self.peek() {
                None => return Err(ParseError::UnclosedGroup),
                Some(b')') => {
                    self.pos += 1;
                    return Ok(Sexp::group(children));
                }
                Some(_) => children.push(self.parse_expr(depth + 1)?),
            }
        }
    }

    fn parse_atom(&mut self) -> Result<Sexp, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if !is_separator(b) && !is_delimiter(b)) {
            self.pos += 1;
        }

        // The scan only stops at ASCII separators and parens, so this
        // slice is on character boundaries and contains neither; the only
        // constructor failure reachable here is the zero-length token.
        Sexp::atom(&self.text[start..self.pos]).map_err(|_| ParseError::EmptyAtom)
    }
}
