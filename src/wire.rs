//! Binary wire format for the uplink.
//!
//! Each expression is one tag byte followed by a tag-specific body:
//!
//! - `0x00` atom: varint byte length, then that many raw token bytes
//!   (the token's UTF-8, carried verbatim).
//! - `0x01` group: varint element count, then each child in order.
//!
//! Varints are base-128 with a continuation bit, least-significant group
//! first, minimal for small values. Every length is explicit, so the
//! stream is self-delimiting and needs no escaping and no outer framing;
//! one byte sequence is exactly one expression.

use crate::error::DecodeError;
use crate::sexp::Sexp;
use crate::MAX_DEPTH;

const TAG_ATOM: u8 = 0x00;
const TAG_GROUP: u8 = 0x01;

/// Encodes one expression for transmission. Total: every value the model
/// can construct has an encoding.
pub fn encode(sexp: &Sexp) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(sexp, &mut out);
    out
}

fn encode_into(sexp: &Sexp, out: &mut Vec<u8>) {
    match sexp {
        Sexp::Atom(token) => {
            out.push(TAG_ATOM);
            write_varint(token.len() as u64, out);
            out.extend_from_slice(token.as_bytes());
        }
        Sexp::Group(children) => {
            out.push(TAG_GROUP);
            write_varint(children.len() as u64, out);
            for child in children {
                encode_into(child, out);
            }
        }
    }
}

/// Decodes exactly one expression from `bytes`. Leftover bytes after a
/// complete decode are corruption, not padding; so is anything that would
/// produce a value the model itself could not have constructed.
pub fn decode(bytes: &[u8]) -> Result<Sexp, DecodeError> {
    let mut reader = Reader { bytes, pos: 0 };
    let sexp = reader.decode_expr(0)?;

    let trailing = bytes.len() - reader.pos;
    if trailing > 0 {
        return Err(DecodeError::TrailingBytes { trailing });
    }

    Ok(sexp)
}

fn write_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let low = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(low);
            return;
        }
        out.push(low | 0x80);
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .bytes
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let mut value: u64 = 0;
        let mut shift = 0;
        loop {
            let byte = self.next_byte()?;
            // The tenth group starts at bit 63 and may only carry one bit.
            if shift >= 64 || (shift == 63 && byte & 0x7f > 1) {
                return Err(DecodeError::VarintOverflow);
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    // `depth` counts the groups already open around this expression,
    // exactly as in the parser.
    fn decode_expr(&mut self, depth: usize) -> Result<Sexp, DecodeError> {
        match self.next_byte()? {
            TAG_ATOM => {
                let declared = self.read_varint()?;
                if declared == 0 {
                    return Err(DecodeError::EmptyAtom);
                }
                let len = usize::try_from(declared).map_err(|_| DecodeError::Truncated)?;
                if self.bytes.len() - self.pos < len {
                    return Err(DecodeError::Truncated);
                }

                let raw = &self.bytes[self.pos..self.pos + len];
                self.pos += len;

                let token =
                    std::str::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8)?;
                // Re-enter through the constructor so a corrupted stream
                // can never smuggle a separator or paren into a token.
                Ok(Sexp::atom(token)?)
            }
            TAG_GROUP => {
                if depth + 1 > MAX_DEPTH {
                    return Err(DecodeError::TooDeep);
                }

                let count = self.read_varint()?;
                // The declared count is untrusted input and must not size
                // an allocation; each child consumes real bytes or fails.
                let mut children = Vec::new();
                for _ in 0..count {
                    children.push(self.decode_expr(depth + 1)?);
                }
                Ok(Sexp::group(children))
            }
            tag => Err(DecodeError::UnknownTag(tag)),
        }
    }
}
