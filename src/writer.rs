use std::fmt;

use crate::sexp::Sexp;

/// Renders the canonical text form: one space between siblings, nothing
/// else. The grammar forbids separators and parens inside atoms, so no
/// quoting or escaping exists and `parse(&to_text(&e))` always rebuilds
/// `e` exactly.
pub fn to_text(sexp: &Sexp) -> String {
    sexp.to_string()
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Sexp::Atom(token) => f.write_str(token),
            Sexp::Group(children) => {
                write!(f, "{}", '(')?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", ' ')?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, "{}", ')')
            }
        }
    }
}
