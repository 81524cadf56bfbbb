//! Lexer for GDB-style AT&T disassembly listings
//!
//! Each physical line is scanned independently:
//!
//! ```text
//! => 0x0000000000401136 <main+4>:	mov    %rsp,%rbp   # comment
//! ^^ ^^^^^^^^^^^^^^^^^^  ^^^^       ^^^    ^^^^ ^^^^   ^^^^^^^^^
//! op address             label      instr  registers   comment
//! ```
//!
//! Everything up to the `:` separator is header; a line without one has
//! nothing tagged past its address and label.

use crate::primitives::lexicon;
use crate::primitives::token::{ColorClass, Token, TokenStyle};

/// Tokenize a disassembly listing.
pub fn tokenize_disassembly(text: &[u8]) -> Vec<Token> {
    let mut out = Vec::new();
    let n = text.len();
    let mut i = 0;
    while i < n {
        let eol = text[i..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .map_or(n, |off| i + off);
        tokenize_line(text, i, eol, &mut out);
        i = match text.get(eol) {
            Some(b'\r') if text.get(eol + 1) == Some(&b'\n') => eol + 2,
            Some(_) => eol + 1,
            None => eol,
        };
    }
    tracing::trace!(
        bytes = n,
        tokens = out.len(),
        "tokenized disassembly"
    );
    out
}

fn push(out: &mut Vec<Token>, start: usize, end: usize, class: ColorClass, style: TokenStyle) {
    if end > start {
        out.push(Token::styled(start..end, class, style));
    }
}

fn skip_while(s: &[u8], mut p: usize, end: usize, pred: impl Fn(u8) -> bool) -> usize {
    while p < end && pred(s[p]) {
        p += 1;
    }
    p
}

#[inline]
fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

#[inline]
fn is_hex_prefix(s: &[u8], p: usize, end: usize) -> bool {
    p + 1 < end && s[p] == b'0' && (s[p + 1] == b'x' || s[p + 1] == b'X')
}

fn tokenize_line(s: &[u8], start: usize, eol: usize, out: &mut Vec<Token>) {
    let none = TokenStyle::empty();
    let mut p = skip_while(s, start, eol, is_blank);

    if p + 1 < eol && s[p] == b'=' && s[p + 1] == b'>' {
        push(out, p, p + 2, ColorClass::Operator, none);
        p = skip_while(s, p + 2, eol, is_blank);
    }

    if is_hex_prefix(s, p, eol) {
        let q = skip_while(s, p + 2, eol, |b| b.is_ascii_hexdigit());
        push(out, p, q, ColorClass::Address, none);
        p = q;
    }
    p = skip_while(s, p, eol, is_blank);

    if p < eol && s[p] == b'<' {
        // <name+offset>: only the name is a label
        let name_end = skip_while(s, p + 1, eol, |b| b != b'>' && b != b'+');
        push(out, p + 1, name_end, ColorClass::Label, none);
        p = skip_while(s, name_end, eol, |b| b != b'>');
        if p < eol {
            p += 1;
        }
    }

    p = skip_while(s, p, eol, |b| b != b':');
    if p >= eol {
        return;
    }
    p = skip_while(s, p + 1, eol, is_blank);

    let mnemonic_end = skip_while(s, p, eol, |b| b.is_ascii_alphanumeric());
    push(out, p, mnemonic_end, ColorClass::Instruction, TokenStyle::BOLD);
    p = mnemonic_end;

    while p < eol {
        match s[p] {
            b'#' => {
                push(out, p, eol, ColorClass::Comment, TokenStyle::ITALIC);
                return;
            }
            b'%' => {
                let q = skip_while(s, p + 1, eol, |b| {
                    b == b'_' || b.is_ascii_alphanumeric() || b >= 0x80
                });
                if q > p + 1 {
                    if lexicon::is_register(&s[p + 1..q]) {
                        push(out, p, q, ColorClass::Register, none);
                    }
                    p = q;
                } else {
                    p += 1;
                }
            }
            b'$' => {
                let q = if is_hex_prefix(s, p + 1, eol) {
                    skip_while(s, p + 3, eol, |b| b.is_ascii_hexdigit())
                } else {
                    skip_while(s, p + 1, eol, |b| b.is_ascii_digit())
                };
                if q > p + 1 {
                    push(out, p, q, ColorClass::Number, none);
                }
                p = q.max(p + 1);
            }
            b'0' if is_hex_prefix(s, p, eol) => {
                let q = skip_while(s, p + 2, eol, |b| b.is_ascii_hexdigit());
                push(out, p, q, ColorClass::Number, none);
                p = q;
            }
            _ => p += 1,
        }
    }
}
