//! Lexer for C/C++-like source text
//!
//! # Design
//! - **Single forward pass**: the scanner never moves backward, so emitted
//!   tokens are sorted and non-overlapping by construction.
//! - **Total**: malformed literals and comments run to the end of their
//!   region instead of failing.
//! - **Sparse output**: whitespace and unclassified identifiers produce no
//!   token; the renderer paints gaps in the default color.
//!
//! Line-start state is tracked explicitly: a `#` is only a directive when
//! nothing but blanks precedes it on the line.

use crate::primitives::lexicon;
use crate::primitives::token::{ColorClass, Token, TokenStyle};

/// Tokenize a whole source buffer.
pub fn tokenize_source(text: &[u8]) -> Vec<Token> {
    let mut scanner = SourceScanner::new(text);
    scanner.run();
    tracing::trace!(
        bytes = text.len(),
        tokens = scanner.out.len(),
        "tokenized source buffer"
    );
    scanner.out
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphabetic() || b >= 0x80
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

#[inline]
fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

#[inline]
fn is_line_break(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// How a literal prefix (`u8`, `u`, `U`, `L`, optionally followed by `R`)
/// introduces the literal that follows it.
enum Literal {
    /// Raw string; the payload is the offset of the `R`
    Raw(usize),
    /// Quoted string; offset of the opening quote
    String(usize),
    /// Character literal; offset of the opening quote
    Char(usize),
}

struct SourceScanner<'a> {
    s: &'a [u8],
    out: Vec<Token>,
}

impl<'a> SourceScanner<'a> {
    fn new(s: &'a [u8]) -> Self {
        Self {
            s,
            out: Vec::with_capacity(s.len() / 4),
        }
    }

    #[inline]
    fn at(&self, i: usize) -> Option<u8> {
        self.s.get(i).copied()
    }

    fn emit(&mut self, start: usize, end: usize, class: ColorClass, style: TokenStyle) {
        if end <= start {
            return;
        }
        if class == ColorClass::Default && style.is_empty() {
            return;
        }
        self.out.push(Token::styled(start..end, class, style));
    }

    fn line_end(&self, from: usize) -> usize {
        self.s[from..]
            .iter()
            .position(|&b| is_line_break(b))
            .map_or(self.s.len(), |off| from + off)
    }

    fn run(&mut self) {
        let n = self.s.len();
        let mut i = 0;
        let mut line_start = true;

        while i < n {
            let c = self.s[i];

            if is_line_break(c) {
                line_start = true;
                i += 1;
                continue;
            }
            if is_blank(c) {
                i += 1;
                continue;
            }
            if c == b'#' && line_start {
                i = self.preprocessor(i);
                line_start = false;
                continue;
            }
            line_start = false;

            if c == b'/' && self.at(i + 1) == Some(b'/') {
                i = self.line_comment(i);
                continue;
            }
            if c == b'/' && self.at(i + 1) == Some(b'*') {
                i = self.block_comment(i);
                continue;
            }

            if let Some(literal) = self.literal_at(i) {
                i = match literal {
                    Literal::Raw(r) => {
                        let end = self.scan_raw_string(r);
                        self.emit(i, end, ColorClass::String, TokenStyle::empty());
                        end
                    }
                    Literal::String(q) => {
                        let end = self.scan_quoted(q, b'"');
                        self.emit(i, end, ColorClass::String, TokenStyle::empty());
                        end
                    }
                    Literal::Char(q) => {
                        let end = self.scan_quoted(q, b'\'');
                        self.emit(i, end, ColorClass::Char, TokenStyle::empty());
                        end
                    }
                };
                continue;
            }

            if c.is_ascii_digit()
                || (c == b'.' && self.at(i + 1).is_some_and(|b| b.is_ascii_digit()))
            {
                let end = self.scan_number(i);
                self.emit(i, end, ColorClass::Number, TokenStyle::empty());
                i = end;
                continue;
            }

            if c == b',' || c == b';' {
                self.emit(i, i + 1, ColorClass::Delimiter, TokenStyle::empty());
                i += 1;
                continue;
            }
            if matches!(c, b'(' | b')' | b'[' | b']' | b'{' | b'}') {
                self.emit(i, i + 1, ColorClass::Bracket, TokenStyle::empty());
                i += 1;
                continue;
            }

            if lexicon::is_operator_byte(c) {
                let rest = &self.s[i..];
                let len = lexicon::MULTI_CHAR_OPERATORS
                    .iter()
                    .find(|op| rest.starts_with(op))
                    .map_or(1, |op| op.len());
                self.emit(i, i + len, ColorClass::Operator, TokenStyle::empty());
                i += len;
                continue;
            }

            if is_ident_start(c) {
                let end = self.scan_identifier(i);
                let (class, style) = classify_identifier(&self.s[i..end]);
                self.emit(i, end, class, style);
                i = end;
                continue;
            }

            // Stray punctuation and mid-line '#'
            i += 1;
        }
    }

    /// Recognize a string or char literal starting at `i`, with or
    /// without an encoding prefix.
    fn literal_at(&self, i: usize) -> Option<Literal> {
        let rest = &self.s[i..];
        let prefix_len = if rest.starts_with(b"u8") {
            2
        } else if matches!(rest.first(), Some(b'u' | b'U' | b'L')) {
            1
        } else {
            0
        };
        let k = i + prefix_len;
        match (self.at(k), self.at(k + 1)) {
            (Some(b'R'), Some(b'"')) => Some(Literal::Raw(k)),
            (Some(b'"'), _) => Some(Literal::String(k)),
            (Some(b'\''), _) => Some(Literal::Char(k)),
            _ => None,
        }
    }

    /// `//` comment to the end of the line. Returns the line end.
    fn line_comment(&mut self, start: usize) -> usize {
        let end = self.line_end(start);
        self.comment_with_annotations(start, start + 2, end, end);
        end
    }

    /// `/* */` comment. An unterminated comment runs to the end of the
    /// buffer. Returns one past the closing `*/`.
    fn block_comment(&mut self, start: usize) -> usize {
        let body = start + 2;
        let (content_end, end) = match find(&self.s[body..], b"*/") {
            Some(off) => (body + off, body + off + 2),
            None => (self.s.len(), self.s.len()),
        };
        self.comment_with_annotations(start, body, content_end, end);
        end
    }

    /// Emit a comment spanning `[start, end)`, split around documentation
    /// commands found in `[content_start, content_end)`.
    fn comment_with_annotations(
        &mut self,
        start: usize,
        content_start: usize,
        content_end: usize,
        end: usize,
    ) {
        let mut segment = start;
        let mut k = content_start;
        while k < content_end {
            let b = self.s[k];
            if b == b'@' || b == b'\\' {
                let mut j = k + 1;
                while j < content_end && is_ident_continue(self.s[j]) {
                    j += 1;
                }
                if j > k + 1 && lexicon::is_doc_command(&self.s[k + 1..j]) {
                    self.emit(segment, k, ColorClass::Comment, TokenStyle::ITALIC);
                    self.emit(k, j, ColorClass::DocAnnotation, TokenStyle::BOLD);
                    segment = j;
                    k = j;
                    continue;
                }
            }
            k += 1;
        }
        self.emit(segment, end, ColorClass::Comment, TokenStyle::ITALIC);
    }

    /// Directive line starting at the `#` at `hash`. Returns the offset
    /// where normal scanning resumes: the end of the physical line, or
    /// later if a block comment inside the directive crosses it.
    fn preprocessor(&mut self, hash: usize) -> usize {
        let mut k = hash + 1;
        while self.at(k).is_some_and(is_blank) {
            k += 1;
        }
        let name_start = k;
        while self.at(k).is_some_and(is_ident_continue) {
            k += 1;
        }
        self.emit(hash, k, ColorClass::Preprocessor, TokenStyle::BOLD);
        let takes_path = matches!(&self.s[name_start..k], b"include" | b"import");

        let eol = self.line_end(k);
        let mut p = k;
        while p < eol {
            let c = self.s[p];
            let next = self.at(p + 1);
            if c == b'/' && next == Some(b'/') {
                self.emit(p, eol, ColorClass::Comment, TokenStyle::ITALIC);
                p = eol;
            } else if c == b'/' && next == Some(b'*') {
                p = self.block_comment(p);
            } else if takes_path && (c == b'<' || c == b'"') {
                let mut q = p + 1;
                while q < eol && self.s[q] != b'>' && self.s[q] != b'"' {
                    q += 1;
                }
                if q < eol {
                    q += 1;
                }
                self.emit(p, q, ColorClass::IncludePath, TokenStyle::empty());
                p = q;
            } else if c == b'"' {
                let q = self.scan_quoted(p, b'"');
                self.emit(p, q, ColorClass::String, TokenStyle::empty());
                p = q;
            } else if c == b'\'' {
                let q = self.scan_quoted(p, b'\'');
                self.emit(p, q, ColorClass::Char, TokenStyle::empty());
                p = q;
            } else {
                p += 1;
            }
        }
        p.max(eol)
    }

    /// Quoted literal whose opening quote is at `open`. A backslash consumes
    /// exactly the next byte; an unescaped line break ends the literal
    /// without being included.
    fn scan_quoted(&self, open: usize, quote: u8) -> usize {
        let n = self.s.len();
        let mut j = open + 1;
        while j < n {
            let c = self.s[j];
            if c == b'\\' {
                j = (j + 2).min(n);
            } else if c == quote {
                return j + 1;
            } else if is_line_break(c) {
                return j;
            } else {
                j += 1;
            }
        }
        n
    }

    /// Raw string whose `R` is at `r`. Without a `(` before the end of the
    /// line the literal is scanned as an ordinary quoted string.
    fn scan_raw_string(&self, r: usize) -> usize {
        let delim_start = r + 2;
        let mut j = delim_start;
        while j < self.s.len() && self.s[j] != b'(' && !is_line_break(self.s[j]) {
            j += 1;
        }
        if self.at(j) != Some(b'(') {
            return self.scan_quoted(r + 1, b'"');
        }
        let mut closing = Vec::with_capacity(j - delim_start + 2);
        closing.push(b')');
        closing.extend_from_slice(&self.s[delim_start..j]);
        closing.push(b'"');

        let body = j + 1;
        match find(&self.s[body..], &closing) {
            Some(off) => body + off + closing.len(),
            None => self.s.len(),
        }
    }

    fn scan_number(&self, start: usize) -> usize {
        let s = self.s;
        let n = s.len();
        let digits_while = |mut j: usize, pred: fn(&u8) -> bool| {
            while j < n && (pred(&s[j]) || s[j] == b'\'' || s[j] == b'_') {
                j += 1;
            }
            j
        };
        let exponent = |mut j: usize, markers: &[u8]| {
            if j < n && markers.contains(&s[j]) {
                j += 1;
                if j < n && (s[j] == b'+' || s[j] == b'-') {
                    j += 1;
                }
                j = digits_while(j, u8::is_ascii_digit);
            }
            j
        };

        let mut j = start;
        let second = self.at(start + 1);
        if s[start] == b'0' && matches!(second, Some(b'x' | b'X')) {
            j = digits_while(j + 2, u8::is_ascii_hexdigit);
            if j < n && s[j] == b'.' {
                j = digits_while(j + 1, u8::is_ascii_hexdigit);
            }
            j = exponent(j, b"pP");
        } else if s[start] == b'0' && matches!(second, Some(b'b' | b'B')) {
            j = digits_while(j + 2, |b| *b == b'0' || *b == b'1');
        } else if s[start] == b'0' && matches!(second, Some(b'0'..=b'7')) {
            j = digits_while(j + 1, |b| (b'0'..=b'7').contains(b));
        } else {
            j = digits_while(j, u8::is_ascii_digit);
            if j < n && s[j] == b'.' {
                j = digits_while(j + 1, u8::is_ascii_digit);
            }
            j = exponent(j, b"eE");
        }
        // Suffixes: u, l, f, z, user-defined literals
        while j < n && (s[j].is_ascii_alphabetic() || s[j] == b'_') {
            j += 1;
        }
        j
    }

    fn scan_identifier(&self, start: usize) -> usize {
        let mut j = start + 1;
        while self.at(j).is_some_and(is_ident_continue) {
            j += 1;
        }
        j
    }
}

fn classify_identifier(word: &[u8]) -> (ColorClass, TokenStyle) {
    if lexicon::is_keyword(word) {
        (ColorClass::Keyword, TokenStyle::BOLD)
    } else if lexicon::is_fundamental_type(word) {
        (ColorClass::Type, TokenStyle::empty())
    } else if lexicon::is_standard_name(word) {
        (ColorClass::StandardName, TokenStyle::empty())
    } else if lexicon::is_third_party_namespace(word) {
        (ColorClass::ThirdPartyNamespace, TokenStyle::empty())
    } else if lexicon::is_special_variable(word) {
        (ColorClass::SpecialVariable, TokenStyle::empty())
    } else {
        (ColorClass::Default, TokenStyle::empty())
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
