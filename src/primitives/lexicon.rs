//! Fixed word tables used by the tokenizers
//!
//! Tables are built once on first use. Lookups take `&[u8]` because the
//! tokenizers slice raw buffers that may not be valid UTF-8.

use once_cell::sync::Lazy;
use std::collections::HashSet;

fn table(words: &[&'static str]) -> HashSet<&'static [u8]> {
    words.iter().map(|w| w.as_bytes()).collect()
}

/// C++20 keywords, including the built-in type keywords. `static` and
/// `const` are classified as types instead.
static KEYWORDS: Lazy<HashSet<&'static [u8]>> = Lazy::new(|| {
    table(&[
        "bool", "char", "char8_t", "char16_t", "char32_t", "wchar_t", "short", "int",
        "long", "float", "double", "void", "signed", "unsigned", "alignas", "alignof",
        "asm", "auto", "break", "case", "catch", "class", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
        "co_return", "co_yield", "decltype", "default", "delete", "do", "else", "enum",
        "explicit", "export", "extern", "false", "final", "for", "friend", "goto", "if",
        "inline", "mutable", "namespace", "new", "noexcept", "nullptr", "operator",
        "override", "private", "protected", "public", "register", "reinterpret_cast",
        "requires", "return", "sizeof", "static_assert", "static_cast", "struct",
        "switch", "template", "this", "thread_local", "throw", "true", "try", "typedef",
        "typeid", "typename", "union", "using", "virtual", "volatile", "while",
    ])
});

/// Library typedefs and the storage qualifiers shown in the type color
static FUNDAMENTAL_TYPES: Lazy<HashSet<&'static [u8]>> = Lazy::new(|| {
    table(&[
        "size_t", "ptrdiff_t", "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t",
        "uint16_t", "uint32_t", "uint64_t", "intptr_t", "uintptr_t", "static", "const",
    ])
});

static STANDARD_NAMES: Lazy<HashSet<&'static [u8]>> = Lazy::new(|| {
    table(&[
        "string", "vector", "array", "map", "unordered_map", "set", "unordered_set",
        "list", "deque", "stack", "queue", "priority_queue", "bitset", "iostream",
        "istream", "ostream", "fstream", "stringstream", "exception", "runtime_error",
        "logic_error", "invalid_argument", "shared_ptr", "unique_ptr", "weak_ptr",
        "make_shared", "make_unique", "thread", "mutex", "lock_guard", "unique_lock",
        "future", "promise", "regex", "smatch", "cmatch", "function", "bind", "tuple",
        "pair", "optional", "variant", "any", "filesystem", "path",
    ])
});

static THIRD_PARTY_NAMESPACES: Lazy<HashSet<&'static [u8]>> = Lazy::new(|| {
    table(&[
        "asio", "filesystem", "system", "thread", "program_options", "property_tree",
        "date_time", "chrono", "atomic", "container",
    ])
});

static DOC_COMMANDS: Lazy<HashSet<&'static [u8]>> = Lazy::new(|| {
    table(&[
        // structural
        "brief", "short", "class", "struct", "union", "enum", "fn", "var", "def",
        "typedef", "file", "namespace", "package", "interface", "exception", "throw",
        "throws", "see", "sa", "link", "code", "endcode", "verbatim", "endverbatim",
        "copydoc", "copybrief", "copydetails",
        // sections
        "author", "authors", "version", "since", "date", "copyright", "license",
        "invariant", "note", "warning", "pre", "post", "remark", "attention", "par",
        "paragraph", "param", "tparam", "return", "returns", "result", "retval",
        // grouping
        "addtogroup", "ingroup", "weakgroup", "group", "defgroup",
        // misc
        "deprecated", "todo", "bug", "test", "example", "page", "section", "subsection",
        "subsubsection", "anchor", "ref", "refitem",
    ])
});

/// Operators longer than one byte, longest first.
pub const MULTI_CHAR_OPERATORS: &[&[u8]] = &[
    b"<<=", b">>=", b"==", b"!=", b"<=", b">=", b"&&", b"||", b"<<", b">>", b"++", b"--",
    b"+=", b"-=", b"*=", b"/=", b"%=", b"&=", b"|=", b"^=",
];

pub fn is_keyword(word: &[u8]) -> bool {
    KEYWORDS.contains(word)
}

pub fn is_fundamental_type(word: &[u8]) -> bool {
    FUNDAMENTAL_TYPES.contains(word)
}

pub fn is_standard_name(word: &[u8]) -> bool {
    STANDARD_NAMES.contains(word)
}

/// Names from the listed third-party namespaces, or anything prefixed `boost`
pub fn is_third_party_namespace(word: &[u8]) -> bool {
    word.starts_with(b"boost") || THIRD_PARTY_NAMESPACES.contains(word)
}

/// Member (`m_`), global (`g_`) and static (`s_`) naming conventions
pub fn is_special_variable(word: &[u8]) -> bool {
    matches!(word, [b'm' | b'g' | b's', b'_', ..])
}

pub fn is_doc_command(word: &[u8]) -> bool {
    DOC_COMMANDS.contains(word)
}

/// Bytes that may start an operator
#[inline]
pub fn is_operator_byte(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'=' | b'<' | b'>' | b'!' | b'&' | b'|' | b'^'
            | b'~' | b'?' | b':'
    )
}

/// x86 register names as written after `%` in AT&T syntax.
pub fn is_register(name: &[u8]) -> bool {
    const BASE: &[&[u8]] = &[
        b"rax", b"rbx", b"rcx", b"rdx", b"rsi", b"rdi", b"rsp", b"rbp", b"eax", b"ebx",
        b"ecx", b"edx", b"esi", b"edi", b"esp", b"ebp", b"ax", b"bx", b"cx", b"dx", b"si",
        b"di", b"sp", b"bp", b"al", b"bl", b"cl", b"dl", b"ah", b"bh", b"ch", b"dh", b"cs",
        b"ds", b"es", b"fs", b"gs", b"ss", b"rip", b"eip", b"ip",
    ];
    if BASE.contains(&name) {
        return true;
    }
    if let Some(rest) = name.strip_prefix(b"r") {
        // r8..r15 with an optional b/w/d size suffix
        let digits = match rest {
            [b'8' | b'9', tail @ ..] => tail,
            [b'1', b'0'..=b'5', tail @ ..] => tail,
            _ => return false,
        };
        return matches!(digits, [] | [b'b' | b'w' | b'd']);
    }
    for prefix in [b"xmm", b"ymm", b"zmm"] {
        if let Some(num) = name.strip_prefix(prefix.as_slice()) {
            return !num.is_empty()
                && num.len() <= 2
                && num.iter().all(u8::is_ascii_digit)
                && num.iter().fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0')) <= 31;
        }
    }
    false
}
