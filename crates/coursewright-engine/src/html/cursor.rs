/// A byte cursor over markup with position tracking.
///
/// Only ever stops on ASCII delimiters, so every index it hands out is a
/// valid `str` boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The markup being scanned.
    pub s: &'a str,
    /// Current index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks `n` bytes ahead of the current one.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat)
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes, clamped to the end of input.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Everything from the current position to the end.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i.min(self.s.len())..]
    }

    /// Offset from the current position to the next occurrence of `pat`.
    pub fn find(&self, pat: &str) -> Option<usize> {
        self.rest().find(pat)
    }

    /// Like [`find`](Self::find) but ignores ASCII case, for closing tags
    /// such as `</SCRIPT>`.
    pub fn find_ignore_ascii_case(&self, pat: &str) -> Option<usize> {
        let hay = self.rest().as_bytes();
        let needle = pat.as_bytes();
        if needle.is_empty() {
            return Some(0);
        }
        hay.windows(needle.len())
            .position(|window| window.eq_ignore_ascii_case(needle))
    }

    /// Advances while `pred` holds, returning the consumed slice.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        &self.s[start..self.i]
    }
}
