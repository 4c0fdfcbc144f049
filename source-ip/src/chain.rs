/// The entries of one `X-Forwarded-For` value, leftmost being the hop
/// closest to the original client.
///
/// Spaces are stripped before splitting, so `"a, b"` and `"a,b"` are the same
/// chain. Other whitespace is left in place and makes its token unparseable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardChain {
    cleaned: String,
}

impl ForwardChain {
    pub fn parse(header: &str) -> Self {
        Self {
            cleaned: header.replace(' ', ""),
        }
    }

    /// Tokens in header order. An empty header yields a single empty token.
    pub fn tokens(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.cleaned.split(',')
    }

    pub fn len(&self) -> usize {
        self.tokens().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }
}
