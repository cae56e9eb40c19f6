//! Linguistic analyzer capability.
//!
//! The drift-scoring pipeline treats the analyzer as an external NLP
//! collaborator: tokens with POS/lemma/dependency relation, named entity
//! spans, noun chunks, and sentence segmentation. `Analyzer` is the seam;
//! [`rule_based::RuleAnalyzer`] is the lightweight, rule-based implementation
//! this crate ships by default, in the same spirit as the hand-rolled
//! morphology helpers it was grounded on — not a full NLP engine, just enough
//! structure for the boost pipeline to work with.

pub mod lexicon;
pub mod rule_based;

/// Coarse part-of-speech, matching the Universal POS tags the entity-weight
/// table and message-analyzer rules reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    ProperNoun,
    Pronoun,
    Verb,
    Aux,
    Adj,
    Adv,
    Adp,
    Det,
    Conj,
    Num,
    Punct,
    Other,
}

impl Pos {
    pub fn is_noun_like(self) -> bool {
        matches!(self, Pos::Noun | Pos::ProperNoun)
    }
}

/// Dependency relation label, restricted to the set the message-analyzer
/// rules actually inspect (anaphora qualification, preference extraction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dep {
    Nsubj,
    Nsubjpass,
    Dobj,
    Pobj,
    Pcomp,
    Attr,
    Prep,
    Det,
    Amod,
    Compound,
    Root,
    Other,
}

/// A single analyzed token.
#[derive(Debug, Clone)]
pub struct Token {
    /// Index within the parsed document (0-based).
    pub index: usize,
    /// Raw surface text, as it appeared in the input.
    pub text: String,
    /// Lowercased surface text.
    pub lower: String,
    /// Lemma (base form); lowercased.
    pub lemma: String,
    /// Coarse part-of-speech.
    pub pos: Pos,
    /// Fine-grained tag, Penn-Treebank-flavored (`NNS`, `NNPS`, ...). Empty
    /// string when the coarse `pos` fully determines behavior.
    pub tag: String,
    /// Dependency relation to `head`.
    pub dep: Dep,
    /// Index of this token's syntactic head. Equals `index` for the root.
    pub head: usize,
    /// Whether this token is a stop word.
    pub is_stop: bool,
    /// Whether this token is punctuation.
    pub is_punct: bool,
    /// Whether this token is pure whitespace.
    pub is_space: bool,
}

/// A named-entity span over a contiguous token range `[start, end)`.
#[derive(Debug, Clone)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

/// A noun-chunk span over a contiguous token range `[start, end)`.
#[derive(Debug, Clone)]
pub struct ChunkSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// A sentence boundary over a contiguous token range `[start, end)`.
#[derive(Debug, Clone, Copy)]
pub struct SentenceSpan {
    pub start: usize,
    pub end: usize,
}

/// The parsed form of one unit of text: tokens, entities, noun chunks, and
/// sentence boundaries, all indexed against the same token array.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub text: String,
    pub tokens: Vec<Token>,
    pub entities: Vec<EntitySpan>,
    pub chunks: Vec<ChunkSpan>,
    pub sentences: Vec<SentenceSpan>,
}

impl ParsedDocument {
    /// Tokens belonging to the given sentence span.
    pub fn sentence_tokens(&self, span: SentenceSpan) -> &[Token] {
        &self.tokens[span.start..span.end]
    }

    /// Raw surface text for the given sentence span, joined with single
    /// spaces.
    pub fn sentence_text(&self, span: SentenceSpan) -> String {
        self.sentence_tokens(span)
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Entities whose span falls entirely within `[start, end)`.
    pub fn entities_in(&self, start: usize, end: usize) -> Vec<&EntitySpan> {
        self.entities
            .iter()
            .filter(|e| e.start >= start && e.end <= end)
            .collect()
    }

    /// Noun chunks whose span falls entirely within `[start, end)`.
    pub fn chunks_in(&self, start: usize, end: usize) -> Vec<&ChunkSpan> {
        self.chunks
            .iter()
            .filter(|c| c.start >= start && c.end <= end)
            .collect()
    }

    /// Children of the token at `idx` (tokens whose `head == idx`, excluding
    /// the token itself).
    pub fn children(&self, idx: usize) -> Vec<&Token> {
        self.tokens
            .iter()
            .filter(|t| t.head == idx && t.index != idx)
            .collect()
    }

    /// The full dependency subtree rooted at `idx`, in ascending token-index
    /// order, including `idx` itself.
    pub fn subtree(&self, idx: usize) -> Vec<usize> {
        let mut out = vec![idx];
        let mut frontier = vec![idx];
        while let Some(cur) = frontier.pop() {
            for child in self.children(cur) {
                out.push(child.index);
                frontier.push(child.index);
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Surface text of a token's dependency subtree, space-joined in
    /// ascending token-index order — the noun phrase rooted at a token.
    pub fn subtree_text(&self, idx: usize) -> String {
        self.subtree(idx)
            .into_iter()
            .filter_map(|i| self.tokens.get(i))
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}

/// The linguistic analyzer capability: parse a unit of text into tokens,
/// entities, noun chunks, and sentence boundaries.
pub trait Analyzer: Send + Sync {
    /// Parse a single text into a [`ParsedDocument`].
    fn parse(&self, text: &str) -> ParsedDocument;

    /// Parse many texts at once. Implementations that batch internally
    /// (e.g. a transformer pipeline) should override this; the default
    /// simply parses one at a time.
    fn parse_batch(&self, texts: &[&str]) -> Vec<ParsedDocument> {
        texts.iter().map(|t| self.parse(t)).collect()
    }
}
