//! A lightweight, rule-based [`Analyzer`](super::Analyzer) implementation.
//!
//! This is not a full NLP engine — no statistical tagger, no learned
//! embeddings — just enough tokenization, POS heuristics, dependency
//! heuristics, gazetteer NER, and chunking to drive the boost pipeline's
//! rules against short, conversational English utterances. Swap in a real
//! pipeline (spaCy-over-FFI, a transformer tagger, whatever) by implementing
//! [`Analyzer`](super::Analyzer) directly; nothing else in this crate
//! depends on this module.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexicon::{
    AUX_VERBS, CONJUNCTIONS, DATE_WORDS, DETERMINERS, GPE_NAMES, NORP_NAMES, PERSON_NAMES,
    PREPOSITIONS, PRONOUNS, STOP_WORDS, TIME_WORDS,
};
use super::{Analyzer, ChunkSpan, Dep, EntitySpan, ParsedDocument, Pos, SentenceSpan, Token};

static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static WORD_OR_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?|[0-9]+(?:\.[0-9]+)?|[^\sA-Za-z0-9]").unwrap());
static CARDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap());
static ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|[0-9]+(st|nd|rd|th))$").unwrap());
static MONEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[$£€][0-9]+(\.[0-9]+)?$").unwrap());
static QUANTITY_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(mile|miles|km|kg|lb|lbs|pound|pounds|kilometer|kilometers|meter|meters|mph|gallon|gallons|ounce|ounces)$").unwrap());

/// Rule-based [`Analyzer`](super::Analyzer): regex tokenization, closed
/// word-class POS tagging, heuristic dependency assignment, gazetteer-based
/// NER, and a determiner/adjective/noun chunker.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleAnalyzer;

impl RuleAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn tag_pos(word: &str, lower: &str, is_sentence_initial: bool) -> Pos {
        if PRONOUNS.contains(&lower) {
            return Pos::Pronoun;
        }
        if DETERMINERS.contains(&lower) {
            return Pos::Det;
        }
        if AUX_VERBS.contains(&lower) {
            return Pos::Aux;
        }
        if PREPOSITIONS.contains(&lower) {
            return Pos::Adp;
        }
        if CONJUNCTIONS.contains(&lower) {
            return Pos::Conj;
        }
        if CARDINAL.is_match(lower) || ORDINAL.is_match(lower) {
            return Pos::Num;
        }
        if lower.ends_with("ly") && lower.len() > 3 {
            return Pos::Adv;
        }
        if (lower.ends_with("ing") || lower.ends_with("ed")) && lower.len() > 4 {
            return Pos::Verb;
        }
        let is_capitalized = word
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false);
        if is_capitalized && !is_sentence_initial {
            return Pos::ProperNoun;
        }
        if is_capitalized && is_sentence_initial && PERSON_NAMES.contains(&lower) {
            return Pos::ProperNoun;
        }
        if lower.ends_with("ous") || lower.ends_with("ive") || lower.ends_with("ful") {
            return Pos::Adj;
        }
        Pos::Noun
    }

    fn lemmatize(lower: &str, pos: Pos) -> String {
        match pos {
            Pos::Verb => {
                if let Some(stem) = lower.strip_suffix("ing") {
                    return restore_silent_e(stem);
                }
                if let Some(stem) = lower.strip_suffix("ied") {
                    return format!("{stem}y");
                }
                if let Some(stem) = lower.strip_suffix("ed") {
                    return restore_silent_e(stem);
                }
                lower.to_string()
            }
            Pos::Noun | Pos::ProperNoun => {
                if let Some(stem) = lower.strip_suffix("ies") {
                    return format!("{stem}y");
                }
                if lower.ends_with("sses") || lower.ends_with("shes") || lower.ends_with("ches") {
                    return lower[..lower.len() - 2].to_string();
                }
                if let Some(stem) = lower.strip_suffix('s') {
                    if !lower.ends_with("ss") && !lower.ends_with("us") && stem.len() > 2 {
                        return stem.to_string();
                    }
                }
                lower.to_string()
            }
            _ => lower.to_string(),
        }
    }

    fn fine_tag(word: &str, lower: &str, pos: Pos) -> String {
        match pos {
            Pos::Noun if lower.ends_with('s') && !lower.ends_with("ss") => "NNS".to_string(),
            Pos::ProperNoun if lower.ends_with('s') && !lower.ends_with("ss") => {
                "NNPS".to_string()
            }
            Pos::Noun => "NN".to_string(),
            Pos::ProperNoun => "NNP".to_string(),
            Pos::Verb => "VBG".to_string(),
            Pos::Pronoun if word.eq_ignore_ascii_case("it") => "PRP".to_string(),
            _ => String::new(),
        }
    }
}

fn restore_silent_e(stem: &str) -> String {
    // Heuristic only: good enough for common "-ing"/"-ed" verbs like
    // "renovating" -> "renovat" -> "renovate".
    if stem.ends_with(|c: char| "bcdfgjklmnpqrstvz".contains(c)) && stem.len() > 2 {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

fn classify_ner(lower: &str) -> Option<&'static str> {
    if PERSON_NAMES.contains(&lower) {
        return Some("PERSON");
    }
    if GPE_NAMES.contains(&lower) {
        return Some("GPE");
    }
    if NORP_NAMES.contains(&lower) {
        return Some("NORP");
    }
    if DATE_WORDS.contains(&lower) {
        return Some("DATE");
    }
    if TIME_WORDS.contains(&lower) {
        return Some("TIME");
    }
    if MONEY.is_match(lower) {
        return Some("MONEY");
    }
    if QUANTITY_UNIT.is_match(lower) {
        return Some("QUANTITY");
    }
    if ORDINAL.is_match(lower) {
        return Some("ORDINAL");
    }
    if CARDINAL.is_match(lower) {
        return Some("CARDINAL");
    }
    None
}

impl Analyzer for RuleAnalyzer {
    fn parse(&self, text: &str) -> ParsedDocument {
        let mut doc = ParsedDocument {
            text: text.to_string(),
            ..Default::default()
        };

        // Sentence segmentation: split on terminal punctuation, retaining
        // the raw character ranges so token offsets map back cleanly.
        let mut sentence_bounds: Vec<(usize, usize)> = Vec::new();
        let mut last_end = 0usize;
        for m in SENTENCE_BOUNDARY.find_iter(text) {
            sentence_bounds.push((last_end, m.end()));
            last_end = m.end();
        }
        if last_end < text.len() {
            sentence_bounds.push((last_end, text.len()));
        }
        if sentence_bounds.is_empty() {
            sentence_bounds.push((0, text.len()));
        }

        for (start, end) in sentence_bounds {
            let chunk = &text[start..end];
            if chunk.trim().is_empty() {
                continue;
            }
            let sent_start = doc.tokens.len();
            tokenize_sentence(chunk, &mut doc);
            let sent_end = doc.tokens.len();
            if sent_end > sent_start {
                doc.sentences.push(SentenceSpan {
                    start: sent_start,
                    end: sent_end,
                });
                assign_dependencies(&mut doc, sent_start, sent_end);
                extract_entities(&mut doc, sent_start, sent_end);
                extract_chunks(&mut doc, sent_start, sent_end);
            }
        }

        doc
    }
}

fn tokenize_sentence(chunk: &str, doc: &mut ParsedDocument) {
    let mut sentence_initial = true;
    for m in WORD_OR_PUNCT.find_iter(chunk) {
        let raw = m.as_str();
        let lower = raw.to_lowercase();
        let is_punct = raw.chars().all(|c| !c.is_alphanumeric());
        let pos = if is_punct {
            Pos::Punct
        } else {
            RuleAnalyzer::tag_pos(raw, &lower, sentence_initial)
        };
        let lemma = if is_punct {
            lower.clone()
        } else {
            RuleAnalyzer::lemmatize(&lower, pos)
        };
        let tag = RuleAnalyzer::fine_tag(raw, &lower, pos);
        let index = doc.tokens.len();
        doc.tokens.push(Token {
            index,
            text: raw.to_string(),
            lower: lower.clone(),
            lemma,
            pos,
            tag,
            dep: Dep::Other,
            head: index,
            is_stop: STOP_WORDS.contains(&lower.as_str()),
            is_punct,
            is_space: false,
        });
        if !is_punct {
            sentence_initial = false;
        }
    }
}

/// Heuristic dependency assignment for one sentence's token range.
///
/// Root = first verb-like token (`Aux` or `Verb`), falling back to the last
/// token. Nouns/pronouns immediately before the root attach as `nsubj`;
/// nouns after it attach as `dobj`; determiners/adjectives attach to the
/// next noun; prepositions attach to the preceding head and their following
/// noun attaches to them as `pobj`.
fn assign_dependencies(doc: &mut ParsedDocument, start: usize, end: usize) {
    let root = (start..end)
        .find(|&i| matches!(doc.tokens[i].pos, Pos::Verb | Pos::Aux))
        .unwrap_or(end - 1);
    doc.tokens[root].dep = Dep::Root;
    doc.tokens[root].head = root;

    let mut pending_subject = true;
    let mut last_prep: Option<usize> = None;
    let mut last_verb_like = root;

    for i in start..end {
        if i == root {
            pending_subject = false;
            continue;
        }
        let pos = doc.tokens[i].pos;
        match pos {
            Pos::Noun | Pos::ProperNoun | Pos::Pronoun => {
                if let Some(prep) = last_prep {
                    doc.tokens[i].head = prep;
                    doc.tokens[i].dep = Dep::Pobj;
                    last_prep = None;
                } else if pending_subject && i < root {
                    doc.tokens[i].head = root;
                    doc.tokens[i].dep = Dep::Nsubj;
                } else if i > root {
                    doc.tokens[i].head = last_verb_like;
                    doc.tokens[i].dep = if matches!(doc.tokens[last_verb_like].pos, Pos::Aux) {
                        Dep::Attr
                    } else {
                        Dep::Dobj
                    };
                } else {
                    doc.tokens[i].head = root;
                    doc.tokens[i].dep = Dep::Dobj;
                }
            }
            Pos::Det => {
                if let Some(next_noun) = find_next_noun(doc, i, end) {
                    doc.tokens[i].head = next_noun;
                    doc.tokens[i].dep = Dep::Det;
                }
            }
            Pos::Adj => {
                if let Some(next_noun) = find_next_noun(doc, i, end) {
                    doc.tokens[i].head = next_noun;
                    doc.tokens[i].dep = Dep::Amod;
                }
            }
            Pos::Adp => {
                doc.tokens[i].head = last_verb_like;
                doc.tokens[i].dep = Dep::Prep;
                last_prep = Some(i);
            }
            Pos::Verb => {
                doc.tokens[i].head = root;
                last_verb_like = i;
            }
            _ => {}
        }
    }
}

fn find_next_noun(doc: &ParsedDocument, from: usize, end: usize) -> Option<usize> {
    (from + 1..end).find(|&i| doc.tokens[i].pos.is_noun_like())
}

fn extract_entities(doc: &mut ParsedDocument, start: usize, end: usize) {
    let mut i = start;
    while i < end {
        let tok = &doc.tokens[i];
        if tok.is_punct {
            i += 1;
            continue;
        }
        if let Some(label) = classify_ner(&tok.lower) {
            doc.entities.push(EntitySpan {
                text: tok.text.clone(),
                label: label.to_string(),
                start: i,
                end: i + 1,
            });
        }
        i += 1;
    }
}

/// Determiner/adjective/noun chunker: greedily extends a noun chunk
/// backward from each head noun over contiguous determiners and adjectives.
fn extract_chunks(doc: &mut ParsedDocument, start: usize, end: usize) {
    let mut i = start;
    while i < end {
        if !doc.tokens[i].pos.is_noun_like() {
            i += 1;
            continue;
        }
        let head = i;
        let mut chunk_start = i;
        while chunk_start > start
            && matches!(doc.tokens[chunk_start - 1].pos, Pos::Det | Pos::Adj)
        {
            chunk_start -= 1;
        }
        if chunk_start < head {
            let text = doc.tokens[chunk_start..=head]
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            doc.chunks.push(ChunkSpan {
                text,
                start: chunk_start,
                end: head + 1,
            });
        }
        i = head + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_multiple_sentences() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("I like pizza. What about you?");
        assert_eq!(doc.sentences.len(), 2);
    }

    #[test]
    fn tags_pronoun_and_verb() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("I am renovating the kitchen.");
        assert_eq!(doc.tokens[0].pos, Pos::Pronoun);
        assert!(doc.tokens.iter().any(|t| t.lemma == "renovate"));
    }

    #[test]
    fn detects_proper_noun_by_capitalization() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("I talked to Sarah yesterday.");
        let sarah = doc.tokens.iter().find(|t| t.text == "Sarah").unwrap();
        assert_eq!(sarah.pos, Pos::ProperNoun);
    }

    #[test]
    fn gazetteer_detects_person_entity() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("Sarah is coming over.");
        assert!(doc.entities.iter().any(|e| e.label == "PERSON"));
    }

    #[test]
    fn noun_chunk_includes_leading_determiner() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("The kitchen renovation is expensive.");
        assert!(doc.chunks.iter().any(|c| c.text == "The kitchen"));
    }

    #[test]
    fn root_token_has_self_head() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("I like pizza.");
        let root = doc.tokens.iter().find(|t| t.dep == Dep::Root).unwrap();
        assert_eq!(root.head, root.index);
    }

    #[test]
    fn subtree_text_collects_contiguous_span() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("The kitchen renovation is expensive.");
        let head = doc
            .tokens
            .iter()
            .find(|t| t.text == "renovation")
            .unwrap()
            .index;
        let text = doc.subtree_text(head);
        assert!(text.contains("renovation"));
    }
}
