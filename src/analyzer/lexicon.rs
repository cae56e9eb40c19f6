//! Closed word-class lists backing the rule-based tagger and NER gazetteer.
//!
//! These are hand-curated, not derived from a corpus — adequate for the
//! short, conversational utterances this service analyzes, not a general
//! English POS tagger.

/// Personal, possessive, and demonstrative pronouns.
pub const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us", "our", "ours",
    "ourselves", "they", "them", "their", "theirs", "themselves", "this", "that", "these",
    "those", "who", "whom", "whose", "which", "what",
];

/// Determiners and articles.
pub const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "no", "every", "each",
    "either", "neither", "all", "both", "several", "many", "much", "few", "little", "other",
    "another", "such",
];

/// Prepositions, including multi-word-adjacent simple forms.
pub const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "of", "off",
    "over", "under", "again", "further", "than", "versus", "vs",
];

/// Auxiliary and modal verbs.
pub const AUX_VERBS: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];

/// Coordinating and subordinating conjunctions.
pub const CONJUNCTIONS: &[&str] = &[
    "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "since", "unless",
    "while", "whereas", "if",
];

/// General English stop words (function words carrying little topical
/// signal on their own). Distinct from `preprocess::REMOVE_WORDS`, which is
/// the exact filler/politeness set the encoder-facing normalizer removes.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "so", "because", "as", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "is", "am", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may",
    "might", "must", "i", "me", "my", "you", "your", "he", "him", "his", "she", "her", "it",
    "its", "we", "us", "our", "they", "them", "their", "this", "that", "these", "those", "not",
    "no", "nor",
];

/// First-name gazetteer for heuristic PERSON detection (capitalized token
/// outside sentence-initial position still counts via the capitalization
/// check in the tagger; this list catches common given names that double as
/// common nouns, e.g. "Will", "Grace").
pub const PERSON_NAMES: &[&str] = &[
    "james", "mary", "john", "patricia", "robert", "jennifer", "michael", "linda", "david",
    "elizabeth", "sarah", "emma", "olivia", "noah", "liam", "ava", "sophia", "mason", "grace",
    "will", "alex", "sam", "chris", "jordan", "taylor", "morgan",
];

/// Geo-political entity gazetteer (countries, major cities).
pub const GPE_NAMES: &[&str] = &[
    "america", "usa", "canada", "mexico", "france", "germany", "spain", "italy", "china",
    "japan", "india", "brazil", "london", "paris", "berlin", "tokyo", "chicago", "seattle",
    "boston", "austin", "denver", "portland", "dallas",
];

/// Nationality/religious/political (NORP) gazetteer.
pub const NORP_NAMES: &[&str] = &[
    "american", "canadian", "french", "german", "spanish", "italian", "chinese", "japanese",
    "indian", "brazilian", "christian", "muslim", "buddhist", "jewish", "democrat",
    "republican",
];

/// Weekday/month vocabulary backing the DATE gazetteer.
pub const DATE_WORDS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "january",
    "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december", "today", "tomorrow", "yesterday", "tonight", "weekend",
];

/// Relative-time vocabulary backing the TIME gazetteer.
pub const TIME_WORDS: &[&str] = &["morning", "afternoon", "evening", "noon", "midnight"];
