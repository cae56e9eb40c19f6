//! driftctl: debug CLI for the drift-scoring pipeline.
//!
//! Exercises the same capabilities `driftomed` serves over HTTP, without
//! standing up a server — useful for inspecting what the preprocessor,
//! analyzer, and boost engine do to a given pair of messages.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use drift_core::analyzer::rule_based::RuleAnalyzer;
use drift_core::analyzer::Analyzer;
use drift_core::boost::compute_boost;
use drift_core::encoder::hashing::HashingEncoder;
use drift_core::encoder::Encoder;
use drift_core::entities::extract_weighted_entities;
use drift_core::message::analyze_message;
use drift_core::overlap::{set_overlap, weighted_overlap};
use drift_core::preprocess::preprocess;

#[derive(Parser)]
#[command(name = "driftctl", version, about = "drift-core debug CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize text into the encoder-facing lemma stream.
    Preprocess {
        /// Raw input text.
        text: String,
    },

    /// Extract the weighted entity set from a message.
    Entities {
        /// Raw input text.
        text: String,
    },

    /// Run the full message analyzer (question/anaphora/preference/pivot).
    Analyze {
        /// Message text.
        text: String,
    },

    /// Compute set-cardinality and weighted entity overlap between two texts.
    Overlap {
        text1: String,
        text2: String,
    },

    /// Run the boost engine over a current/previous message pair, using the
    /// deterministic hashing encoder for both vectors.
    Drift {
        /// Previous message in the conversation.
        previous: String,
        /// Current message in the conversation.
        current: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let analyzer: Arc<dyn Analyzer> = Arc::new(RuleAnalyzer::new());

    match cli.command {
        Commands::Preprocess { text } => {
            println!("{}", preprocess(&text, analyzer.as_ref()));
        }
        Commands::Entities { text } => {
            let doc = analyzer.parse(&text);
            let analysis = extract_weighted_entities(&doc);
            for entity in &analysis.entities {
                println!("{:<20} {:<12} {:.1}", entity.lemma, entity.kind, entity.weight);
            }
            println!("total_weight = {:.2}", analysis.total_weight);
        }
        Commands::Analyze { text } => {
            let analysis = analyze_message(analyzer.as_ref(), &text);
            println!("is_question      = {}", analysis.is_question);
            println!("has_anaphoric_ref = {}", analysis.has_anaphoric_ref);
            println!("has_preference    = {}", analysis.has_preference);
            println!("has_topic_pivot   = {}", analysis.has_topic_pivot);
            println!("is_compound       = {}", analysis.is_compound);
            println!("pivot_detected    = {}", analysis.pivot_detected);
        }
        Commands::Overlap { text1, text2 } => {
            let set = set_overlap(&text1, &text2, analyzer.as_ref());
            println!("set overlap_score = {:.3}", set.overlap_score);
            println!("shared = {:?}", set.shared);

            let doc1 = analyzer.parse(&text1);
            let doc2 = analyzer.parse(&text2);
            let weighted = weighted_overlap(
                &extract_weighted_entities(&doc1),
                &extract_weighted_entities(&doc2),
            );
            println!("weighted overlap_score = {:.3}", weighted.score);
        }
        Commands::Drift { previous, current } => {
            let encoder = HashingEncoder::default();
            let vecs = encoder
                .encode_batch(&[previous.as_str(), current.as_str()])
                .into_diagnostic()?;
            let result = compute_boost(&current, &previous, &vecs[1], &vecs[0], analyzer.as_ref());
            println!("raw      = {:.3}", result.raw);
            println!("boosted  = {:.3}", result.boosted);
            println!("multiplier = {:.3}", result.multiplier);
            println!("rules    = {:?}", result.rules_applied);
        }
    }

    Ok(())
}
