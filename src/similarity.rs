//! Lexical similarity between content items.
//!
//! Computes pairwise Jaccard similarity over whitespace-tokenized word sets
//! and surfaces item relationships above a fixed threshold. Purely lexical:
//! no stemming, no stop-word removal, no embeddings.

use std::collections::HashSet;

use crate::models::{ContentItem, Relationship};

/// Pairs at or below this similarity are not reported by [`relate`].
const RELATE_THRESHOLD: f64 = 0.3;

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}

/// Jaccard index of the two texts' lower-cased word sets, in [0, 1].
///
/// Two empty token sets yield 0.0 rather than dividing zero by zero.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let set_a = word_set(a);
    let set_b = word_set(b);

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();

    intersection as f64 / union as f64
}

/// Examine every unordered pair of items once and report the pairs whose
/// similarity exceeds the threshold.
///
/// Output order is deterministic: pairs appear in outer-then-inner index
/// order of the input slice. For reported pairs, `common_categories` is the
/// intersection of the two items' category sets, ordered by item A's list.
pub fn relate(items: &[ContentItem]) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            let similarity = jaccard(&items[i].extracted_text, &items[j].extracted_text);
            if similarity > RELATE_THRESHOLD {
                relationships.push(Relationship {
                    item_a: items[i].id.clone(),
                    item_b: items[j].id.clone(),
                    similarity,
                    common_categories: common_categories(
                        &items[i].categories,
                        &items[j].categories,
                    ),
                });
            }
        }
    }

    relationships
}

fn common_categories(a: &[String], b: &[String]) -> Vec<String> {
    a.iter().filter(|cat| b.contains(cat)).cloned().collect()
}
