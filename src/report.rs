//! Presentation of mining results, as plain text or JSON.

use std::{
    fmt::Display,
    io::{self, Write},
};

use serde::Serialize;

use crate::{corpus::Corpus, itemsets::Mining, rules::Rule, types::ItemId};

#[derive(Debug, Serialize)]
pub struct Report {
    pub baskets: usize,
    pub levels: Vec<LevelSummary>,
    pub last_level: usize,
    pub truncated: bool,
    pub itemsets: Vec<ItemsetEntry>,
    pub rules: Vec<RuleEntry>,
}

#[derive(Debug, Serialize)]
pub struct LevelSummary {
    pub size: usize,
    pub frequent: usize,
}

#[derive(Debug, Serialize)]
pub struct ItemsetEntry {
    pub items: Vec<String>,
    pub support: u32,
}

#[derive(Debug, Serialize)]
pub struct RuleEntry {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub support: u32,
    pub confidence: f64,
    pub lift: f64,
}

impl Report {
    /// Itemsets are listed by size, then in item order. Rules keep the order
    /// they were mined in.
    pub fn new<T: Display>(corpus: &Corpus<T>, mining: &Mining, rules: &[Rule]) -> Self {
        let names = |itemset: &[ItemId]| -> Vec<String> {
            corpus
                .resolve(itemset)
                .into_iter()
                .map(ToString::to_string)
                .collect()
        };

        let mut frequent: Vec<_> = mining.all_frequent.iter().collect();
        frequent.sort_unstable_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        Self {
            baskets: corpus.len(),
            levels: mining
                .level_counts
                .iter()
                .enumerate()
                .map(|(level, &count)| LevelSummary {
                    size: level + 1,
                    frequent: count,
                })
                .collect(),
            last_level: mining.last_level,
            truncated: mining.truncated,
            itemsets: frequent
                .into_iter()
                .map(|(itemset, &support)| ItemsetEntry {
                    items: names(itemset),
                    support,
                })
                .collect(),
            rules: rules
                .iter()
                .map(|rule| RuleEntry {
                    antecedent: names(&rule.antecedent),
                    consequent: names(&rule.consequent),
                    support: rule.support,
                    confidence: rule.confidence,
                    lift: rule.lift,
                })
                .collect(),
        }
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for level in &self.levels {
            writeln!(
                out,
                "Frequent # of length-{size} itemsets (L{size}): {}",
                level.frequent,
                size = level.size
            )?;
        }
        if self.truncated {
            writeln!(
                out,
                "Time budget exhausted after level {}; results are partial.",
                self.last_level
            )?;
        }

        writeln!(out, "Total # of frequent itemsets: {}", self.itemsets.len())?;
        for entry in &self.itemsets {
            writeln!(out, "  {{{}}}: {}", entry.items.join(", "), entry.support)?;
        }

        writeln!(out, "Total # of association rules: {}", self.rules.len())?;
        for rule in &self.rules {
            writeln!(
                out,
                "  {{{}}} -> {{{}}} (support {}, confidence {:.3}, lift {:.3})",
                rule.antecedent.join(", "),
                rule.consequent.join(", "),
                rule.support,
                rule.confidence,
                rule.lift
            )?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mine, MiningConfig};
    use std::time::Duration;

    fn report() -> Report {
        let corpus = Corpus::from_baskets(vec![vec!["a", "b"], vec!["a", "b", "c"], vec!["a"]]);
        let (mining, rules) = mine(&corpus, &MiningConfig::new(1, 0.5)).unwrap();
        Report::new(&corpus, &mining, &rules)
    }

    #[test]
    fn itemsets_are_sorted_by_size_then_items() {
        let report = report();
        let items: Vec<Vec<String>> = report.itemsets.iter().map(|e| e.items.clone()).collect();
        assert_eq!(items, vec![vec!["a"], vec!["b"], vec!["a", "b"]]);
        assert_eq!(report.baskets, 3);
    }

    #[test]
    fn text_output() {
        let mut out = Vec::new();
        report().write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Frequent # of length-1 itemsets (L1): 2"));
        assert!(text.contains("Frequent # of length-2 itemsets (L2): 1"));
        assert!(text.contains("  {a, b}: 2"));
        assert!(text.contains("Total # of association rules: 2"));
        assert!(text.contains("{a} -> {b} (support 2, confidence 0.667"));
        assert!(!text.contains("partial"));
    }

    #[test]
    fn truncated_run_reports_its_last_level() {
        let corpus = Corpus::from_baskets(vec![vec!["a", "b"], vec!["a", "b", "c"], vec!["a"]]);
        let config = MiningConfig::new(1, 0.5).with_time_budget(Duration::ZERO);
        let (mining, rules) = mine(&corpus, &config).unwrap();
        let report = Report::new(&corpus, &mining, &rules);

        assert!(report.truncated);
        assert_eq!(report.last_level, 1);
        assert_eq!(report.levels.len(), 1);
        assert!(report.rules.is_empty());

        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Time budget exhausted after level 1; results are partial."));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["truncated"], true);
        assert_eq!(json["last_level"], 1);
    }

    #[test]
    fn json_output() {
        let json: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();

        assert_eq!(json["baskets"], 3);
        assert_eq!(json["levels"][0]["frequent"], 2);
        assert_eq!(json["itemsets"][2]["items"], serde_json::json!(["a", "b"]));
        assert_eq!(json["rules"].as_array().unwrap().len(), 2);
    }
}
