use crate::style::normalize::{group_id, sort_value};
use crate::style::owned_css::{MediaGroup, ProcessedStylesheet, StyleRule, TopLevelRule};
use log::debug;
use std::collections::HashMap;

/// Split the top-level rules of a stylesheet into base rules, merged media
/// groups and keyframes.
pub fn classify(rules: &[TopLevelRule]) -> ProcessedStylesheet {
    let mut classifier = Classifier::default();
    for rule in rules {
        classifier.push(rule);
    }
    classifier.finish()
}

/// Accumulates one file's rules. Groups are looked up by id through `index`
/// while `processed.media_groups` keeps them in discovery order.
#[derive(Default)]
struct Classifier {
    processed: ProcessedStylesheet,
    index: HashMap<String, usize>,
}

impl Classifier {
    fn push(&mut self, rule: &TopLevelRule) {
        match rule {
            TopLevelRule::Media(media) => {
                let slot = self.group_for(&media.condition);
                for inner in &media.rules {
                    match inner {
                        TopLevelRule::Style(
                            style @ (StyleRule::Rule(_) | StyleRule::Comment(_)),
                        ) => {
                            self.processed.media_groups[slot].rules.push(style.clone());
                        }
                        other => debug!(
                            "ignoring {} inside @media {}",
                            describe(other),
                            media.condition
                        ),
                    }
                }
            }
            TopLevelRule::Keyframes(keyframes) => {
                self.processed.keyframes.push(keyframes.clone());
            }
            TopLevelRule::Style(
                style @ (StyleRule::Rule(_) | StyleRule::Comment(_) | StyleRule::AtRule(_)),
            ) => {
                self.processed.base.push(style.clone());
            }
            TopLevelRule::Style(StyleRule::Declaration(_) | StyleRule::KeyframeStep(_)) => {
                debug!("ignoring top-level {}", describe(rule));
            }
        }
    }

    /// Find or create the group a condition belongs to.
    fn group_for(&mut self, condition: &str) -> usize {
        let id = group_id(condition);
        if let Some(&slot) = self.index.get(&id) {
            return slot;
        }

        let slot = self.processed.media_groups.len();
        self.processed.media_groups.push(MediaGroup {
            id: id.clone(),
            condition: condition.to_string(),
            sort_value: sort_value(condition),
            rules: Vec::new(),
        });
        self.index.insert(id, slot);
        slot
    }

    fn finish(self) -> ProcessedStylesheet {
        self.processed
    }
}

fn describe(rule: &TopLevelRule) -> String {
    match rule {
        TopLevelRule::Style(StyleRule::Comment(_)) => "comment".to_string(),
        TopLevelRule::Style(StyleRule::Declaration(decl)) => {
            format!("declaration `{}`", decl.property)
        }
        TopLevelRule::Style(StyleRule::Rule(_)) => "rule".to_string(),
        TopLevelRule::Style(StyleRule::KeyframeStep(_)) => "keyframe step".to_string(),
        TopLevelRule::Style(StyleRule::AtRule(at)) => format!("@{}", at.name),
        TopLevelRule::Media(media) => format!("nested @media {}", media.condition),
        TopLevelRule::Keyframes(keyframes) => format!("@keyframes {}", keyframes.name),
    }
}
