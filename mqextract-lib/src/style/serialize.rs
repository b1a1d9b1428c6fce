use crate::style::owned_css::{
    AtRule, KeyframeStep, KeyframesBlock, MediaGroup, OwnedDeclaration, OwnedRule, StyleRule,
};

/// Renders buckets back into CSS text. Output always uses `\n`; line endings
/// are converted when the text is written out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer {
    pub hide_comments: bool,
}

impl Serializer {
    pub fn new(hide_comments: bool) -> Self {
        Serializer { hide_comments }
    }

    /// Base bucket: top-level rules, comments and pass-through at-rules.
    pub fn base(&self, rules: &[StyleRule]) -> String {
        let mut css = String::new();
        for rule in rules {
            self.write_rule_or_comment(&mut css, rule);
        }
        css
    }

    pub fn media_group(&self, group: &MediaGroup) -> String {
        let mut css = format!("@media {} {{\n\n", group.condition);
        for rule in &group.rules {
            self.write_rule_or_comment(&mut css, rule);
        }
        css.push_str("}\n\n");
        css
    }

    pub fn keyframes(&self, blocks: &[KeyframesBlock]) -> String {
        let mut css = String::new();
        for block in blocks {
            self.write_keyframes(&mut css, block);
        }
        css
    }

    fn write_keyframes(&self, css: &mut String, block: &KeyframesBlock) {
        css.push_str(&format!(
            "@{}keyframes {} {{\n\n",
            block.vendor_prefix, block.name
        ));
        for step in &block.steps {
            match step {
                StyleRule::KeyframeStep(step) => self.write_step(css, step),
                StyleRule::Comment(text) => self.write_top_comment(css, text),
                // not valid between keyframe steps
                StyleRule::Declaration(_) | StyleRule::Rule(_) | StyleRule::AtRule(_) => {}
            }
        }
        css.push_str("}\n\n");
    }

    fn write_rule_or_comment(&self, css: &mut String, rule: &StyleRule) {
        match rule {
            StyleRule::Rule(rule) => self.write_rule(css, rule),
            StyleRule::Comment(text) => self.write_top_comment(css, text),
            StyleRule::AtRule(at_rule) => write_at_rule(css, at_rule),
            // classification never puts these in a rule list
            StyleRule::Declaration(_) | StyleRule::KeyframeStep(_) => {}
        }
    }

    fn write_rule(&self, css: &mut String, rule: &OwnedRule) {
        css.push_str(&rule.selectors.join(",\n"));
        css.push_str(" {");
        self.write_block(css, &rule.children);
        css.push_str("\n}\n\n");
    }

    fn write_step(&self, css: &mut String, step: &KeyframeStep) {
        css.push_str(&step.values.join(","));
        css.push_str(" {");
        self.write_block(css, &step.children);
        css.push_str("\n}\n\n");
    }

    /// Declarations and comments of a block, one per line, indented.
    fn write_block(&self, css: &mut String, children: &[StyleRule]) {
        for child in children {
            match child {
                StyleRule::Declaration(decl) => {
                    css.push_str("\n\t");
                    write_declaration(css, decl);
                }
                StyleRule::Comment(text) if !self.hide_comments => {
                    css.push_str("\n\t");
                    write_comment(css, text);
                }
                StyleRule::Comment(_) => {}
                StyleRule::Rule(_) | StyleRule::KeyframeStep(_) | StyleRule::AtRule(_) => {}
            }
        }
    }

    fn write_top_comment(&self, css: &mut String, text: &str) {
        if self.hide_comments {
            return;
        }
        write_comment(css, text);
        css.push_str("\n\n");
    }
}

fn write_comment(css: &mut String, text: &str) {
    css.push_str("/*");
    css.push_str(text);
    css.push_str("*/");
}

fn write_declaration(css: &mut String, decl: &OwnedDeclaration) {
    css.push_str(&decl.property);
    css.push_str(": ");
    css.push_str(&decl.value);
    css.push(';');
}

fn write_at_rule(css: &mut String, at_rule: &AtRule) {
    css.push('@');
    css.push_str(&at_rule.name);
    if !at_rule.prelude.is_empty() {
        css.push(' ');
        css.push_str(&at_rule.prelude);
    }
    match &at_rule.block {
        Some(block) => {
            css.push_str(" {");
            css.push_str(block);
            css.push_str("}\n\n");
        }
        None => css.push_str(";\n\n"),
    }
}
