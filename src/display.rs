//! Text rendering of a projection under the sentence's words.

use crate::engine::Projection;
use crate::Span;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Internal representation of an underlined span for display.
struct IncludedSpan {
    span: Span,
    label: String,
}

/// Renders a projection under the words of its sentence.
///
/// ```text
/// all  cats  have  tails
/// ^    v     ^     ^
/// ╰─╯ all
///      ╰──╯ subject
///            ╰─────────╯ object
/// ```
pub struct MarkingDisplay<'a> {
    words: &'a [String],
    projection: &'a Projection,
    include_spans: Vec<IncludedSpan>,
}

impl<'a> MarkingDisplay<'a> {
    /// Display with every detected quantifier and its scopes underlined.
    pub fn new(words: &'a [String], projection: &'a Projection) -> Self {
        let mut display = MarkingDisplay {
            words,
            projection,
            include_spans: Vec::new(),
        };
        display.include_quantifiers();
        display
    }

    /// Display the words and marks row only.
    pub fn marks_only(words: &'a [String], projection: &'a Projection) -> Self {
        MarkingDisplay {
            words,
            projection,
            include_spans: Vec::new(),
        }
    }

    fn include_quantifiers(&mut self) {
        for spec in &self.projection.quantifiers {
            for (span, label) in [
                (spec.quantifier, spec.name.as_str()),
                (spec.subject, "subject"),
                (spec.object, "object"),
            ] {
                if span.is_empty() || span.right > self.words.len() {
                    continue;
                }
                self.include_spans.push(IncludedSpan {
                    span,
                    label: label.to_string(),
                });
            }
        }
    }

    /// Underline an extra span with a label of its own.
    pub fn with_span(mut self, span: Span, label: &str) -> Self {
        if !span.is_empty() && span.right <= self.words.len() {
            self.include_spans.push(IncludedSpan {
                span,
                label: label.to_string(),
            });
        }
        self
    }
}

// 0,    1,     2,     3,    - token indexes
// 0,    5,     11,    17,   - display start columns
// all   cats   have   tails
// ^     v      ^      ^
// ╰─╯ all
//       ╰──╯ subject
impl<'a> std::fmt::Display for MarkingDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut token_idx_to_start_display_char_idx = Vec::new();
        let mut token_idx_to_end_display_char_idx = Vec::new();

        // write opening display text
        let mut opening_line = String::new();
        {
            // for skipping padding at beginning
            let mut is_first = true;
            for word in self.words {
                if is_first {
                    is_first = false;
                } else {
                    opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
                }
                token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
                opening_line.push_str(word);
                token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            }
        }
        f.write_str(&opening_line)?;

        // marks row, one symbol under the first column of each word
        let mut marks_line = String::new();
        let mut column = 0;
        for (start, mark) in token_idx_to_start_display_char_idx
            .iter()
            .zip(self.projection.marks.iter())
        {
            while column < *start {
                marks_line.push(' ');
                column += 1;
            }
            marks_line.push(mark.symbol());
            column += 1;
        }
        write!(f, "\n{}", marks_line)?;

        for included in self.include_spans.iter() {
            f.write_char('\n')?;

            let start_char_idx = token_idx_to_start_display_char_idx[included.span.left];
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let end_char_idx = token_idx_to_end_display_char_idx[included.span.right - 1];
            let char_len = end_char_idx - start_char_idx;
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            write!(f, " {}", included.label)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::{ConstituencyTree, ParseTree};
    use crate::{project, OperatorCatalog, Span};

    fn render(text: &str) -> String {
        let tree = ConstituencyTree::from_bracketed(text).unwrap();
        let catalog = OperatorCatalog::standard().unwrap();
        let projection = project(&tree, &catalog).unwrap();
        projection.display(tree.words()).to_string()
    }

    #[test]
    fn test_display_binary_quantifier() {
        let display = render("(ROOT (S (NP (DT all) (NNS cats)) (VP (VBP have) (NP (NNS tails)))))");
        insta::assert_snapshot!(display, @r###"
        all  cats  have  tails
        ^    v     ^     ^
        ╰─╯ all
             ╰──╯ subject
                   ╰─────────╯ object
        "###);
    }

    #[test]
    fn test_display_unary_quantifier() {
        let display = render(
            "(ROOT (S (NP (DT some) (NNS cats)) (VP (VBP do) (RB not) (VP (VB have) (NP (NNS tails))))))",
        );
        insta::assert_snapshot!(display, @r###"
        some  cats  do  not  have  tails
        ^     ^     ^   ^    v     v
                        ╰─╯ not
                             ╰─────────╯ subject
        "###);
    }

    #[test]
    fn test_display_marks_only() {
        let tree = ConstituencyTree::from_bracketed("(ROOT (NP (JJS angriest) (NN senator)))").unwrap();
        let catalog = OperatorCatalog::standard().unwrap();
        let projection = project(&tree, &catalog).unwrap();
        let display = super::MarkingDisplay::marks_only(tree.words(), &projection)
            .with_span(Span::new(0, 1), "trigger")
            .to_string();
        insta::assert_snapshot!(display, @r###"
        angriest  senator
        ^         *
        ╰──────╯ trigger
        "###);
    }
}
