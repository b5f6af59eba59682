//! Line splitting
//!
//! Turns tag trees whose text leaves contain `\n` into a sequence of [`Line`]s
//! for the terminal view. Works in two cooperating passes:
//!
//! 1. Segmentation: every text leaf is split on `\n`, leaving a stream of
//!    content pieces and break markers at the depth the leaf lived at. A tag
//!    whose children contain breaks is cloned once per segment; each clone
//!    keeps the name and the shared attribute map, only the children differ.
//!    Outer tags are split at the same points as their inner tags.
//! 2. Regrouping: the stream is walked left to right, collecting pieces into
//!    the current line until a break closes it. Adjacent text at the same
//!    level is merged while collecting.
//!
//! `k` newlines in the input always give `k + 1` lines. Tags left without
//! children after splitting are dropped, as are empty text segments.

mod echo;

pub use echo::EchoNewline;

use crate::tags::{Fragment, IdGenerator, TagId};

/// Identity of a line, only meaningful for render keying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LineId(pub u64);

/// One terminal row of newline-free content
#[derive(Debug, Clone)]
pub struct Line {
    pub id: LineId,
    pub children: Vec<Fragment>,
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}

impl Eq for Line {}

impl Line {
    pub fn new(id: LineId, children: Vec<Fragment>) -> Self {
        Self { id, children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Concatenated text of the whole row
    pub fn text_content(&self) -> String {
        self.children.iter().map(Fragment::text_content).collect()
    }
}

/// Output of segmentation: content or a line boundary
#[derive(Debug)]
enum Piece {
    Content(Fragment),
    Break,
}

/// Splits fragments into lines, drawing fresh ids from the injected generator
pub struct Splitter<I> {
    ids: I,
}

impl<I: IdGenerator> Splitter<I> {
    pub fn new(ids: I) -> Self {
        Self { ids }
    }

    /// Split a sequence of top-level fragments into lines
    ///
    /// The fragments are treated as one concatenated stream.
    pub fn split(&self, fragments: &[Fragment]) -> Vec<Line> {
        let mut pieces = Vec::new();
        for fragment in fragments {
            self.segment(fragment, &mut pieces);
        }

        regroup(pieces)
            .into_iter()
            .map(|children| Line::new(LineId(self.ids.next_id()), children))
            .collect()
    }

    fn segment(&self, fragment: &Fragment, out: &mut Vec<Piece>) {
        match fragment {
            Fragment::Text(text) => {
                for (i, part) in text.split('\n').enumerate() {
                    if i > 0 {
                        out.push(Piece::Break);
                    }
                    if !part.is_empty() {
                        out.push(Piece::Content(Fragment::Text(part.to_string())));
                    }
                }
            }
            Fragment::Tag(tag) => {
                let mut inner = Vec::new();
                for child in &tag.children {
                    self.segment(child, &mut inner);
                }

                for (i, children) in regroup(inner).into_iter().enumerate() {
                    if i > 0 {
                        out.push(Piece::Break);
                    }
                    if !children.is_empty() {
                        let clone = tag.clone_with_children(TagId(self.ids.next_id()), children);
                        out.push(Piece::Content(Fragment::Tag(clone)));
                    }
                }
            }
        }
    }
}

/// Collect pieces into groups separated by breaks; always at least one group
fn regroup(pieces: Vec<Piece>) -> Vec<Vec<Fragment>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();

    for piece in pieces {
        match piece {
            Piece::Break => groups.push(coalesce(std::mem::take(&mut current))),
            Piece::Content(fragment) => current.push(fragment),
        }
    }

    groups.push(coalesce(current));
    groups
}

fn push_coalesced(children: &mut Vec<Fragment>, fragment: Fragment) {
    match fragment {
        Fragment::Text(text) if text.is_empty() => {}
        Fragment::Text(text) => match children.last_mut() {
            Some(Fragment::Text(last)) => last.push_str(&text),
            _ => children.push(Fragment::Text(text)),
        },
        tag => children.push(tag),
    }
}

/// Merge adjacent text fragments and drop empty ones
///
/// Only the given level is touched; tag children are left as they are.
pub fn coalesce(children: Vec<Fragment>) -> Vec<Fragment> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        push_coalesced(&mut out, child);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{Payload, SequentialIds, Tag};

    fn splitter() -> Splitter<SequentialIds> {
        Splitter::new(SequentialIds::new())
    }

    fn color(fg: &str, children: Vec<Fragment>) -> Fragment {
        Tag::with_attributes("color", [("foreground", fg)], children).into()
    }

    fn line(children: Vec<Fragment>) -> Line {
        Line::new(LineId::default(), children)
    }

    fn count_newlines(fragment: &Fragment) -> usize {
        fragment.text_content().matches('\n').count()
    }

    fn assert_no_newlines(fragment: &Fragment) {
        match fragment {
            Fragment::Text(text) => assert!(!text.contains('\n'), "raw newline in {:?}", text),
            Fragment::Tag(tag) => tag.children.iter().for_each(assert_no_newlines),
        }
    }

    #[test]
    fn test_tag_without_line_breaks() {
        let tag = color("red", vec!["text".into()]);
        let lines = splitter().split(&[tag.clone()]);
        assert_eq!(lines, vec![line(vec![tag])]);
    }

    #[test]
    fn test_one_line_break_preserves_attributes() {
        let tag = color("red", vec!["one\nline".into()]);
        let lines = splitter().split(&[tag.clone()]);

        assert_eq!(
            lines,
            vec![
                line(vec![color("red", vec!["one".into()])]),
                line(vec![color("red", vec!["line".into()])]),
            ]
        );

        let original = tag.as_tag().unwrap();
        for l in &lines {
            let clone = l.children[0].as_tag().unwrap();
            assert_eq!(clone.name, original.name);
            assert!(std::sync::Arc::ptr_eq(&clone.attributes, &original.attributes));
        }
    }

    #[test]
    fn test_many_line_breaks() {
        let tag = color("red", vec!["one line\ntwo line\nthree line".into()]);
        let lines = splitter().split(&[tag]);

        assert_eq!(
            lines,
            vec![
                line(vec![color("red", vec!["one line".into()])]),
                line(vec![color("red", vec!["two line".into()])]),
                line(vec![color("red", vec!["three line".into()])]),
            ]
        );
    }

    #[test]
    fn test_multiple_children_coalesce_across_the_break() {
        let tag = color("red", vec!["one\nline".into(), "two\nline".into()]);
        let lines = splitter().split(&[tag]);

        assert_eq!(
            lines,
            vec![
                line(vec![color("red", vec!["one".into()])]),
                line(vec![color("red", vec!["linetwo".into()])]),
                line(vec![color("red", vec!["line".into()])]),
            ]
        );
    }

    #[test]
    fn test_nested_split() {
        let tag = color(
            "red",
            vec![
                "one\nline".into(),
                color("green", vec!["two\nline".into()]),
            ],
        );
        let lines = splitter().split(&[tag]);

        assert_eq!(
            lines,
            vec![
                line(vec![color("red", vec!["one".into()])]),
                line(vec![color(
                    "red",
                    vec!["line".into(), color("green", vec!["two".into()])]
                )]),
                line(vec![color("red", vec![color("green", vec!["line".into()])])]),
            ]
        );
    }

    #[test]
    fn test_text_after_nested_tag_stays_on_its_line() {
        let tag = color(
            "red",
            vec![
                "new lines \n of text".into(),
                color("green", vec!["separate\ncolor".into()]),
                "back to red".into(),
            ],
        );
        let lines = splitter().split(&[tag]);

        assert_eq!(
            lines,
            vec![
                line(vec![color("red", vec!["new lines ".into()])]),
                line(vec![color(
                    "red",
                    vec![" of text".into(), color("green", vec!["separate".into()])]
                )]),
                line(vec![color(
                    "red",
                    vec![color("green", vec!["color".into()]), "back to red".into()]
                )]),
            ]
        );
    }

    #[test]
    fn test_plain_strings() {
        let lines = splitter().split(&["new lines \n of text".into()]);
        assert_eq!(
            lines,
            vec![line(vec!["new lines ".into()]), line(vec![" of text".into()])]
        );
    }

    #[test]
    fn test_sequence_payload_is_one_stream() {
        let payload = Payload::Many(vec![
            "new lines \n of text".into(),
            Payload::Many(vec![Payload::Many(vec![" extra".into()]), " \ntext".into()]),
        ]);
        let lines = splitter().split(&payload.into_fragments());

        assert_eq!(
            lines,
            vec![
                line(vec!["new lines ".into()]),
                line(vec![" of text extra ".into()]),
                line(vec!["text".into()]),
            ]
        );
    }

    #[test]
    fn test_empty_input_is_one_empty_line() {
        let lines = splitter().split(&[]);
        assert_eq!(lines, vec![line(vec![])]);
    }

    #[test]
    fn test_trailing_newline_gives_empty_last_line() {
        let lines = splitter().split(&["hello\n".into()]);
        assert_eq!(lines, vec![line(vec!["hello".into()]), line(vec![])]);
    }

    #[test]
    fn test_tag_emptied_by_split_is_dropped() {
        let tag = color("red", vec!["\n".into()]);
        let lines = splitter().split(&["a".into(), tag, "b".into()]);
        assert_eq!(lines, vec![line(vec!["a".into()]), line(vec!["b".into()])]);
    }

    #[test]
    fn test_tag_with_no_children_is_dropped() {
        let lines = splitter().split(&["a".into(), Tag::new("empty", vec![]).into()]);
        assert_eq!(lines, vec![line(vec!["a".into()])]);
    }

    #[test]
    fn test_sent_text_echo_splits_into_text_and_empty_line() {
        let lines = splitter().split(&[Tag::sent_text("look").into()]);
        assert_eq!(
            lines,
            vec![
                line(vec![Tag::new("sent-text", vec!["look".into()]).into()]),
                line(vec![]),
            ]
        );
    }

    #[test]
    fn test_newline_count_law() {
        let inputs: Vec<Vec<Fragment>> = vec![
            vec!["no breaks".into()],
            vec!["\n\n\n".into()],
            vec![color("red", vec!["a\nb".into(), color("blue", vec!["\nc\n".into()])])],
            vec![
                "x\n".into(),
                Tag::new("tooltip", vec![Tag::new("deep", vec!["\n\n".into()]).into()]).into(),
                "\ny".into(),
            ],
            vec![Tag::new("empty", vec![]).into(), "".into()],
        ];

        for fragments in inputs {
            let newlines: usize = fragments.iter().map(count_newlines).sum();
            let lines = splitter().split(&fragments);
            assert_eq!(lines.len(), newlines + 1, "input: {:?}", fragments);

            for l in &lines {
                l.children.iter().for_each(assert_no_newlines);
            }
        }
    }

    #[test]
    fn test_split_preserves_text_content() {
        let fragments = vec![
            "a\nb".into(),
            color("red", vec!["c\nd".into(), color("blue", vec!["e\nf".into()])]),
            "g".into(),
        ];
        let expected: String = fragments.iter().map(Fragment::text_content).collect();

        let lines = splitter().split(&fragments);
        let joined = lines
            .iter()
            .map(Line::text_content)
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(joined, expected);
    }

    #[test]
    fn test_line_children_are_coalesced() {
        let lines = splitter().split(&["a".into(), "b".into(), "c\nd".into(), "e".into()]);
        assert_eq!(lines, vec![line(vec!["abc".into()]), line(vec!["de".into()])]);
    }

    #[test]
    fn test_coalesce_is_idempotent() {
        let lines = splitter().split(&[
            "a".into(),
            color("red", vec!["b".into()]),
            "c".into(),
            "d\ne".into(),
            "".into(),
            "f".into(),
        ]);

        for l in lines {
            let once = coalesce(l.children.clone());
            assert_eq!(once, l.children);
            assert_eq!(coalesce(once.clone()), once);
        }
    }

    #[test]
    fn test_coalesce_merges_and_drops_empty_text() {
        let children = vec![
            "a".into(),
            "".into(),
            "b".into(),
            color("red", vec!["x".into()]),
            "".into(),
        ];
        assert_eq!(
            coalesce(children),
            vec!["ab".into(), color("red", vec!["x".into()])]
        );
    }

    #[test]
    fn test_split_assigns_fresh_ids() {
        let lines = splitter().split(&[color("red", vec!["a\nb".into()])]);
        let first = lines[0].children[0].as_tag().unwrap().id;
        let second = lines[1].children[0].as_tag().unwrap().id;

        assert_ne!(lines[0].id, lines[1].id);
        assert_ne!(first, second);
    }

    #[test]
    fn test_deep_nesting_is_accepted() {
        let mut fragment: Fragment = "bottom\nline".into();
        for _ in 0..200 {
            fragment = Tag::new("wrap", vec![fragment]).into();
        }

        let lines = splitter().split(&[fragment]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text_content(), "bottom");
        assert_eq!(lines[1].text_content(), "line");
    }
}
