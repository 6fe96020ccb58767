//! Mention comparison contract
//!
//! Mentions (ontology classes, slot fillers, ...) belong to the caller's
//! knowledge model. Alignment only needs to ask whether two mentions agree,
//! which it does through [`MentionComparator`].

use super::comparator::SpanComparator;
use super::span::Span;
use std::collections::HashSet;

/// Compares mentions attached to annotations
///
/// Returns `0` when the mentions agree, otherwise a non-zero ordering.
/// `max_depth` bounds how far nested mention structure is followed.
/// Implementations must terminate on cyclic mention graphs.
pub trait MentionComparator<M>: Send + Sync {
    fn compare(&self, m1: &M, m2: &M, span_comparator: SpanComparator, max_depth: usize) -> i32;
}

/// Treats every pair of mentions as equal; scores spans alone
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreMentions;

impl<M> MentionComparator<M> for IgnoreMentions {
    fn compare(&self, _: &M, _: &M, _: SpanComparator, _: usize) -> i32 {
        0
    }
}

/// Read-only view of a mention graph node
pub trait MentionView: Sized {
    /// Stable node identity, used to detect cycles
    fn identity(&self) -> usize;

    /// Mention name, such as an ontology class identifier
    fn name(&self) -> &str;

    /// Spans the mention itself is anchored to, if any
    fn spans(&self) -> &[Span] {
        &[]
    }

    /// Directly nested mentions, in a stable order
    fn nested(&self) -> Vec<Self> {
        Vec::new()
    }
}

/// A bare class identifier such as `GO:0005622`
impl MentionView for String {
    fn identity(&self) -> usize {
        self.as_ptr() as usize
    }

    fn name(&self) -> &str {
        self
    }
}

/// Structural mention comparison by name, spans and nested mentions
///
/// Node pairs already visited during one comparison are treated as equal,
/// so cyclic graphs terminate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MentionNameComparator;

impl<M: MentionView> MentionComparator<M> for MentionNameComparator {
    fn compare(&self, m1: &M, m2: &M, span_comparator: SpanComparator, max_depth: usize) -> i32 {
        let mut visited = HashSet::new();
        compare_nodes(m1, m2, span_comparator, 1, max_depth, &mut visited)
    }
}

fn compare_nodes<M: MentionView>(
    m1: &M,
    m2: &M,
    span_comparator: SpanComparator,
    depth: usize,
    max_depth: usize,
    visited: &mut HashSet<(usize, usize)>,
) -> i32 {
    if !visited.insert((m1.identity(), m2.identity())) {
        return 0;
    }

    let by_name = ordering_value(m1.name().cmp(m2.name()));
    if by_name != 0 {
        return by_name;
    }

    if !m1.spans().is_empty() || !m2.spans().is_empty() {
        let by_span = span_comparator.compare_lists(m1.spans(), m2.spans());
        if by_span != 0 {
            return by_span;
        }
    }

    if depth >= max_depth {
        return 0;
    }

    let nested1 = m1.nested();
    let nested2 = m2.nested();
    if nested1.len() != nested2.len() {
        return ordering_value(nested1.len().cmp(&nested2.len()));
    }

    nested1
        .iter()
        .zip(&nested2)
        .map(|(a, b)| compare_nodes(a, b, span_comparator, depth + 1, max_depth, visited))
        .find(|&order| order != 0)
        .unwrap_or(0)
}

fn ordering_value(ordering: std::cmp::Ordering) -> i32 {
    ordering as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct Node(Rc<NodeData>);

    struct NodeData {
        name: String,
        spans: Vec<Span>,
        children: RefCell<Vec<Node>>,
    }

    impl Node {
        fn new(name: &str) -> Self {
            Node(Rc::new(NodeData {
                name: name.to_string(),
                spans: Vec::new(),
                children: RefCell::new(Vec::new()),
            }))
        }

        fn with_span(name: &str, start: usize, end: usize) -> Self {
            Node(Rc::new(NodeData {
                name: name.to_string(),
                spans: vec![Span::new(start, end).unwrap()],
                children: RefCell::new(Vec::new()),
            }))
        }

        fn link(&self, child: &Node) {
            self.0.children.borrow_mut().push(child.clone());
        }
    }

    impl MentionView for Node {
        fn identity(&self) -> usize {
            Rc::as_ptr(&self.0) as usize
        }

        fn name(&self) -> &str {
            &self.0.name
        }

        fn spans(&self) -> &[Span] {
            &self.0.spans
        }

        fn nested(&self) -> Vec<Self> {
            self.0.children.borrow().clone()
        }
    }

    #[test]
    fn test_class_identifiers() {
        let cmp = MentionNameComparator;
        let a = "GO:0005622".to_string();
        let b = "GO:0043231".to_string();
        assert_eq!(cmp.compare(&a, &a.clone(), SpanComparator::Strict, 1), 0);
        assert_eq!(cmp.compare(&a, &b, SpanComparator::Strict, 1), -1);
        assert_eq!(cmp.compare(&b, &a, SpanComparator::Strict, 1), 1);
    }

    #[test]
    fn test_ignore_mentions() {
        let a = "x".to_string();
        let b = "y".to_string();
        assert_eq!(IgnoreMentions.compare(&a, &b, SpanComparator::Strict, 1), 0);
    }

    #[test]
    fn test_nested_depth_limit() {
        let a = Node::new("protein");
        let b = Node::new("protein");
        a.link(&Node::new("species:human"));
        b.link(&Node::new("species:mouse"));

        let cmp = MentionNameComparator;
        assert_eq!(cmp.compare(&a, &b, SpanComparator::Strict, 1), 0);
        assert_ne!(cmp.compare(&a, &b, SpanComparator::Strict, 2), 0);
    }

    #[test]
    fn test_slot_spans_use_span_comparator() {
        let a = Node::new("interaction");
        let b = Node::new("interaction");
        a.link(&Node::with_span("agent", 0, 10));
        b.link(&Node::with_span("agent", 4, 10));

        let cmp = MentionNameComparator;
        assert_ne!(cmp.compare(&a, &b, SpanComparator::Strict, 3), 0);
        assert_eq!(cmp.compare(&a, &b, SpanComparator::Sloppy, 3), 0);
    }

    #[test]
    fn test_cycles_terminate() {
        let a = Node::new("complex");
        let a_part = Node::new("part");
        a.link(&a_part);
        a_part.link(&a);

        let b = Node::new("complex");
        let b_part = Node::new("part");
        b.link(&b_part);
        b_part.link(&b);

        let cmp = MentionNameComparator;
        assert_eq!(cmp.compare(&a, &b, SpanComparator::Strict, usize::MAX), 0);

        // Break the reference cycles so the test does not leak
        a.0.children.borrow_mut().clear();
        b.0.children.borrow_mut().clear();
    }
}
