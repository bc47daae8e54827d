use crate::{op::Operator, value::Number};
use alloc::vec::Vec;
use core::fmt;

pub mod build;

///
/// Something that reduces to a [`Number`].
///
pub trait Eval {
    fn eval(&self) -> Number;
}

///
/// Index of a node inside its [`Tree`].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

///
/// A finished node: a leaf value, or an operator owning both operands.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    Value(Number),
    Operator {
        op: Operator,
        lhs: NodeId,
        rhs: NodeId,
    },
}

impl Node {
    #[must_use]
    pub const fn children(&self) -> Option<(NodeId, NodeId)> {
        match *self {
            Self::Value(_) => None,
            Self::Operator { lhs, rhs, .. } => Some((lhs, rhs)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slot {
    pub node: Node,
    pub parent: Option<NodeId>,
}

///
/// An immutable expression tree.
///
/// Nodes are stored in an arena and refer to each other by [`NodeId`].
/// Parent links are kept for inspection only; evaluation walks downwards
/// from [`Tree::head`].
///
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    slots: Vec<Slot>,
    head: NodeId,
}

impl Tree {
    pub(crate) fn from_parts(slots: Vec<Slot>, head: NodeId) -> Self {
        debug_assert!(head.0 < slots.len());
        Self { slots, head }
    }

    #[must_use]
    pub const fn head(&self) -> NodeId {
        self.head
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).map(|slot| &slot.node)
    }

    ///
    /// The parent of `id`, or `None` for the head (and for foreign ids).
    ///
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0).and_then(|slot| slot.parent)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (NodeId(i), &slot.node))
    }

    // explicit work stacks keep long chains like `1+1+...+1` off the call stack
    fn eval_at(&self, id: NodeId) -> Number {
        enum Step {
            Visit(NodeId),
            Apply(Operator),
        }

        let mut steps = alloc::vec![Step::Visit(id)];
        let mut values = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(id) => match self.slots[id.0].node {
                    Node::Value(n) => values.push(n),
                    Node::Operator { op, lhs, rhs } => {
                        steps.extend([Step::Apply(op), Step::Visit(rhs), Step::Visit(lhs)]);
                    }
                },
                Step::Apply(op) => {
                    let rhs = values.pop().unwrap_or_default();
                    let lhs = values.pop().unwrap_or_default();
                    values.push(op.apply(lhs, rhs));
                }
            }
        }

        debug_assert_eq!(values.len(), 1);
        values.pop().unwrap_or_default()
    }

    fn fmt_at(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step {
            Visit(NodeId),
            Text(&'static str),
            Symbol(Operator),
        }

        let mut steps = alloc::vec![Step::Visit(id)];

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(id) => match self.slots[id.0].node {
                    Node::Value(n) => write!(f, "{n}")?,
                    Node::Operator { op, lhs, rhs } => steps.extend([
                        Step::Text(")"),
                        Step::Visit(rhs),
                        Step::Symbol(op),
                        Step::Visit(lhs),
                        Step::Text("("),
                    ]),
                },
                Step::Text(text) => f.write_str(text)?,
                Step::Symbol(op) => write!(f, " {op} ")?,
            }
        }

        Ok(())
    }
}

impl Eval for Tree {
    fn eval(&self) -> Number {
        self.eval_at(self.head)
    }
}

//
// Fully parenthesised, e.g. `((10 - 2) - 3)`.
//
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(self.head, f)
    }
}

///
/// Checks that parent and child links agree and that every node hangs off
/// the head exactly once.
///
#[cfg(test)]
pub(crate) fn check_links(tree: &Tree) {
    let mut seen = alloc::vec![0_usize; tree.node_count()];
    let mut stack = alloc::vec![tree.head()];

    assert_eq!(tree.parent(tree.head()), None);

    while let Some(id) = stack.pop() {
        seen[id.index()] += 1;

        if let Some((lhs, rhs)) = tree.node(id).and_then(Node::children) {
            assert_eq!(tree.parent(lhs), Some(id), "lhs of {id:?}");
            assert_eq!(tree.parent(rhs), Some(id), "rhs of {id:?}");
            stack.extend([lhs, rhs]);
        }
    }

    assert!(seen.iter().all(|&n| n == 1), "reachability: {seen:?}");
}
