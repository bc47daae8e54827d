//
// Single-pass, in-place construction of an expression tree.
//
// Operands always extend the open end of the tree. A new operator is spliced
// in above some existing subtree: either the operand just read, or the oldest
// still-open operator that binds at least as tightly, so that tighter
// operators end up deeper and equal ones group to the left.
//

use super::{NodeId, Slot, Tree};
use crate::{ast::Node, error::ParseError, op::Operator, value::Number};
use alloc::vec::Vec;
use log::{debug, trace};

///
/// What the builder wants next.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// The last token was a number.
    Operator,
    /// The last token was `after`, still missing its right operand.
    Value { after: Operator },
}

#[derive(Debug, Clone, Copy)]
enum Draft {
    Value(Number),
    Operator {
        op: Operator,
        lhs: NodeId,
        rhs: Option<NodeId>,
    },
}

#[derive(Debug, Clone, Copy)]
struct DraftSlot {
    draft: Draft,
    parent: Option<NodeId>,
}

///
/// An entry in the operator history.
///
/// `open` holds while the node lies on the path from the head to the
/// newest node, and is cleared for good once the node is swallowed into
/// a newer operator's left operand.
///
#[derive(Debug, Clone, Copy)]
struct Pending {
    id: NodeId,
    op: Operator,
    open: bool,
}

///
/// Grows a [`Tree`] one token at a time.
///
/// ```
/// use equate::ast::{build::Builder, Eval};
///
/// let mut builder = Builder::new("2")?;
/// for token in ["+", "3", "*", "4"] {
///     builder.push(token)?;
/// }
///
/// assert_eq!(builder.build()?.eval().get(), 14.0);
/// # Ok::<(), equate::error::ParseError>(())
/// ```
///
#[derive(Debug, Clone)]
pub struct Builder {
    slots: Vec<DraftSlot>,
    history: Vec<Pending>,
    head: NodeId,
    prev: NodeId,
    expect: Expect,
}

impl Builder {
    ///
    /// Start a tree from its first token, which must be a number.
    ///
    /// # Errors
    ///
    /// [`ParseError::NumberFormat`] if `first` is not a decimal literal.
    ///
    pub fn new(first: &str) -> Result<Self, ParseError> {
        let n = Number::parse_literal(first)
            .ok_or_else(|| ParseError::number_format(first))?;
        trace!("start with {n}");

        Ok(Self {
            slots: alloc::vec![DraftSlot {
                draft: Draft::Value(n),
                parent: None,
            }],
            history: Vec::new(),
            head: NodeId(0),
            prev: NodeId(0),
            expect: Expect::Operator,
        })
    }

    #[must_use]
    pub const fn expects(&self) -> Expect {
        self.expect
    }

    ///
    /// Feed the next token.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidOperator`] or [`ParseError::NumberFormat`],
    /// depending on which kind of token was expected.
    ///
    pub fn push(&mut self, token: &str) -> Result<&mut Self, ParseError> {
        match self.expect {
            Expect::Operator => {
                let op = Operator::lookup(token)
                    .ok_or_else(|| ParseError::invalid_operator(token))?;
                self.operator(op);
                self.expect = Expect::Value { after: op };
            }
            Expect::Value { .. } => {
                let n = Number::parse_literal(token)
                    .ok_or_else(|| ParseError::number_format(token))?;
                self.value(n);
                self.expect = Expect::Operator;
            }
        }

        Ok(self)
    }

    ///
    /// Freeze the tree.
    ///
    /// # Errors
    ///
    /// [`ParseError::IncompleteExpression`] if the last token was an
    /// operator.
    ///
    pub fn build(self) -> Result<Tree, ParseError> {
        if let Expect::Value { after } = self.expect {
            return Err(ParseError::IncompleteExpression { operator: after });
        }

        let slots = self
            .slots
            .into_iter()
            .map(|slot| {
                let node = match slot.draft {
                    Draft::Value(n) => Node::Value(n),
                    Draft::Operator {
                        op,
                        lhs,
                        rhs: Some(rhs),
                    } => Node::Operator { op, lhs, rhs },
                    Draft::Operator { op, rhs: None, .. } => {
                        return Err(ParseError::IncompleteExpression {
                            operator: op,
                        })
                    }
                };

                Ok(Slot {
                    node,
                    parent: slot.parent,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tree = Tree::from_parts(slots, self.head);
        debug!("built {tree}");

        Ok(tree)
    }

    fn value(&mut self, n: Number) {
        let id = self.alloc(Draft::Value(n), Some(self.prev));
        self.set_rhs(self.prev, id);
        trace!("{n} becomes the right operand of {:?}", self.prev);

        self.prev = id;
    }

    fn operator(&mut self, op: Operator) {
        // the first open entry is the shallowest one on the right spine
        let displaced = self
            .history
            .iter()
            .position(|p| p.open && p.op.precedence() >= op.precedence());

        let target = match displaced {
            Some(at) => {
                for p in &mut self.history[at..] {
                    p.open = false;
                }
                trace!("{op} displaces {}", self.history[at].op);
                self.history[at].id
            }
            // also covers the very first operator, where prev is the head
            None => {
                trace!("{op} takes the operand {:?}", self.prev);
                self.prev
            }
        };

        let id = self.splice_above(target, op);
        self.history.push(Pending { id, op, open: true });
        self.prev = id;
    }

    ///
    /// Put a new `op` node where `target` is, with `target` as its left operand.
    ///
    fn splice_above(&mut self, target: NodeId, op: Operator) -> NodeId {
        let parent = self.slots[target.0].parent;
        let id = self.alloc(
            Draft::Operator {
                op,
                lhs: target,
                rhs: None,
            },
            parent,
        );
        self.slots[target.0].parent = Some(id);

        match parent {
            Some(parent) => self.set_rhs(parent, id),
            None => self.head = id,
        }

        id
    }

    fn alloc(&mut self, draft: Draft, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(DraftSlot { draft, parent });
        id
    }

    // splices only ever happen along the right spine
    fn set_rhs(&mut self, parent: NodeId, child: NodeId) {
        if let Draft::Operator { rhs, .. } = &mut self.slots[parent.0].draft {
            *rhs = Some(child);
        } else {
            debug_assert!(false, "{parent:?} is not an operator");
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Builder, Draft, Expect};
    use crate::{
        ast::{check_links, Eval},
        error::ParseError,
        lex::Lexer,
        op::Operator,
    };
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    ///
    /// Checks the draft links after every token: one parentless node,
    /// and every set child pointing back at its parent.
    ///
    fn check_drafts(builder: &Builder) {
        let roots = builder
            .slots
            .iter()
            .filter(|slot| slot.parent.is_none())
            .count();
        assert_eq!(roots, 1);
        assert_eq!(builder.slots[builder.head.0].parent, None);

        let mut missing_rhs = 0;
        for (i, slot) in builder.slots.iter().enumerate() {
            if let Draft::Operator { lhs, rhs, .. } = slot.draft {
                assert_eq!(builder.slots[lhs.0].parent.map(|p| p.0), Some(i));
                match rhs {
                    Some(rhs) => {
                        assert_eq!(builder.slots[rhs.0].parent.map(|p| p.0), Some(i));
                    }
                    None => {
                        assert_eq!(i, builder.prev.0);
                        missing_rhs += 1;
                    }
                }
            }
        }
        assert!(missing_rhs <= 1);
    }

    fn build(src: &str) -> Result<super::Tree, ParseError> {
        init_logger();

        let mut tokens = Lexer::new(src);
        let mut builder = Builder::new(tokens.next().unwrap_or_default())?;
        check_drafts(&builder);

        for token in tokens {
            builder.push(token)?;
            check_drafts(&builder);
        }

        builder.build()
    }

    ///
    /// Declares a test case with a name, input, expected shape and value.
    ///
    macro_rules! test_case {
        ($name:ident, $input:expr, $shape:expr, $value:expr $(,)?) => {
            #[test]
            fn $name() {
                let tree = build($input).expect("valid expression");

                check_links(&tree);
                assert_eq!(tree.to_string(), $shape);
                assert_eq!(tree.eval().get(), $value);
            }
        };
    }

    test_case!(single_value, "42", "42", 42.0);
    test_case!(one_operator, "1+2", "(1 + 2)", 3.0);
    test_case!(mul_binds_tighter, "2+3*4", "(2 + (3 * 4))", 14.0);
    test_case!(mul_first, "2*3+4", "((2 * 3) + 4)", 10.0);
    test_case!(sub_left_assoc, "10-2-3", "((10 - 2) - 3)", 5.0);
    test_case!(div_left_assoc, "8/2/2", "((8 / 2) / 2)", 2.0);
    test_case!(add_sub_chain, "1-2+3-4", "(((1 - 2) + 3) - 4)", -2.0);
    test_case!(mul_div_chain, "2*6/3*5", "(((2 * 6) / 3) * 5)", 20.0);
    test_case!(
        mixed,
        "1+2*3-4/2",
        "((1 + (2 * 3)) - (4 / 2))",
        5.0,
    );
    test_case!(
        two_products,
        "2*3+4*5-1",
        "(((2 * 3) + (4 * 5)) - 1)",
        25.0,
    );
    test_case!(
        sub_then_sum,
        "1-2*3+4",
        "((1 - (2 * 3)) + 4)",
        -1.0,
    );
    test_case!(
        long_product_run,
        "1+2*3*4/2-5",
        "((1 + (((2 * 3) * 4) / 2)) - 5)",
        8.0,
    );
    test_case!(
        alternating,
        "1*2+3*4+5*6",
        "(((1 * 2) + (3 * 4)) + (5 * 6))",
        44.0,
    );
    test_case!(decimals, " 1.5 * .5 + 3. ", "((1.5 * 0.5) + 3)", 3.75);

    #[test]
    fn state_machine() {
        init_logger();

        let mut builder = Builder::new("1").expect("number");
        assert_eq!(builder.expects(), Expect::Operator);

        builder.push("-").expect("operator");
        assert_eq!(
            builder.expects(),
            Expect::Value {
                after: Operator::Sub
            },
        );

        builder.push("2").expect("number");
        assert_eq!(builder.expects(), Expect::Operator);
    }

    #[test]
    fn first_token_not_a_number() {
        assert_eq!(
            build("abc"),
            Err(ParseError::NumberFormat {
                token: "abc".into()
            }),
        );
        assert_eq!(
            build("+ 1"),
            Err(ParseError::NumberFormat { token: "+".into() }),
        );
    }

    #[test]
    fn bad_operand() {
        assert_eq!(
            build("1 + 2.3.4"),
            Err(ParseError::NumberFormat {
                token: "2.3.4".into()
            }),
        );
        assert_eq!(
            build("1 + ."),
            Err(ParseError::NumberFormat { token: ".".into() }),
        );
        // letters are not literal characters, so they glue onto the operator
        assert_eq!(
            build("1 + x"),
            Err(ParseError::InvalidOperator {
                token: "+ x".into()
            }),
        );
    }

    #[test]
    fn bad_operator() {
        assert_eq!(
            build("1 ^ 2"),
            Err(ParseError::InvalidOperator { token: "^".into() }),
        );
        assert_eq!(
            build("1 +- 2"),
            Err(ParseError::InvalidOperator {
                token: "+-".into()
            }),
        );
        assert_eq!(
            build("1 2"),
            Err(ParseError::InvalidOperator { token: "2".into() }),
        );
    }

    #[test]
    fn trailing_operator() {
        assert_eq!(
            build("1+"),
            Err(ParseError::IncompleteExpression {
                operator: Operator::Add
            }),
        );
        assert_eq!(
            build("1+2*"),
            Err(ParseError::IncompleteExpression {
                operator: Operator::Mul
            }),
        );
    }
}
