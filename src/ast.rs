use std::fmt;

/// Represents a literal value in the language.
///
/// Guarded command programs only know integers and the two boolean constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// An abstract syntax tree (AST) node representing an arithmetic or boolean
/// expression.
///
/// Arithmetic and boolean expressions share one type, the same way the grammar
/// lets comparisons mix them: `x > 0 & y < 2` is a `BinaryOp` whose operands
/// are themselves comparisons over arithmetic terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer or boolean constant.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Array element read (e.g. `A[i + 1]`).
    ArrayIndex {
        /// Name of the array.
        array: String,
        /// The index to access.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A unary operation (negation or logical not).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (arithmetic, comparison or logic).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A parenthesized expression. Carries no semantics of its own; it only
    /// keeps the parentheses so the expression renders as it was written.
    Grouping {
        /// The wrapped expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use gcl::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::ArrayIndex { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Grouping { line, .. } => *line,
        }
    }

    /// Wraps `self` in a logical negation.
    ///
    /// The original expression is left untouched; the result is a fresh
    /// `UnaryOp` node on the same line. Used to label the exit edge of a loop.
    ///
    /// ## Example
    /// ```
    /// use gcl::ast::{Expr, LiteralValue};
    ///
    /// let guard = Expr::Literal { value: LiteralValue::Bool(true),
    ///                             line:  1, };
    ///
    /// assert_eq!(guard.negated().to_string(), "!true");
    /// ```
    #[must_use]
    pub fn negated(&self) -> Self {
        Self::UnaryOp { op:   UnaryOperator::Not,
                        expr: Box::new(self.clone()),
                        line: self.line_number(), }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons, and the two families of
/// logical connectives: the strict `&`/`|` that always evaluate both operands,
/// and the short-circuiting `&&`/`||`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Truncating division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Logical and, both sides evaluated (`&`)
    And,
    /// Logical or, both sides evaluated (`|`)
    Or,
    /// Short-circuiting logical and (`&&`)
    AndCut,
    /// Short-circuiting logical or (`||`)
    OrCut,
    /// Equal to (`=`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
}

impl BinaryOperator {
    /// Returns `true` for `+`, `-`, `*`, `/` and `%`.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod)
    }

    /// Returns `true` for the six comparison operators.
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self,
                 Self::Equal
                 | Self::NotEqual
                 | Self::Greater
                 | Self::GreaterEqual
                 | Self::Less
                 | Self::LessEqual)
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!b`).
    Not,
}

/// A guarded command: the body of an `if ... fi` or `do ... od`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardedCommand {
    /// A single `guard -> command` pair.
    Cond {
        /// The boolean guard.
        guard:   Expr,
        /// The command executed when the guard holds.
        command: Box<Command>,
        /// Line number in the source code.
        line:    usize,
    },
    /// Several alternatives joined by `[]`.
    ///
    /// The parser accepts this form, but nondeterministic choice has no
    /// semantics yet: both the evaluator and the CFG builder reject it.
    Case {
        /// The alternatives, in source order.
        branches: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
}

impl GuardedCommand {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Cond { line, .. } | Self::Case { line, .. } => *line,
        }
    }
}

/// A command (statement) of the guarded command language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `x := a`
    Assign {
        /// The variable being assigned.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `A[i] := a`
    ArrayAssign {
        /// The array being written.
        array: String,
        /// The element index.
        index: Expr,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `read x`
    ReadVar {
        /// The target variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// `read A[i]`
    ReadArray {
        /// The target array.
        array: String,
        /// The element index.
        index: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `write a`
    Write {
        /// The value written.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `skip`
    Skip {
        /// Line number in the source code.
        line: usize,
    },
    /// `c1 ; c2`
    Sequence {
        /// Executed first.
        first:  Box<Self>,
        /// Executed after `first` completes normally.
        second: Box<Self>,
    },
    /// `if gc fi`
    If {
        /// The guarded alternatives.
        body: GuardedCommand,
        /// Line number in the source code.
        line: usize,
    },
    /// `do gc od`
    Do {
        /// The guarded loop body.
        body: GuardedCommand,
        /// Line number in the source code.
        line: usize,
    },
    /// `break`
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// `continue`
    Continue {
        /// Line number in the source code.
        line: usize,
    },
    /// `print a`
    Print {
        /// The value printed.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Command {
    /// Gets the line number from `self`. A sequence reports the line of its
    /// first command.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::Assign { line, .. }
            | Self::ArrayAssign { line, .. }
            | Self::ReadVar { line, .. }
            | Self::ReadArray { line, .. }
            | Self::Write { line, .. }
            | Self::Skip { line }
            | Self::If { line, .. }
            | Self::Do { line, .. }
            | Self::Break { line }
            | Self::Continue { line }
            | Self::Print { line, .. } => *line,
            Self::Sequence { first, .. } => first.line_number(),
        }
    }
}

impl Drop for Command {
    /// Unlinks the right spine of a sequence one link at a time; stack depth
    /// stays constant in the number of statements.
    fn drop(&mut self) {
        let Self::Sequence { second, .. } = self else {
            return;
        };
        let mut next = std::mem::replace(second.as_mut(), Self::Skip { line: 0 });
        while let Self::Sequence { second, .. } = &mut next {
            let tail = std::mem::replace(second.as_mut(), Self::Skip { line: 0 });
            next = tail;
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, AndCut, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul,
            NotEqual, Or, OrCut, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            And => "&",
            Or => "|",
            AndCut => "&&",
            OrCut => "||",
            Equal => "=",
            NotEqual => "!=",
            Greater => ">",
            GreaterEqual => ">=",
            Less => "<",
            LessEqual => "<=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::ArrayIndex { array, index, .. } => write!(f, "{array}[{index}]"),
            // A synthesized operand (e.g. a negated loop guard) has no
            // `Grouping` of its own, so compound operands get parentheses here.
            Self::UnaryOp { op, expr, .. } => match expr.as_ref() {
                Self::BinaryOp { .. } => write!(f, "{op}({expr})"),
                _ => write!(f, "{op}{expr}"),
            },
            Self::BinaryOp { left, op, right, .. } => write!(f, "{left} {op} {right}"),
            Self::Grouping { expr, .. } => write!(f, "({expr})"),
        }
    }
}

impl fmt::Display for GuardedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cond { guard, command, .. } => write!(f, "{guard} -> {command}"),
            Self::Case { branches, .. } => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, " [] ")?;
                    }
                    write!(f, "{branch}")?;
                }
                Ok(())
            },
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign { name, value, .. } => write!(f, "{name} := {value}"),
            Self::ArrayAssign { array,
                                index,
                                value,
                                .. } => write!(f, "{array}[{index}] := {value}"),
            Self::ReadVar { name, .. } => write!(f, "read {name}"),
            Self::ReadArray { array, index, .. } => write!(f, "read {array}[{index}]"),
            Self::Write { value, .. } => write!(f, "write {value}"),
            Self::Skip { .. } => write!(f, "skip"),
            Self::Sequence { first, second } => {
                write!(f, "{first}")?;
                let mut rest = second.as_ref();
                while let Self::Sequence { first, second } = rest {
                    write!(f, "; {first}")?;
                    rest = second.as_ref();
                }
                write!(f, "; {rest}")
            },
            Self::If { body, .. } => write!(f, "if {body} fi"),
            Self::Do { body, .. } => write!(f, "do {body} od"),
            Self::Break { .. } => write!(f, "break"),
            Self::Continue { .. } => write!(f, "continue"),
            Self::Print { value, .. } => write!(f, "print {value}"),
        }
    }
}
