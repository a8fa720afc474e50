//! Derived attributes.
//!
//! A computed field declares the sibling fields it reads and a pure function
//! over their translated values. The translator evaluates computed fields
//! once, after every declared field of the node is populated.

use std::fmt;
use std::sync::Arc;

use im::OrdSet;

use crate::ir::IrValue;

/// Names referenced but not bound within a subtree.
pub const FREE_VARIABLES: &str = "freeVariables";

/// Names a pattern introduces.
pub const BINDING_NAMES: &str = "bindingNames";

pub type ComputeFn = Arc<dyn Fn(&[&IrValue]) -> IrValue + Send + Sync>;

/// A computed field: dependencies plus the function over their values.
#[derive(Clone)]
pub struct Computed {
    dependencies: Vec<String>,
    compute: ComputeFn,
}

impl Computed {
    pub fn new<F>(dependencies: &[&str], compute: F) -> Self
    where
        F: Fn(&[&IrValue]) -> IrValue + Send + Sync + 'static,
    {
        Self {
            dependencies: dependencies.iter().map(|d| (*d).to_owned()).collect(),
            compute: Arc::new(compute),
        }
    }

    /// A constant.
    pub fn always(value: IrValue) -> Self {
        Self::new(&[], move |_| value.clone())
    }

    pub fn empty_set() -> Self {
        Self::always(IrValue::StringSet(OrdSet::new()))
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// `args` holds the dependency values in declaration order.
    pub fn evaluate(&self, args: &[&IrValue]) -> IrValue {
        (self.compute)(args)
    }
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed")
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
enum Term {
    Take { field: usize, attribute: String },
    Name { field: usize },
    Subtract { field: usize, attribute: String },
    Exclude(OrdSet<String>),
}

/// String-set algebra over sibling fields.
///
/// Positive terms are unioned first; negative terms are then removed.
#[derive(Debug, Clone, Default)]
pub struct SetExpr {
    fields: Vec<String>,
    terms: Vec<Term>,
}

impl SetExpr {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, field: &str) -> usize {
        if let Some(i) = self.fields.iter().position(|f| f == field) {
            return i;
        }
        self.fields.push(field.to_owned());
        self.fields.len() - 1
    }

    /// Union in the child's `attribute`. Lists contribute every element;
    /// `null` and nodes without the attribute contribute nothing.
    pub fn take(mut self, field: &str, attribute: &str) -> Self {
        let field = self.slot(field);
        self.terms.push(Term::Take {
            field,
            attribute: attribute.to_owned(),
        });
        self
    }

    /// Union in a string field's value.
    pub fn name(mut self, field: &str) -> Self {
        let field = self.slot(field);
        self.terms.push(Term::Name { field });
        self
    }

    pub fn subtract(mut self, field: &str, attribute: &str) -> Self {
        let field = self.slot(field);
        self.terms.push(Term::Subtract {
            field,
            attribute: attribute.to_owned(),
        });
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms
            .push(Term::Exclude(names.into_iter().map(Into::into).collect()));
        self
    }

    pub fn build(self) -> Computed {
        let dependencies: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        let terms = self.terms;
        Computed::new(&dependencies, move |args| {
            IrValue::StringSet(evaluate(&terms, args))
        })
    }
}

fn evaluate(terms: &[Term], args: &[&IrValue]) -> OrdSet<String> {
    let mut out = OrdSet::new();
    for term in terms {
        match term {
            Term::Take { field, attribute } => collect(args[*field], attribute, &mut out),
            Term::Name { field } => {
                if let Some(name) = args[*field].as_str() {
                    out.insert(name.to_owned());
                }
            }
            Term::Subtract { .. } | Term::Exclude(_) => {}
        }
    }
    for term in terms {
        match term {
            Term::Subtract { field, attribute } => {
                let mut removed = OrdSet::new();
                collect(args[*field], attribute, &mut removed);
                out = out.relative_complement(removed);
            }
            Term::Exclude(names) => out = out.relative_complement(names.clone()),
            Term::Take { .. } | Term::Name { .. } => {}
        }
    }
    out
}

fn collect(value: &IrValue, attribute: &str, out: &mut OrdSet<String>) {
    match value {
        IrValue::List(items) => items.iter().for_each(|item| collect(item, attribute, out)),
        IrValue::Node(node) => {
            if let Some(IrValue::StringSet(set)) = node.get(attribute) {
                out.extend(set.iter().cloned());
            }
        }
        IrValue::StringSet(set) => out.extend(set.iter().cloned()),
        _ => {}
    }
}
