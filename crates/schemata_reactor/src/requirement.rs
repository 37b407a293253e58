//! Lazily checked, pull-based dependencies.
//!
//! A [`Requirement`] is a value that may not be available yet. Nothing is
//! ever notified: the reactor re-polls every outstanding requirement once per
//! pass, so checks must be cheap and idempotent. Requirements are generic over
//! the environment `E` they are checked against, which keeps lookups free of
//! captured borrows.

use std::fmt;

use schemata_foundation::{Error, Result};

/// A lookup re-evaluated on every check.
pub type Supplier<E, T> = Box<dyn Fn(&E) -> Option<T>>;

/// A lookup that eventually yields another requirement.
pub type DelegateLookup<E, T> = Box<dyn Fn(&E) -> Option<Requirement<E, T>>>;

/// Produces a diagnostic for a requirement that never became satisfied.
pub type Message<E> = Box<dyn Fn(&E) -> String>;

// =============================================================================
// Requirement
// =============================================================================

/// A possibly-not-yet-available value.
///
/// Always check [`is_satisfied`](Self::is_satisfied) before
/// [`get`](Self::get); `get` on an unsatisfied requirement is an
/// [`IllegalState`](schemata_foundation::ErrorKind::IllegalState) error.
pub struct Requirement<E, T> {
    kind: Kind<E, T>,
    unsatisfied: Option<Message<E>>,
    not_found: Option<Message<E>>,
}

enum Kind<E, T> {
    Immediate(T),
    Suppliable(Supplier<E, T>),
    Unsatisfied,
    Delegate(DelegateState<E, T>),
}

/// State of a retriable delegate.
enum DelegateState<E, T> {
    /// Still searching; the lookup is retried on every check.
    Pending(DelegateLookup<E, T>),
    /// The lookup succeeded; every call is forwarded to the inner requirement.
    Resolved(Box<Requirement<E, T>>),
}

impl<E, T> DelegateState<E, T> {
    /// Retries a pending lookup once. Resolved states are returned as-is.
    fn advance(self, env: &E) -> Self {
        match self {
            Self::Pending(lookup) => match lookup(env) {
                Some(inner) => Self::Resolved(Box::new(inner)),
                None => Self::Pending(lookup),
            },
            resolved @ Self::Resolved(_) => resolved,
        }
    }
}

impl<E, T> Requirement<E, T> {
    fn from_kind(kind: Kind<E, T>) -> Self {
        Self {
            kind,
            unsatisfied: None,
            not_found: None,
        }
    }

    /// Always satisfied with `value`.
    #[must_use]
    pub fn immediate(value: T) -> Self {
        Self::from_kind(Kind::Immediate(value))
    }

    /// Satisfied whenever `supplier` currently returns a value.
    #[must_use]
    pub fn suppliable(supplier: impl Fn(&E) -> Option<T> + 'static) -> Self {
        Self::from_kind(Kind::Suppliable(Box::new(supplier)))
    }

    /// Never satisfied.
    #[must_use]
    pub fn unsatisfied() -> Self {
        Self::from_kind(Kind::Unsatisfied)
    }

    /// Retries `lookup` until it yields an inner requirement, then forwards
    /// to it for good.
    #[must_use]
    pub fn retriable(lookup: impl Fn(&E) -> Option<Requirement<E, T>> + 'static) -> Self {
        Self::from_kind(Kind::Delegate(DelegateState::Pending(Box::new(lookup))))
    }

    /// Attaches a diagnostic reported when this requirement stays unsatisfied.
    #[must_use]
    pub fn unsatisfied_message(mut self, message: impl Fn(&E) -> String + 'static) -> Self {
        self.unsatisfied = Some(Box::new(message));
        self
    }

    /// Attaches a diagnostic reported while a search has found nothing.
    ///
    /// Once a delegate has resolved, the inner requirement's diagnostic is
    /// used instead.
    #[must_use]
    pub fn not_found(mut self, message: impl Fn(&E) -> String + 'static) -> Self {
        self.not_found = Some(Box::new(message));
        self
    }

    /// True for a delegate whose lookup has not succeeded yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.kind, Kind::Delegate(DelegateState::Pending(_)))
    }

    /// Checks whether the value is available now.
    ///
    /// A pending delegate retries its lookup and, on success, switches to
    /// forwarding.
    pub fn is_satisfied(&mut self, env: &E) -> bool {
        match &mut self.kind {
            Kind::Immediate(_) => true,
            Kind::Suppliable(supplier) => supplier(env).is_some(),
            Kind::Unsatisfied => false,
            Kind::Delegate(_) => {
                self.advance(env);
                match &mut self.kind {
                    Kind::Delegate(DelegateState::Resolved(inner)) => inner.is_satisfied(env),
                    _ => false,
                }
            }
        }
    }

    fn advance(&mut self, env: &E) {
        let kind = std::mem::replace(&mut self.kind, Kind::Unsatisfied);
        self.kind = match kind {
            Kind::Delegate(state) => Kind::Delegate(state.advance(env)),
            other => other,
        };
    }

    /// Diagnostic for an unsatisfied requirement, if one was attached.
    #[must_use]
    pub fn message(&self, env: &E) -> Option<String> {
        if let Some(message) = &self.unsatisfied {
            return Some(message(env));
        }
        match &self.kind {
            Kind::Delegate(DelegateState::Pending(_)) => self.not_found.as_ref().map(|m| m(env)),
            Kind::Delegate(DelegateState::Resolved(inner)) => inner.message(env),
            _ => self.not_found.as_ref().map(|m| m(env)),
        }
    }
}

impl<E, T: Clone> Requirement<E, T> {
    /// Returns the value.
    ///
    /// # Errors
    /// Returns an illegal state error if the requirement is not satisfied.
    pub fn get(&mut self, env: &E) -> Result<T> {
        match &mut self.kind {
            Kind::Immediate(value) => Ok(value.clone()),
            Kind::Suppliable(supplier) => supplier(env)
                .ok_or_else(|| Error::illegal_state("requirement is not satisfied")),
            Kind::Unsatisfied => Err(Error::illegal_state("requirement is never satisfied")),
            Kind::Delegate(_) => {
                self.advance(env);
                match &mut self.kind {
                    Kind::Delegate(DelegateState::Resolved(inner)) => inner.get(env),
                    _ => Err(Error::illegal_state("requirement target was not found")),
                }
            }
        }
    }
}

impl<E, T: fmt::Debug> fmt::Debug for Requirement<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Immediate(value) => f.debug_tuple("Immediate").field(value).finish(),
            Kind::Suppliable(_) => f.write_str("Suppliable"),
            Kind::Unsatisfied => f.write_str("Unsatisfied"),
            Kind::Delegate(DelegateState::Pending(_)) => f.write_str("Delegate(Pending)"),
            Kind::Delegate(DelegateState::Resolved(inner)) => {
                f.debug_tuple("Delegate").field(inner).finish()
            }
        }
    }
}
