//! Fixed-or-computed values.

use std::fmt;

use crate::context::PlanContext;

/// A field that is either known up front or computed from world state.
///
/// Resolved with a single [`Value::evaluate`] call at the point of use, so
/// callers never need to know which variant they hold.
pub enum Value<T> {
    /// A literal value.
    Fixed(T),
    /// A function of the current planning context.
    Computed(Box<dyn Fn(&PlanContext<'_>) -> T>),
}

impl<T> Value<T> {
    /// Wraps a closure as a computed value.
    pub fn computed(f: impl Fn(&PlanContext<'_>) -> T + 'static) -> Self {
        Self::Computed(Box::new(f))
    }

    /// Returns true if this value does not depend on world state.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

impl<T: Clone> Value<T> {
    /// Resolves the value against the given context.
    pub fn evaluate(&self, ctx: &PlanContext<'_>) -> T {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::Computed(f) => f(ctx),
        }
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Self::Fixed(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubWorld;

    #[test]
    fn fixed_and_computed_resolve_the_same_way() {
        let world = StubWorld::default().with_counter("level", 7);
        let harness = world.harness();
        let ctx = harness.context();

        let fixed: Value<i64> = 3.into();
        let computed = Value::computed(|ctx| ctx.counter("level") * 2);

        assert!(fixed.is_fixed());
        assert!(!computed.is_fixed());
        assert_eq!(fixed.evaluate(&ctx), 3);
        assert_eq!(computed.evaluate(&ctx), 14);
    }
}
