//! Fixed-or-conditional values.

use serde::{Deserialize, Serialize};

use plan_core::Value;

use super::condition::ConditionSpec;

/// A value written either as a literal or as a two-way conditional.
///
/// ```text
/// fixed(2)
/// when(condition: have_item("key"), then: 1, otherwise: 3)
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSpec<T> {
    Fixed(T),
    When {
        condition: ConditionSpec,
        then: T,
        otherwise: T,
    },
}

impl<T: Clone + 'static> ValueSpec<T> {
    pub fn build(self) -> Value<T> {
        match self {
            Self::Fixed(value) => Value::Fixed(value),
            Self::When {
                condition,
                then,
                otherwise,
            } => Value::computed(move |ctx| {
                if condition.evaluate(ctx) {
                    then.clone()
                } else {
                    otherwise.clone()
                }
            }),
        }
    }
}

impl<T> From<T> for ValueSpec<T> {
    fn from(value: T) -> Self {
        Self::Fixed(value)
    }
}
