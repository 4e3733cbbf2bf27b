//! Call records

use serde::Serialize;
use serde_json::Value;

/// A fixed-arity group of values, one entry per Go parameter or result.
///
/// Implemented for tuples up to eight elements. A one-value group is a
/// one-tuple, so `Option<String>` standing for an `error` result is
/// `(Option<String>,)` and records as a single null.
pub trait Values {
    /// Number of values in the group
    const ARITY: usize;

    fn to_values(&self) -> Result<Vec<Value>, serde_json::Error>;
}

macro_rules! impl_values {
    ($arity:expr; $($name:ident $idx:tt)*) => {
        impl<$($name: Serialize),*> Values for ($($name,)*) {
            const ARITY: usize = $arity;

            fn to_values(&self) -> Result<Vec<Value>, serde_json::Error> {
                Ok(vec![$(serde_json::to_value(&self.$idx)?),*])
            }
        }
    };
}

impl_values!(0;);
impl_values!(1; A0 0);
impl_values!(2; A0 0 A1 1);
impl_values!(3; A0 0 A1 1 A2 2);
impl_values!(4; A0 0 A1 1 A2 2 A3 3);
impl_values!(5; A0 0 A1 1 A2 2 A3 3 A4 4);
impl_values!(6; A0 0 A1 1 A2 2 A3 3 A4 4 A5 5);
impl_values!(7; A0 0 A1 1 A2 2 A3 3 A4 4 A5 5 A6 6);
impl_values!(8; A0 0 A1 1 A2 2 A3 3 A4 4 A5 5 A6 6 A7 7);

/// Arguments and results of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord<A, R> {
    pub args: A,
    pub results: R,
    /// The last argument collects variadic values
    pub variadic: bool,
}

impl<A: Values, R: Values> CallRecord<A, R> {
    /// Arguments as untyped values. A variadic tail is flattened, so one
    /// positional argument plus three variadic values yields four entries.
    pub fn args(&self) -> Result<Vec<Value>, serde_json::Error> {
        let mut values = self.args.to_values()?;
        if self.variadic {
            match values.pop() {
                Some(Value::Array(trailing)) => values.extend(trailing),
                // A nil slice collects nothing.
                Some(Value::Null) | None => {}
                Some(other) => values.push(other),
            }
        }
        Ok(values)
    }

    /// Results as untyped values, one per declared result
    pub fn results(&self) -> Result<Vec<Value>, serde_json::Error> {
        self.results.to_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variadic_args_are_flattened() {
        let record = CallRecord {
            args: ("x", vec![1, 2, 3]),
            results: (true, Option::<String>::None),
            variadic: true,
        };

        let args = record.args().unwrap();
        assert_eq!(args.len(), 4);
        assert_eq!(args, vec![json!("x"), json!(1), json!(2), json!(3)]);
        assert_eq!(record.results().unwrap(), vec![json!(true), Value::Null]);
    }

    #[test]
    fn test_non_variadic_slice_stays_whole() {
        let record = CallRecord {
            args: ("x", vec![1, 2, 3]),
            results: (),
            variadic: false,
        };
        assert_eq!(record.args().unwrap(), vec![json!("x"), json!([1, 2, 3])]);
        assert!(record.results().unwrap().is_empty());
    }

    #[test]
    fn test_single_slice_argument_is_one_value() {
        let record = CallRecord {
            args: (vec![1u8, 2, 3],),
            results: (),
            variadic: false,
        };
        assert_eq!(record.args().unwrap(), vec![json!([1, 2, 3])]);
    }

    #[test]
    fn test_only_variadic_parameter() {
        let record = CallRecord {
            args: (vec![1, 2, 3],),
            results: (),
            variadic: true,
        };
        assert_eq!(record.args().unwrap(), vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_nil_error_result_is_recorded() {
        let record = CallRecord {
            args: (),
            results: (Option::<String>::None,),
            variadic: false,
        };
        assert!(record.args().unwrap().is_empty());
        assert_eq!(record.results().unwrap(), vec![Value::Null]);
    }

    #[test]
    fn test_empty_variadic_tail() {
        let record = CallRecord {
            args: ("x", Vec::<i32>::new()),
            results: (0,),
            variadic: true,
        };
        assert_eq!(record.args().unwrap(), vec![json!("x")]);
        assert_eq!(record.results().unwrap(), vec![json!(0)]);
    }

    #[test]
    fn test_arity() {
        assert_eq!(<() as Values>::ARITY, 0);
        assert_eq!(<(String,) as Values>::ARITY, 1);
        assert_eq!(<(String, Vec<i32>, bool) as Values>::ARITY, 3);
    }
}
