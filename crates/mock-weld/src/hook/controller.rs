//! Behavior controller
//!
//! The per-method state every generated mock carries, modelled in Rust: a
//! default behavior, a FIFO queue of one-shot behaviors and the invocation
//! history, all behind one lock. The selected behavior runs after the lock
//! is released.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::record::CallRecord;

/// A function standing in for the mocked method
pub type Behavior<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;

struct State<A, R> {
    default: Behavior<A, R>,
    pending: VecDeque<Behavior<A, R>>,
    history: Vec<CallRecord<A, R>>,
}

/// Behavior and history of one mocked method
pub struct BehaviorController<A, R> {
    label: String,
    variadic: bool,
    state: Mutex<State<A, R>>,
}

impl<A, R> BehaviorController<A, R>
where
    A: Clone + Send + 'static,
    R: Clone + Send + 'static,
{
    fn with_default(label: impl Into<String>, default: Behavior<A, R>) -> Self {
        Self {
            label: label.into(),
            variadic: false,
            state: Mutex::new(State {
                default,
                pending: VecDeque::new(),
                history: Vec::new(),
            }),
        }
    }

    /// Returns `R::default()` until told otherwise
    pub fn zeroed(label: impl Into<String>) -> Self
    where
        R: Default,
    {
        Self::with_default(label, Arc::new(|_: A| R::default()))
    }

    /// Panics on invocation until a behavior is set
    pub fn strict(label: impl Into<String>) -> Self {
        let label = label.into();
        let message = format!("unexpected invocation of {}", label);
        Self::with_default(label, Arc::new(move |_: A| -> R { panic!("{}", message) }))
    }

    /// Forwards to `f` until told otherwise
    pub fn delegating<F>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self::with_default(label, Arc::new(f))
    }

    /// Mark the last argument as a variadic tail
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn lock(&self) -> MutexGuard<'_, State<A, R>> {
        // A behavior that panicked never held the lock, so the state is intact.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Behavior used once the queue is empty
    pub fn set_default_behavior<F>(&self, f: F)
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        self.lock().default = Arc::new(f);
    }

    /// Queue a behavior for exactly one invocation
    pub fn push_behavior<F>(&self, f: F)
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        self.lock().pending.push_back(Arc::new(f));
    }

    pub fn set_default_return(&self, value: R)
    where
        R: Sync,
    {
        self.set_default_behavior(move |_| value.clone());
    }

    pub fn push_return(&self, value: R)
    where
        R: Sync,
    {
        self.push_behavior(move |_| value.clone());
    }

    /// Front of the queue, or the default when the queue is empty
    fn next_behavior(&self) -> Behavior<A, R> {
        let mut state = self.lock();
        match state.pending.pop_front() {
            Some(behavior) => behavior,
            None => Arc::clone(&state.default),
        }
    }

    /// Run the next behavior and record the call
    pub fn invoke(&self, args: A) -> R {
        let behavior = self.next_behavior();
        let results = behavior(args.clone());
        self.lock().history.push(CallRecord {
            args,
            results: results.clone(),
            variadic: self.variadic,
        });
        results
    }

    /// Copy of the recorded calls
    pub fn history(&self) -> Vec<CallRecord<A, R>> {
        self.lock().history.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().history.len()
    }
}

impl<A, R> fmt::Debug for BehaviorController<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorController")
            .field("label", &self.label)
            .field("variadic", &self.variadic)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::thread;

    #[test]
    fn test_zeroed_default() {
        let close: BehaviorController<(), (Option<String>,)> = BehaviorController::zeroed("MockClient.Close");
        assert_eq!(close.invoke(()), (None,));
        assert_eq!(close.history()[0].results().unwrap(), vec![serde_json::Value::Null]);

        let get: BehaviorController<String, (bool, String)> = BehaviorController::zeroed("MockClient.Get");
        assert_eq!(get.invoke("k".to_string()), (false, String::new()));
    }

    #[test]
    fn test_behaviors_are_fifo_then_default() {
        let ctrl: BehaviorController<i32, i32> = BehaviorController::delegating("MockCalc.Apply", |x| x);
        ctrl.push_behavior(|x| x + 1);
        ctrl.push_behavior(|x| x + 2);
        ctrl.push_return(100);

        assert_eq!(ctrl.invoke(10), 11);
        assert_eq!(ctrl.invoke(10), 12);
        assert_eq!(ctrl.invoke(10), 100);
        assert_eq!(ctrl.invoke(10), 10);

        ctrl.set_default_return(-1);
        assert_eq!(ctrl.invoke(10), -1);
        assert_eq!(ctrl.call_count(), 5);
    }

    #[test]
    fn test_strict_panics_with_label() {
        let ctrl: BehaviorController<(), ()> = BehaviorController::strict("MockClient.Do");
        let err = catch_unwind(AssertUnwindSafe(|| ctrl.invoke(()))).unwrap_err();
        let message = err
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_default();
        assert_eq!(message, "unexpected invocation of MockClient.Do");

        ctrl.set_default_behavior(|_| ());
        ctrl.invoke(());
        assert_eq!(ctrl.call_count(), 1);
    }

    #[test]
    fn test_history_is_a_copy() {
        let ctrl: BehaviorController<String, bool> = BehaviorController::zeroed("MockClient.Do");
        ctrl.invoke("a".to_string());
        let snapshot = ctrl.history();
        ctrl.invoke("b".to_string());

        assert_eq!(snapshot.len(), 1);
        assert_eq!(ctrl.history().len(), 2);
        assert_eq!(ctrl.history()[1].args, "b");
    }

    #[test]
    fn test_variadic_history_args() {
        let ctrl: BehaviorController<(String, Vec<i32>), (bool, Option<String>)> =
            BehaviorController::zeroed("MockClient.DoArgs").variadic();
        ctrl.invoke(("x".to_string(), vec![1, 2, 3]));

        let history = ctrl.history();
        let args = history[0].args().unwrap();
        assert_eq!(args, vec![json!("x"), json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_concurrent_invocations() {
        let ctrl: BehaviorController<usize, usize> = BehaviorController::delegating("MockCounter.Add", |x| x);
        for i in 0..50 {
            ctrl.push_return(i);
        }

        thread::scope(|s| {
            for t in 0..8 {
                let ctrl = &ctrl;
                s.spawn(move || {
                    for i in 0..100 {
                        ctrl.invoke(t * 100 + i);
                    }
                });
            }
        });

        assert_eq!(ctrl.history().len(), 800);
        assert_eq!(ctrl.call_count(), 800);
        assert_eq!(ctrl.invoke(12345), 12345);
    }
}
