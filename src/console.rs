//! Console function bindings
//!
//! A `ConsoleBindings` value stands for the five console functions of the
//! web view. The bridge never mutates a shared console: it receives the
//! originals, returns decorated copies, and the caller installs those into
//! whatever binding mechanism its environment provides.

use crate::{ConsoleArg, ConsoleMethod};
use std::sync::Arc;

/// A single console function
pub type ConsoleFn = Arc<dyn Fn(&[ConsoleArg]) + Send + Sync>;

/// The five console functions, indexed by `ConsoleMethod`
#[derive(Clone)]
pub struct ConsoleBindings {
    log: ConsoleFn,
    debug: ConsoleFn,
    info: ConsoleFn,
    warn: ConsoleFn,
    error: ConsoleFn,
}

impl ConsoleBindings {
    pub fn new(
        log: ConsoleFn,
        debug: ConsoleFn,
        info: ConsoleFn,
        warn: ConsoleFn,
        error: ConsoleFn,
    ) -> Self {
        Self {
            log,
            debug,
            info,
            warn,
            error,
        }
    }

    /// Build all five functions from a single dispatcher
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(ConsoleMethod, &[ConsoleArg]) + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::from_methods(|method| {
            let f = f.clone();
            Arc::new(move |args: &[ConsoleArg]| f(method, args))
        })
    }

    /// Build each function from its method
    pub fn from_methods(mut make: impl FnMut(ConsoleMethod) -> ConsoleFn) -> Self {
        Self {
            log: make(ConsoleMethod::Log),
            debug: make(ConsoleMethod::Debug),
            info: make(ConsoleMethod::Info),
            warn: make(ConsoleMethod::Warn),
            error: make(ConsoleMethod::Error),
        }
    }

    /// Writes `[LEVEL] message` lines to stderr
    ///
    /// Stands in for developer tools when the bridge runs natively.
    pub fn stderr() -> Self {
        Self::from_fn(|method, args| {
            let line: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
            eprintln!("[{}] {}", method.severity(), line.join(" "));
        })
    }

    pub fn get(&self, method: ConsoleMethod) -> &ConsoleFn {
        match method {
            ConsoleMethod::Log => &self.log,
            ConsoleMethod::Debug => &self.debug,
            ConsoleMethod::Info => &self.info,
            ConsoleMethod::Warn => &self.warn,
            ConsoleMethod::Error => &self.error,
        }
    }

    pub fn call(&self, method: ConsoleMethod, args: &[ConsoleArg]) {
        (self.get(method))(args)
    }

    pub fn log(&self, args: &[ConsoleArg]) {
        (self.log)(args)
    }

    pub fn debug(&self, args: &[ConsoleArg]) {
        (self.debug)(args)
    }

    pub fn info(&self, args: &[ConsoleArg]) {
        (self.info)(args)
    }

    pub fn warn(&self, args: &[ConsoleArg]) {
        (self.warn)(args)
    }

    pub fn error(&self, args: &[ConsoleArg]) {
        (self.error)(args)
    }
}

impl Default for ConsoleBindings {
    fn default() -> Self {
        Self::stderr()
    }
}

impl std::fmt::Debug for ConsoleBindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleBindings").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_from_fn_routes_by_method() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let console = ConsoleBindings::from_fn(move |method, args| {
            sink.lock().unwrap().push((method, args.len()));
        });

        console.warn(&["a".into(), "b".into()]);
        console.call(ConsoleMethod::Log, &[]);
        (console.get(ConsoleMethod::Error))(&["c".into()]);

        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                (ConsoleMethod::Warn, 2),
                (ConsoleMethod::Log, 0),
                (ConsoleMethod::Error, 1),
            ]
        );
    }

    #[test]
    fn test_clone_shares_functions() {
        let console = ConsoleBindings::stderr();
        let copy = console.clone();
        for method in ConsoleMethod::ALL {
            assert!(Arc::ptr_eq(console.get(method), copy.get(method)));
        }
    }
}
