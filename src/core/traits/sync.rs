//! Shared state for task callbacks.
//!
//! The scheduler puts no lock around callback execution. A resource touched
//! by more than one task (a serial console, an output pin, a counter read by
//! the main loop) is wrapped in a `SharedState` implementor and captured by
//! each callback that needs it. Every access holds the lock for exactly the
//! closure passed in, which keeps critical sections minimal and makes the
//! shared resource visible at each call site.

/// Platform-agnostic synchronized state access.
///
/// Implementations:
/// - `EmbassyState<T>` for embedded targets using Embassy's critical-section Mutex
/// - `StdState<T>` for hosted builds using `std::sync::Mutex`
/// - `MockState<T>` for host tests (critical-section Mutex over a RefCell)
///
/// # Example
///
/// ```ignore
/// struct Console {
///     lines: u32,
/// }
///
/// fn print_line<S: SharedState<Console>>(console: &S, line: &str) {
///     console.with_mut(|c| {
///         c.lines += 1;
///         println!("{}", line);
///     })
/// }
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

// ============================================================================
// Embassy Implementation
// ============================================================================

#[cfg(feature = "embassy")]
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Embassy-based shared state using a critical-section Mutex.
///
/// Interrupts are masked for the duration of each access, so closures passed
/// to `with`/`with_mut` must be short.
#[cfg(feature = "embassy")]
pub struct EmbassyState<T> {
    inner: Mutex<CriticalSectionRawMutex, core::cell::RefCell<T>>,
}

#[cfg(feature = "embassy")]
impl<T> EmbassyState<T> {
    /// Creates a new `EmbassyState`; usable in `static` initializers.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(core::cell::RefCell::new(value)),
        }
    }
}

#[cfg(feature = "embassy")]
impl<T> SharedState<T> for EmbassyState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

// ============================================================================
// std Implementation
// ============================================================================

/// Mutex-backed shared state for hosted builds.
///
/// Clone it into an `Arc` to hand it to several callbacks. A callback that
/// panicked while holding the lock does not poison the state for others.
#[cfg(feature = "std")]
#[derive(Debug, Default)]
pub struct StdState<T> {
    inner: std::sync::Mutex<T>,
}

#[cfg(feature = "std")]
impl<T> StdState<T> {
    /// Creates a new `StdState` wrapping the given value.
    pub const fn new(value: T) -> Self {
        Self {
            inner: std::sync::Mutex::new(value),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, T> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(feature = "std")]
impl<T> SharedState<T> for StdState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.lock())
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.lock())
    }
}

// ============================================================================
// Mock Implementation (tests and the `mock` feature)
// ============================================================================

/// Mock shared state for host tests.
///
/// Backed by a `critical_section::Mutex<RefCell<T>>` using the host
/// critical-section implementation, so an `Arc<MockState<T>>` can be
/// captured by task callbacks like the embedded variants.
///
/// # Panics
///
/// Panics if borrowing rules are violated (e.g., calling `with_mut` while
/// `with` is active). This indicates a bug in the test code.
#[cfg(any(test, feature = "mock"))]
pub struct MockState<T> {
    inner: critical_section::Mutex<core::cell::RefCell<T>>,
}

#[cfg(any(test, feature = "mock"))]
impl<T> MockState<T> {
    /// Creates a new `MockState` wrapping the given value.
    pub const fn new(value: T) -> Self {
        Self {
            inner: critical_section::Mutex::new(core::cell::RefCell::new(value)),
        }
    }
}

#[cfg(any(test, feature = "mock"))]
impl<T> SharedState<T> for MockState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        critical_section::with(|cs| f(&self.inner.borrow_ref(cs)))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Console {
        lines: std::vec::Vec<&'static str>,
    }

    fn emit<S: SharedState<Console>>(console: &S, line: &'static str) -> usize {
        console.with_mut(|c| {
            c.lines.push(line);
            c.lines.len()
        })
    }

    #[test]
    fn mock_state_collects_lines() {
        let console = MockState::new(Console::default());

        assert_eq!(emit(&console, "[LED] Toggled."), 1);
        assert_eq!(emit(&console, "[MATH] Calculation done."), 2);
        assert_eq!(console.with(|c| c.lines[0]), "[LED] Toggled.");
    }

    #[test]
    fn mock_state_nested_reads() {
        let state = MockState::new(7u32);

        let sum = state.with(|outer| state.with(|inner| outer + inner));
        assert_eq!(sum, 14);
    }

    #[test]
    fn mock_state_is_shareable_with_callbacks() {
        fn assert_send_sync<S: Send + Sync>(_: &S) {}

        let console = std::sync::Arc::new(MockState::new(Console::default()));
        assert_send_sync(&console);
    }

    #[cfg(feature = "embassy")]
    #[test]
    fn embassy_state_in_static_initializer() {
        static CONSOLE: EmbassyState<Console> = EmbassyState::new(Console {
            lines: std::vec::Vec::new(),
        });

        assert_eq!(emit(&CONSOLE, "[LED] Toggled."), 1);
        assert_eq!(CONSOLE.with(|c| c.lines[0]), "[LED] Toggled.");
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_state_shared_between_threads() {
        use std::sync::Arc;

        let console = Arc::new(StdState::new(Console::default()));
        let workers: std::vec::Vec<_> = (0..4)
            .map(|_| {
                let console = Arc::clone(&console);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        emit(console.as_ref(), "tick");
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().expect("worker panicked");
        }

        assert_eq!(console.with(|c| c.lines.len()), 100);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_state_survives_poisoning() {
        use std::sync::Arc;

        let counter = Arc::new(StdState::new(0u32));
        let poisoner = Arc::clone(&counter);
        let result = std::thread::spawn(move || {
            poisoner.with_mut(|_| panic!("callback failed"));
        })
        .join();
        assert!(result.is_err());

        counter.with_mut(|n| *n += 1);
        assert_eq!(counter.with(|n| *n), 1);
    }
}
