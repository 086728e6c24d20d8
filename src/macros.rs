#![allow(unused_macros)]

/// Helper macro for locking items
///
/// ```rust, ignore
///  let mut lines = lock!(self.lines);
///  lines.push(entry);
/// ```
macro_rules! lock {
    ($lock:expr) => {
        $lock.lock().expect("Failed to acquire lock")
    };
}
