//! Stamped values, and the atomic cells that hold them.
//!
//! See [`Register`] and [`AtomicRegister`].
mod atomic;
pub use self::atomic::AtomicRegister;

/// An immutable pair of a value and a sequence number.
///
/// A `Register` is never modified once created. Publishing a new value to a
/// shared location means creating a fresh `Register` and swapping it, whole,
/// into an [`AtomicRegister`].
///
/// The sequence number is 64 bits wide, so the pair does not fit in a single
/// atomic word. Cells therefore hold a pointer to a `Register`, and the pointer
/// swap is what makes a new value visible.
///
/// # Examples
///
/// ```
/// use snapcount::Register;
///
/// let register = Register::new(-7, 3);
/// assert_eq!(register.value(), -7);
/// assert_eq!(register.seq(), 3);
///
/// assert_eq!(Register::default(), Register::new(0, 0));
/// ```
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Register {
    value: i32,
    seq: u64,
}

impl Register {
    /// Creates a register containing the given value and sequence number.
    pub const fn new(value: i32, seq: u64) -> Self {
        Self { value, seq }
    }

    /// Returns the value of the register.
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Returns the sequence number (timestamp) of the register.
    pub const fn seq(&self) -> u64 {
        self.seq
    }
}
