/// How the encoder sizes its single up-front allocation.
///
/// Both strategies are upper bounds on the bytes the encoder writes; they
/// differ only in how much slack they leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeEstimate {
    /// Count exactly what each leaf will occupy. The allocation matches the
    /// encoded length byte for byte.
    #[default]
    Exact,
    /// Fixed per-type widths: 4 bytes per boolean, 8 per number, 4 per string
    /// `char`. Leaves unused trailing bytes in the buffer.
    Conservative,
}

/// Configuration options for the encoder.
///
/// # Examples
///
/// ```rust
/// use jsonlazy::{EncodeOptions, Encoder, SizeEstimate};
///
/// let encoder = Encoder::new(EncodeOptions {
///     size_estimate: SizeEstimate::Conservative,
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Strategy used to size the buffer before any byte is written.
    ///
    /// # Default
    ///
    /// [`SizeEstimate::Exact`]
    pub size_estimate: SizeEstimate,

    /// Maximum nesting of objects and arrays below the root, or `None` for
    /// no limit.
    ///
    /// The encoder keeps its own work stack, so depth never threatens the call
    /// stack. Set a limit to reject untrusted input that nests absurdly deep;
    /// values beyond it fail with
    /// [`EncodeError::DepthLimitExceeded`](crate::EncodeError::DepthLimitExceeded).
    ///
    /// # Default
    ///
    /// `None`
    pub max_depth: Option<usize>,
}
