use std::borrow::Cow;

use bstr::BString;
use thiserror::Error;

/// Errors that abort an encode call. No buffer is returned alongside them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The input holds something the six layout tags cannot represent.
    #[error("unsupported type: {what}")]
    UnsupportedType {
        /// What was found, and why it cannot be encoded.
        what: Cow<'static, str>,
    },
    /// The size estimate was smaller than the bytes the encoder needed.
    #[error("size estimate too small: needed {needed} bytes but only {capacity} were allocated")]
    SizeUnderestimate {
        /// Cursor position the failed write would have reached.
        needed: usize,
        /// Bytes allocated up front.
        capacity: usize,
    },
    /// The value nests deeper than [`EncodeOptions::max_depth`](crate::EncodeOptions::max_depth).
    #[error("nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
}

impl EncodeError {
    pub(crate) fn unsupported(what: impl Into<Cow<'static, str>>) -> Self {
        Self::UnsupportedType { what: what.into() }
    }
}

/// Errors reading a single field. Sibling fields stay readable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A string field's bytes are not valid UTF-8.
    #[error("invalid UTF-8 in string at offset {offset}: {bytes:?}")]
    InvalidUtf8 {
        /// Absolute offset of the field.
        offset: usize,
        /// The undecodable bytes.
        bytes: BString,
        /// Where decoding stopped.
        #[source]
        source: core::str::Utf8Error,
    },
    /// The field's range runs past the end of the byte source.
    #[error("field at offset {offset} with length {len} exceeds the {available} available bytes")]
    OutOfBounds {
        /// Absolute offset of the field.
        offset: usize,
        /// Length the descriptor recorded.
        len: usize,
        /// Length of the byte source.
        available: usize,
    },
}
