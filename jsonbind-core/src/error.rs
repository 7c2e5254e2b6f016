// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::borrow::Cow;

use thiserror::Error;

/// Global flag to check if JSONBIND_PANIC_ON_ERROR environment variable is set
/// at compile time. Set JSONBIND_PANIC_ON_ERROR=1 at compile time to panic at
/// the exact location an error is created, which helps identify the error
/// source with a full stack trace.
pub const PANIC_ON_ERROR: bool = option_env!("JSONBIND_PANIC_ON_ERROR").is_some();

/// Error type for all jsonbind operations.
///
/// Always construct variants through the static constructor functions
/// ([`Error::parse`], [`Error::conversion`], [`Error::invalid_configuration`],
/// [`Error::deserialization`], [`Error::illegal_argument`]) rather than the
/// enum syntax: the constructors accept anything convertible to
/// `Cow<'static, str>` and honor the `JSONBIND_PANIC_ON_ERROR` debug flag.
///
/// The enum is `Clone` so a configuration failure detected at descriptor
/// build time can be cached and replayed on every later use of that type.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Malformed JSON text. Carries the byte offset and 1-based line number
    /// where the parser gave up.
    ///
    /// Do not construct this variant directly; use [`Error::parse`] instead.
    #[error("JSON syntax error at offset {offset} (line {line}): {message}")]
    Parse {
        offset: usize,
        line: usize,
        message: Cow<'static, str>,
    },

    /// A JSON value was viewed as a variant it does not have.
    ///
    /// Do not construct this variant directly; use [`Error::conversion`] instead.
    #[error("{0}")]
    Conversion(Cow<'static, str>),

    /// A type's binding declarations are inconsistent. Detected once, at the
    /// first descriptor build for that type, and cached permanently.
    ///
    /// Do not construct this variant directly; use
    /// [`Error::invalid_configuration`] instead.
    #[error("{0}")]
    InvalidConfiguration(Cow<'static, str>),

    /// Tree data did not match what the target type requires: shape mismatch,
    /// missing key, out-of-bounds index, resolver failure, narrowing failure.
    ///
    /// Do not construct this variant directly; use [`Error::deserialization`]
    /// instead.
    #[error("{0}")]
    Deserialization(Cow<'static, str>),

    /// A caller handed the engine an unusable input, e.g. a resolved type
    /// whose argument count does not match the registered generic arity.
    ///
    /// Do not construct this variant directly; use [`Error::illegal_argument`]
    /// instead.
    #[error("{0}")]
    IllegalArgument(Cow<'static, str>),
}

impl Error {
    /// Creates a new [`Error::Parse`] with position information.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn parse<S: Into<Cow<'static, str>>>(offset: usize, line: usize, message: S) -> Self {
        let err = Error::Parse {
            offset,
            line,
            message: message.into(),
        };
        if PANIC_ON_ERROR {
            panic!("JSONBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Conversion`] from a string or static message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn conversion<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Conversion(s.into());
        if PANIC_ON_ERROR {
            panic!("JSONBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidConfiguration`] from a string or static message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_configuration<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidConfiguration(s.into());
        if PANIC_ON_ERROR {
            panic!("JSONBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Deserialization`] from a string or static message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn deserialization<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Deserialization(s.into());
        if PANIC_ON_ERROR {
            panic!("JSONBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::IllegalArgument`] from a string or static message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn illegal_argument<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::IllegalArgument(s.into());
        if PANIC_ON_ERROR {
            panic!("JSONBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }
}

/// Ensures a condition is true; otherwise returns the given [`enum@Error`].
///
/// ```
/// use jsonbind_core::ensure;
/// use jsonbind_core::error::Error;
///
/// fn check_arity(n: usize) -> Result<(), Error> {
///     ensure!(n < 8, Error::illegal_argument("too many type arguments"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Returns early with the given [`enum@Error`].
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($err)
    };
}
