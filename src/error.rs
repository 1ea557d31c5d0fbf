use crate::prefs::PrefsError;
use crate::snake;
use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};
use std::{fmt, result};

#[derive(Debug)]
pub enum ErrorType {
    SnakeBuilderError(snake::BuilderError),
    BodyError(snake::BodyError),
    PrefsError(PrefsError),
    /// Growing the snake failed to allocate
    AllocError(TryReserveError),
}

/// The second member contains a trace in reverse order
#[must_use]
pub struct Error(ErrorType, Vec<String>);

impl From<snake::BuilderError> for Error {
    fn from(e: snake::BuilderError) -> Self {
        Self(ErrorType::SnakeBuilderError(e), vec![])
    }
}

impl From<snake::BodyError> for Error {
    fn from(e: snake::BodyError) -> Self {
        Self(ErrorType::BodyError(e), vec![])
    }
}

impl From<PrefsError> for Error {
    fn from(e: PrefsError) -> Self {
        Self(ErrorType::PrefsError(e), vec![])
    }
}

impl From<TryReserveError> for Error {
    fn from(e: TryReserveError) -> Self {
        Self(ErrorType::AllocError(e), vec![])
    }
}

impl Error {
    pub fn with_trace_step<S: ToString>(mut self, s: S) -> Self {
        self.1.push(s.to_string());
        self
    }

    pub fn error_type(&self) -> &ErrorType {
        &self.0
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error:\n{:?}\nTrace:", self.0)?;
        for t in (self.1).iter().rev() {
            writeln!(f, " in {}", t)?;
        }
        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for Error {}

pub type Result<T = ()> = result::Result<T, Error>;

pub trait ErrorConversion {
    fn with_trace_step<S: ToString>(self, s: S) -> Self;
}

impl<T> ErrorConversion for Result<T> {
    fn with_trace_step<S: ToString>(self, s: S) -> Self {
        self.map_err(|e| e.with_trace_step(s.to_string()))
    }
}

#[test]
fn test_trace_is_printed_innermost_last() {
    let result: Result = Err(PrefsError::ZeroDimension { dim: crate::basic::Cell::new(0, 3) }.into());
    let err = result
        .with_trace_step("inner")
        .with_trace_step("outer")
        .unwrap_err();

    assert!(matches!(err.error_type(), ErrorType::PrefsError(_)));
    let text = format!("{:?}", err);
    let outer = text.find("in outer").unwrap();
    let inner = text.find("in inner").unwrap();
    assert!(outer < inner, "{}", text);
}
