//! Sorting raw rejections into the closed [`FetchError`] union.

use std::any::Any;

use crate::error::{AbortError, BoxError, FetchError, TypeError, UnknownError};

/// Returns `true` only for values that represent a cancelled operation.
///
/// Accepts any value at all. Recognised: [`AbortError`], a
/// [`FetchError::Abort`], and a [`BoxError`] carrying either of those.
pub fn is_abort_error(value: &dyn Any) -> bool {
    if value.is::<AbortError>() {
        return true;
    }
    if let Some(err) = value.downcast_ref::<FetchError>() {
        return err.is_abort();
    }
    if let Some(boxed) = value.downcast_ref::<BoxError>() {
        let err = &**boxed;
        return err.is::<AbortError>()
            || err.downcast_ref::<FetchError>().is_some_and(FetchError::is_abort);
    }
    false
}

/// Classifies a rejection.
///
/// Values that already belong to the union are moved through untouched;
/// anything else is wrapped in an [`UnknownError`] that keeps the original.
pub fn classify(rejection: BoxError) -> FetchError {
    let rejection = match rejection.downcast::<FetchError>() {
        Ok(err) => return *err,
        Err(other) => other,
    };
    let rejection = match rejection.downcast::<TypeError>() {
        Ok(err) => return FetchError::Type(*err),
        Err(other) => other,
    };
    match rejection.downcast::<AbortError>() {
        Ok(err) => FetchError::Abort(*err),
        Err(other) => FetchError::Unknown(UnknownError::new(other)),
    }
}
