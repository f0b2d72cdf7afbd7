//! Detection of pagination that stops making progress

use std::fmt::Display;

/// Error indicating two successive pagination tokens were identical
///
/// Fatal: retrying would reproduce the identical request.
#[derive(Debug, thiserror::Error)]
#[error("Loop detected in pagination. Pagination token {token} is identical to prior token.")]
pub struct PaginationLoopError {
    pub token: String,
}

/// Compare successive pagination tokens
///
/// `next` is None once pagination has terminated, which always passes.
pub fn check<T: PartialEq + Display>(
    previous: Option<&T>,
    next: Option<&T>,
) -> Result<(), PaginationLoopError> {
    match (previous, next) {
        (Some(previous), Some(next)) if previous == next => Err(PaginationLoopError {
            token: next.to_string(),
        }),
        _ => Ok(()),
    }
}
