use thiserror::Error;

use crate::selection::SelectionError;
use crate::session::SessionError;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
