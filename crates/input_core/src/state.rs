use crate::selection::SelectionRange;
use core_types::FileHandle;

/// Per-control state held by [`InputValueStore`](crate::InputValueStore).
#[derive(Clone, Debug, Default)]
pub(crate) struct InputState {
    pub value: String,

    /// Always on UTF-8 boundaries of `value` when set through the store.
    pub selection: Option<SelectionRange>,

    /// Files attached to a file input; replaced wholesale.
    pub files: Vec<FileHandle>,
}
