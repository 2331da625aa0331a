use super::entries::ListKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("experiment name is locked while updating an existing experiment")]
    NameLocked,
    #[error("{list} has no entry at index {index} (len {len})")]
    IndexOutOfRange {
        list: ListKind,
        index: usize,
        len: usize,
    },
}
