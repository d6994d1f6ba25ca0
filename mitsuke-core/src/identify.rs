use crate::format::{FormatResult, FormatTag};
use crate::view::ByteView;
use crate::{container, magic, object_store};

/// Runs every detector over `view` and returns the single best answer.
///
/// Git object-store magics never collide with the leading-byte table, so they
/// are tried first. A ZIP envelope from the classifier is handed to the
/// container detector to look for Office documents.
pub fn identify(view: ByteView<'_>) -> FormatResult {
    let git = object_store::detect(view);
    if !git.is_none() {
        return git;
    }

    let classified = magic::classify(view);
    if classified.tag == FormatTag::Zip {
        return container::detect(view);
    }
    classified
}
