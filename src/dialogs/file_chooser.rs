//! File chooser seam used by the session callbacks.

use std::path::{Path, PathBuf};

/// Picks a file to save to or open; `None` means the user cancelled
pub trait FileChooser {
    /// Ask for a destination, confirming before an existing file is replaced
    fn save_file(&mut self, title: &str, directory: &Path, default_name: &str)
    -> Option<PathBuf>;

    /// Ask for an existing file
    fn open_file(&mut self, title: &str, directory: &Path) -> Option<PathBuf>;
}

/// Native dialogs through rfd
#[derive(Debug, Default)]
pub struct NativeFileChooser;

impl FileChooser for NativeFileChooser {
    fn save_file(
        &mut self,
        title: &str,
        directory: &Path,
        default_name: &str,
    ) -> Option<PathBuf> {
        // The native save dialogs ask before overwriting
        rfd::FileDialog::new()
            .set_title(title)
            .set_directory(directory)
            .set_file_name(default_name)
            .set_can_create_directories(true)
            .save_file()
    }

    fn open_file(&mut self, title: &str, directory: &Path) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(title)
            .set_directory(directory)
            .pick_file()
    }
}
