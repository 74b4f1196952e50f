use indicatif::MultiProgress;
use std::sync::OnceLock;

pub mod components;
pub mod table;
pub mod theme;

pub use theme::{Icon, Theme};

static MULTI_PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

/// Spinners and plain lines share one handle so they never interleave
pub fn multi_progress() -> &'static MultiProgress {
    MULTI_PROGRESS.get_or_init(MultiProgress::new)
}

/// A hidden draw target swallows `println`, so piped output goes straight to stdout
fn emit(msg: &str) {
    let mp = multi_progress();
    if mp.is_hidden() || mp.println(msg).is_err() {
        println!("{}", msg);
    }
}

pub fn warn(message: impl AsRef<str>) {
    emit(&format!("{} {}", Theme::warning("⚠"), message.as_ref()));
}

pub fn error(message: impl AsRef<str>) {
    emit(&format!("{} {}", Theme::error("✖"), message.as_ref()));
}

pub fn println(message: impl AsRef<str>) {
    emit(message.as_ref());
}
