//! Progress reporting for long insertions.
//!
//! With the `progress` feature off the bar is a zero-sized no-op with the same
//! surface, so callers never need `cfg` attributes.

#[cfg(feature = "progress")]
pub use indicatif::{ProgressBar, ProgressStyle};

#[cfg(not(feature = "progress"))]
pub use self::noop::*;

/// Bar counting inserted sequences, hidden when `visible` is false or the
/// input is small enough to finish instantly.
pub fn sequence_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible || len < MIN_SEQUENCES_FOR_BAR {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sequences {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░  "));
    }
    pb
}

const MIN_SEQUENCES_FOR_BAR: usize = 1000;

#[cfg(not(feature = "progress"))]
mod noop {
    /// No-op progress bar when `progress` feature is disabled
    #[derive(Clone)]
    pub struct ProgressBar;

    impl ProgressBar {
        pub fn new(_len: u64) -> Self {
            ProgressBar
        }

        pub fn hidden() -> Self {
            ProgressBar
        }

        pub fn set_style(&self, _style: ProgressStyle) {}
        pub fn set_message(&self, _msg: impl Into<std::borrow::Cow<'static, str>>) {}
        pub fn inc(&self, _delta: u64) {}
        pub fn finish_and_clear(&self) {}
    }

    /// No-op progress style
    pub struct ProgressStyle;

    impl ProgressStyle {
        pub fn default_bar() -> Self {
            ProgressStyle
        }

        pub fn template(self, _template: &str) -> Result<Self, std::convert::Infallible> {
            Ok(self)
        }

        pub fn progress_chars(self, _chars: &str) -> Self {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_inputs_get_hidden_bar() {
        let pb = sequence_bar(3, true);
        pb.inc(3);
        pb.finish_and_clear();

        let pb = sequence_bar(5000, false);
        pb.set_message("done");
        pb.finish_and_clear();
    }
}
