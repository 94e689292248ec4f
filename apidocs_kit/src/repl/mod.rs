pub mod completer;

pub use completer::{CompletionIndex, NavCompleter};
