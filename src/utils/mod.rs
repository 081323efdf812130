pub mod url_utils;

pub use url_utils::{authority, defragment, fingerprint, normalize};
