//! Fuzz target: `PropertyPath` normalisation
//!
//! Normalising is idempotent, never leaves empty segments, and every
//! ancestor returned by `parent` is a prefix of the path.
//!
//! cargo fuzz run fuzz_property_path

#![no_main]

use libfuzzer_sys::fuzz_target;
use rfctl::PropertyPath;

fuzz_target!(|raw: &str| {
    let path = PropertyPath::new(raw);
    assert_eq!(PropertyPath::new(path.as_str()), path);
    assert!(path.segments().all(|s| !s.is_empty() && !s.contains('/')));

    let mut cur = path.clone();
    while let Some(parent) = cur.parent() {
        assert!(path.starts_with(&parent));
        cur = parent;
    }
    assert_eq!(cur, PropertyPath::root());
});
