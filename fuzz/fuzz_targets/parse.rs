#![no_main]
use libfuzzer_sys::fuzz_target;

use jsontree::{from_str, Format, Node};

// Non-finite numbers serialize as quoted strings, so trees containing them
// are excluded from the round-trip check.
fn all_finite(node: &Node) -> bool {
    match node {
        Node::Number(number) => number.is_finite(),
        Node::Array(array) => array.iter().all(all_finite),
        Node::Object(object) => object.values().all(all_finite),
        _ => true,
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(node) = from_str(text) {
        if !all_finite(&node) {
            return;
        }
        // Whatever parses must serialize and parse back to an equal tree.
        let rendered = node.to_text(Format::Minimized);
        assert_eq!(from_str(&rendered).unwrap(), node);

        let pretty = node.to_text(Format::Pretty);
        assert_eq!(from_str(&pretty).unwrap(), node);
    }
});
