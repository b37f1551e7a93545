use std::collections::HashSet;

use crate::parser::imports::split_names;
use crate::parser::patterns::LanguagePatterns;

/// Extract exported names from the whole of `content`.
///
/// Each pattern's first capture group is comma-split so brace lists such as
/// `export { a, b }` yield one name per entry. Names are deduplicated in
/// first-seen order; patterns without a capture group contribute nothing.
pub fn extract_exports(content: &str, patterns: &LanguagePatterns) -> Vec<String> {
    let mut exports = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for regex in &patterns.exports {
        for caps in regex.captures_iter(content) {
            let Some(list) = caps.get(1) else {
                continue;
            };
            for name in split_names(list.as_str()) {
                if seen.insert(name.clone()) {
                    exports.push(name);
                }
            }
        }
    }

    exports
}
