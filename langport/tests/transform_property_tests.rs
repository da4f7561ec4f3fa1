use langport::pipeline::transform_leaf;
use langport::placeholder::rewrite_placeholders;
use langport::{Group, TransformOptions, TranslationNode, fingerprint, walk};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn identifier_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,12}").expect("valid identifier regex")
}

fn plain_text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?{}\\[\\]]{0,40}").expect("valid text regex")
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn files_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(
        proptest::string::string_regex("[a-z]{1,8}\\.php").expect("valid name regex"),
        proptest::string::string_regex("[ -~]{0,40}").expect("valid content regex"),
        1..6,
    )
}

proptest! {
    #[test]
    fn placeholder_free_text_is_unchanged(text in plain_text_strategy()) {
        prop_assert_eq!(rewrite_placeholders(&text), text.as_str());
    }

    #[test]
    fn lowercase_identifiers_are_plain(id in identifier_strategy()) {
        let source = format!(":{}", id);
        prop_assert_eq!(rewrite_placeholders(&source), format!("{{{{{}}}}}", id));
    }

    #[test]
    fn capitalized_identifiers_use_capitalize(id in "[a-z]{2}[a-z0-9_]{0,10}") {
        let source = format!(":{}", capitalize(&id));
        prop_assert_eq!(
            rewrite_placeholders(&source),
            format!("{{{{{}, capitalize}}}}", id)
        );
    }

    #[test]
    fn uppercase_identifiers_use_uppercase(id in identifier_strategy()) {
        let source = format!(":{}", id.to_uppercase());
        prop_assert_eq!(
            rewrite_placeholders(&source),
            format!("{{{{{}, uppercase}}}}", id)
        );
    }

    #[test]
    fn strings_without_pipe_keep_their_key(key in identifier_strategy(), text in plain_text_strategy()) {
        let pairs = transform_leaf(&key, &text, &TransformOptions::default()).unwrap();
        prop_assert_eq!(pairs, vec![(key.clone(), text.clone())]);
    }

    #[test]
    fn fingerprint_is_independent_of_file_order(files in files_strategy()) {
        let forward: Vec<(&str, &str)> = files.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let mut backward = forward.clone();
        backward.reverse();
        prop_assert_eq!(fingerprint(&forward), fingerprint(&backward));
    }

    #[test]
    fn fingerprint_changes_when_a_byte_changes(files in files_strategy(), pick in any::<prop::sample::Index>()) {
        let mut pairs: Vec<(String, Vec<u8>)> = files
            .into_iter()
            .map(|(k, v)| (k, v.into_bytes()))
            .collect();
        let before = fingerprint(&pairs);

        let target = pick.index(pairs.len());
        pairs[target].1.push(b'x');
        prop_assert_ne!(before, fingerprint(&pairs));
    }

    #[test]
    fn non_plural_groups_keep_key_order(keys in prop::collection::vec(identifier_strategy(), 1..10)) {
        let group: Group = keys
            .iter()
            .map(|k| (k.clone(), TranslationNode::leaf(format!("value of {}", k))))
            .collect();
        let expected: Vec<String> = group.keys().map(str::to_string).collect();

        let outcome = walk(&TranslationNode::Group(group), &TransformOptions::default());
        let actual: Vec<String> = outcome
            .tree
            .as_group()
            .unwrap()
            .keys()
            .map(str::to_string)
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
