//! Property-based tests for template rendering using proptest.

use proptest::prelude::*;
use richstring::{markup, Config, ErrorPolicy, Reflect, RichStringError, Template};

#[derive(Debug, Clone, Reflect)]
struct Bag {
    name: String,
    words: Vec<String>,
}

fn bag_strategy() -> impl Strategy<Value = Bag> {
    (
        "[a-zA-Z0-9 ]{0,20}",
        prop::collection::vec("[a-z]{1,8}", 0..10),
    )
        .prop_map(|(name, words)| Bag { name, words })
}

fn style_keys() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(vec!["b", "i", "u", "s"]), 1..5)
}

fn apply(key: &str, text: &str) -> String {
    match key {
        "b" => markup::bold(text),
        "i" => markup::italic(text),
        "u" => markup::underline(text),
        _ => markup::strikethrough(text),
    }
}

proptest! {
    /// Text without any span delimiter passes through untouched.
    #[test]
    fn plain_text_is_unchanged(text in "[^{}\\[\\]]{0,80}", bag in bag_strategy()) {
        let config = Config::markup();
        let template = Template::bound(text.as_str(), &bag, &config).unwrap();
        prop_assert_eq!(template.render(false).unwrap(), text);
    }

    /// A single reference renders the member's text exactly.
    #[test]
    fn reference_renders_member_text(bag in bag_strategy()) {
        let config = Config::markup();
        let template = Template::bound("<{name}>", &bag, &config).unwrap();
        prop_assert_eq!(template.render(false).unwrap(), format!("<{}>", bag.name));
    }

    /// Indexing succeeds exactly when the index is in range.
    #[test]
    fn index_within_bounds(bag in bag_strategy(), index in 0usize..15) {
        let config = Config::markup();
        let raw = format!("{{words->{}}}", index);
        let template = Template::bound(raw.as_str(), &bag, &config).unwrap();

        match bag.words.get(index) {
            Some(word) => prop_assert_eq!(&template.render(false).unwrap(), word),
            None => prop_assert_eq!(
                template.render(false).unwrap_err(),
                RichStringError::IndexOutOfRange {
                    member: "words".to_string(),
                    index,
                    len: bag.words.len(),
                }
            ),
        }
    }

    /// Keys apply left to right, each wrapping the previous output.
    #[test]
    fn keys_compose_in_order(base in "[a-z]{1,10}", keys in style_keys()) {
        let bag = Bag { name: String::new(), words: Vec::new() };
        let config = Config::markup();
        let raw = format!("[{}:{}]", base, keys.join(":"));
        let template = Template::bound(raw.as_str(), &bag, &config).unwrap();

        let expected = keys.iter().fold(base.clone(), |text, key| apply(key, &text));
        prop_assert_eq!(template.render(false).unwrap(), expected);
    }

    /// Rendering never alters the template and always gives the same text.
    #[test]
    fn lenient_rendering_is_idempotent(
        raw in "[a-z{}\\[\\]:.>-]{0,40}",
        bag in bag_strategy(),
    ) {
        let config = Config::builder().policy(ErrorPolicy::Lenient).build().unwrap();
        let template = Template::bound(raw.as_str(), &bag, &config).unwrap();

        let first = template.render(false).unwrap();
        let second = template.render(false).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(template.raw_text(), raw.as_str());
    }
}
