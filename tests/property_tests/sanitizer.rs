//! Properties of the HTML sanitizer

use contact_relay::domain::validation_constants::sanitize::MAX_LENGTH;
use contact_relay::domain::{decode_escapes, sanitize};
use proptest::prelude::*;

/// Text biased towards markup and the characters the sanitizer escapes
fn hostile_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-z <>&\"'/=()]{0,400}",
        "(<script>|</script>|&amp;|&quot;|\"|'|/|&|[a-zé ]{1,8}){0,300}",
    ]
}

proptest! {
    #[test]
    fn output_has_no_raw_special_characters(input in hostile_text()) {
        let output = sanitize(&input);

        for forbidden in ['<', '>', '"', '\'', '/'] {
            prop_assert!(!output.contains(forbidden), "{forbidden:?} in {output:?}");
        }
        prop_assert!(output.chars().count() <= MAX_LENGTH);
    }

    #[test]
    fn ampersands_only_start_entities(input in hostile_text()) {
        let output = sanitize(&input);

        for (index, _) in output.match_indices('&') {
            let rest = &output[index..];
            prop_assert!(
                ["&amp;", "&quot;", "&#x27;", "&#x2F;"]
                    .iter()
                    .any(|entity| rest.starts_with(entity)),
                "bare ampersand in {output:?}"
            );
        }
    }

    #[test]
    fn sanitizing_plain_text_twice_is_a_no_op(input in "[^<>&\"'/]{0,1200}") {
        let once = sanitize(&input);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn decoding_undoes_one_layer(input in "[a-zA-Z0-9 <>&\"'/;#]{0,150}") {
        let stripped: String = input.chars().filter(|c| *c != '<' && *c != '>').collect();
        prop_assert_eq!(decode_escapes(&sanitize(&input)), stripped);
    }
}
