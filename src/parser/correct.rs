use std::borrow::Cow;

/// Literal fixes for intros known to be malformed upstream, applied in order
/// before tokenizing.
pub const CORRECTIONS: &[(&str, &str)] = &[
    // Full stop where the separator comma after the name belongs.
    ("Dell Latitude 7490 Ultrabook.", "Dell Latitude 7490 Ultrabook,"),
];

pub fn correct(intro: &str) -> Cow<'_, str> {
    apply(intro, CORRECTIONS)
}

fn apply<'a>(intro: &'a str, table: &[(&str, &str)]) -> Cow<'a, str> {
    let mut out = Cow::Borrowed(intro);
    for (find, replace) in table {
        if out.contains(find) {
            out = Cow::Owned(out.replace(find, replace));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixes_known_full_stop() {
        let fixed = correct("Dell Latitude 7490 Ultrabook. Intel Core i5-8350U, 8GB, 256GB SSD");
        assert_eq!(
            fixed,
            "Dell Latitude 7490 Ultrabook, Intel Core i5-8350U, 8GB, 256GB SSD"
        );
    }

    #[test]
    fn untouched_without_match() {
        let intro = "Acer Swift 5 Ultrabook, Intel Core i7-8565U";
        assert!(matches!(correct(intro), Cow::Borrowed(s) if s == intro));
    }

    #[test]
    fn replacements_run_in_order() {
        let table = [("a.", "a,"), ("a,", "b")];
        assert_eq!(apply("xa.", &table), "xb");
    }
}
