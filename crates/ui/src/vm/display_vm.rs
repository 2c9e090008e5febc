/// Decodes HTML entities in text coming from the question source.
///
/// Render-only: stored question and answer text is never replaced with the
/// decoded form, and comparisons always use the raw text.
#[must_use]
pub fn decode_entities(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// CSS classes for one answer button.
///
/// - `selected` marks the pick while the round is open;
/// - once checked, the pick becomes `checked-answers` and the correct answer,
///   when it was not picked, is marked `correct-answer`.
#[must_use]
pub fn answer_class(is_checked: bool, is_selected: bool, is_correct: bool) -> String {
    let mut classes = vec!["answers-button"];
    if !is_checked && is_selected {
        classes.push("selected");
    }
    if is_checked && is_correct && !is_selected {
        classes.push("correct-answer");
    }
    if is_checked && is_selected {
        classes.push("checked-answers");
    }
    classes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(
            decode_entities("&quot;Hello&quot; &amp; it&#039;s &eacute;t&eacute;"),
            "\"Hello\" & it's été"
        );
        assert_eq!(decode_entities("plain"), "plain");
    }

    #[test]
    fn open_round_marks_only_the_pick() {
        assert_eq!(answer_class(false, false, true), "answers-button");
        assert_eq!(answer_class(false, true, false), "answers-button selected");
        assert_eq!(answer_class(false, true, true), "answers-button selected");
    }

    #[test]
    fn checked_round_reveals_correct_answer() {
        assert_eq!(answer_class(true, false, false), "answers-button");
        assert_eq!(answer_class(true, false, true), "answers-button correct-answer");
        assert_eq!(answer_class(true, true, false), "answers-button checked-answers");
        assert_eq!(answer_class(true, true, true), "answers-button checked-answers");
    }
}
