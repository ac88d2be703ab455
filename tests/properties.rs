//! Property tests for the scoring, detection, and disclosure invariants.

use proptest::prelude::*;

use intake_core::domain::disclosure::DisclosureGate;
use intake_core::domain::questionnaire::{
    AnswerSet, AnswerValue, OptionDefinition, QuestionDefinition, QuestionnaireDefinition,
};
use intake_core::domain::scoring::{RedFlagDetector, ScoringEngine};

fn weighted_definition() -> QuestionnaireDefinition {
    QuestionnaireDefinition {
        id: "prop".into(),
        title: "Property fixture".into(),
        questions: vec![
            QuestionDefinition::single(
                "q-severity",
                "Severity?",
                vec![
                    OptionDefinition::new("none", "None").with_weight(0),
                    OptionDefinition::new("mild", "Mild").with_weight(1),
                    OptionDefinition::new("severe", "Severe").with_weight(3),
                ],
            ),
            QuestionDefinition::multi(
                "q-symptoms",
                "Symptoms?",
                vec![
                    OptionDefinition::new("flag", "Alarming symptom")
                        .with_weight(3)
                        .red_flag(),
                    OptionDefinition::new("benign-a", "Benign A").with_weight(1),
                    OptionDefinition::new("benign-b", "Benign B").with_weight(2),
                ],
            ),
            QuestionDefinition::single(
                "q-duration",
                "Duration?",
                vec![
                    OptionDefinition::new("hours", "Hours").with_weight(1),
                    OptionDefinition::new("days", "Days").with_weight(2),
                ],
            )
            .with_scale(0.0, 10.0, None),
        ],
        categories: vec![],
        follow_ups: vec![],
        free_follow_ups: 2,
        safety_notice: None,
    }
}

fn unweighted_definition() -> QuestionnaireDefinition {
    let mut definition = weighted_definition();
    for question in &mut definition.questions {
        for option in &mut question.options {
            option.weight = None;
        }
    }
    definition
}

prop_compose! {
    fn severity_answer()(index in 0usize..3) -> AnswerValue {
        AnswerValue::single(["none", "mild", "severe"][index])
    }
}

prop_compose! {
    fn symptoms_answer()(mask in 1u8..8) -> AnswerValue {
        let all = ["flag", "benign-a", "benign-b"];
        AnswerValue::multi(
            all.iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, id)| *id),
        )
    }
}

prop_compose! {
    fn duration_answer()(index in 0usize..2, scalar in 0.0f64..=10.0) -> AnswerValue {
        AnswerValue::hybrid(["hours", "days"][index], scalar)
    }
}

prop_compose! {
    fn answer_set()(
        severity in proptest::option::of(severity_answer()),
        symptoms in proptest::option::of(symptoms_answer()),
        duration in proptest::option::of(duration_answer()),
    ) -> AnswerSet {
        let mut answers = AnswerSet::new();
        if let Some(value) = severity {
            answers.set("q-severity".into(), value);
        }
        if let Some(value) = symptoms {
            answers.set("q-symptoms".into(), value);
        }
        if let Some(value) = duration {
            answers.set("q-duration".into(), value);
        }
        answers
    }
}

proptest! {
    #[test]
    fn overall_score_is_a_bounded_integer(answers in answer_set()) {
        let definition = weighted_definition();
        let result = ScoringEngine::score(&definition, &answers);
        prop_assert!(result.overall.value() <= 100);
    }

    #[test]
    fn scoring_and_detection_are_deterministic(answers in answer_set()) {
        let definition = weighted_definition();
        prop_assert_eq!(
            ScoringEngine::score(&definition, &answers),
            ScoringEngine::score(&definition, &answers)
        );
        prop_assert_eq!(
            RedFlagDetector::detect(&definition, &answers),
            RedFlagDetector::detect(&definition, &answers)
        );
    }

    #[test]
    fn unweighted_definitions_always_score_zero(answers in answer_set()) {
        let definition = unweighted_definition();
        let result = ScoringEngine::score(&definition, &answers);
        prop_assert_eq!(result.overall.value(), 0);
    }

    #[test]
    fn adding_a_red_flag_triggers_and_benign_additions_never_untrigger(
        benign_mask in 0u8..4,
    ) {
        let definition = weighted_definition();
        let benign = ["benign-a", "benign-b"];
        let selected: Vec<&str> = benign
            .iter()
            .enumerate()
            .filter(|(i, _)| benign_mask & (1 << i) != 0)
            .map(|(_, id)| *id)
            .collect();

        let mut answers = AnswerSet::new();
        if !selected.is_empty() {
            answers.set("q-symptoms".into(), AnswerValue::multi(selected.clone()));
        }
        prop_assert!(!RedFlagDetector::detect(&definition, &answers).triggered);

        let mut with_flag = selected.clone();
        with_flag.push("flag");
        answers.set("q-symptoms".into(), AnswerValue::multi(with_flag.clone()));
        prop_assert!(RedFlagDetector::detect(&definition, &answers).triggered);

        for extra in benign {
            if !with_flag.contains(&extra) {
                with_flag.push(extra);
                answers.set("q-symptoms".into(), AnswerValue::multi(with_flag.clone()));
                prop_assert!(RedFlagDetector::detect(&definition, &answers).triggered);
            }
        }
    }

    #[test]
    fn disclosure_unlocks_exactly_the_free_prefix(
        texts in proptest::collection::vec("[a-z ]{1,20}", 0..12),
        free_count in 0usize..6,
        is_authenticated in any::<bool>(),
    ) {
        let gate = DisclosureGate::new(free_count);
        let list = gate.reveal(&texts, is_authenticated);

        prop_assert_eq!(list.len(), texts.len());
        for (index, item) in list.items().iter().enumerate() {
            let expected_locked = index >= free_count && !is_authenticated;
            prop_assert_eq!(item.locked, expected_locked);
        }
        if is_authenticated {
            prop_assert_eq!(list.locked_count(), 0);
        }
    }
}
