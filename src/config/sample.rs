//! Built-in sample questionnaire, used by tests and demo callers.
//!
//! Real deployments load their own tables per department; this one mirrors
//! a typical neurology headache-triage flow.

use once_cell::sync::Lazy;

use crate::domain::questionnaire::{
    OptionDefinition, QuestionDefinition, QuestionnaireDefinition,
};
use crate::domain::scoring::{CategoryDefinition, CategoryRule};

static HEADACHE_TRIAGE: Lazy<QuestionnaireDefinition> = Lazy::new(|| {
    let definition = QuestionnaireDefinition {
        id: "neuro-headache".into(),
        title: "Headache self-check".into(),
        questions: vec![
            QuestionDefinition::single(
                "q-onset",
                "How did the headache start?",
                vec![
                    OptionDefinition::new("gradual", "It built up gradually").with_weight(1),
                    OptionDefinition::new("recurring", "It comes and goes").with_weight(2),
                    OptionDefinition::new("thunderclap", "Suddenly, the worst ever")
                        .with_weight(3)
                        .red_flag(),
                ],
            ),
            QuestionDefinition::multi(
                "q-symptoms",
                "Do any of these apply right now?",
                vec![
                    OptionDefinition::new("vision-loss", "Sudden vision loss or double vision")
                        .with_weight(3)
                        .red_flag(),
                    OptionDefinition::new("numbness", "Numbness or weakness on one side")
                        .with_weight(3)
                        .red_flag(),
                    OptionDefinition::new("nausea", "Nausea or vomiting").with_weight(2),
                    OptionDefinition::new("light", "Light sensitivity").with_weight(1),
                    OptionDefinition::new("none", "None of the above")
                        .with_weight(0)
                        .exclusive(),
                ],
            ),
            QuestionDefinition::multi(
                "q-lifestyle",
                "Which of these describe your recent weeks?",
                vec![
                    OptionDefinition::new("poor-sleep", "Less than six hours of sleep"),
                    OptionDefinition::new("screens", "Long screen sessions most days"),
                    OptionDefinition::new("stress", "A stressful stretch at work or home"),
                    OptionDefinition::new("none", "None of the above").exclusive(),
                ],
            )
            .with_help_text("This helps separate tension-type headaches from other causes."),
            QuestionDefinition::single(
                "q-duration",
                "How long has this episode lasted?",
                vec![
                    OptionDefinition::new("steady", "About the same the whole time").with_weight(1),
                    OptionDefinition::new("worsening", "It keeps getting worse").with_weight(3),
                ],
            )
            .with_scale(0.0, 30.0, Some("days")),
        ],
        categories: vec![
            CategoryDefinition {
                id: "tension".into(),
                label: "Tension".into(),
                hint: "Often tied to stress and posture".into(),
                rules: vec![
                    CategoryRule::OptionSelected {
                        question: "q-lifestyle".into(),
                        option: "stress".into(),
                        points: 2,
                    },
                    CategoryRule::OptionSelected {
                        question: "q-lifestyle".into(),
                        option: "screens".into(),
                        points: 1,
                    },
                ],
            },
            CategoryDefinition {
                id: "sleep".into(),
                label: "Sleep".into(),
                hint: "Look at your evening routine".into(),
                rules: vec![
                    CategoryRule::OptionSelected {
                        question: "q-lifestyle".into(),
                        option: "poor-sleep".into(),
                        points: 2,
                    },
                    CategoryRule::ScalarAtLeast {
                        question: "q-duration".into(),
                        threshold: 7.0,
                        points: 1,
                    },
                ],
            },
            CategoryDefinition {
                id: "migraine".into(),
                label: "Migraine pattern".into(),
                hint: "Worth discussing with a neurologist".into(),
                rules: vec![
                    CategoryRule::OptionSelected {
                        question: "q-onset".into(),
                        option: "recurring".into(),
                        points: 2,
                    },
                    CategoryRule::AnyOf {
                        question: "q-symptoms".into(),
                        options: vec!["nausea".into(), "light".into()],
                        points: 2,
                    },
                ],
            },
        ],
        follow_ups: vec![
            "When during the day does the headache usually peak?".into(),
            "Have over-the-counter painkillers changed anything?".into(),
            "Is there a family history of migraine?".into(),
            "Has your caffeine intake changed recently?".into(),
            "Do the headaches follow your menstrual cycle?".into(),
        ],
        free_follow_ups: 2,
        safety_notice: Some(
            "Some of your answers point to symptoms that should be seen urgently. \
             Please call the clinic now or use the emergency contact below."
                .into(),
        ),
    };
    definition
        .validate()
        .expect("built-in sample definition is valid");
    definition
});

/// Returns the built-in headache-triage questionnaire.
pub fn headache_triage() -> &'static QuestionnaireDefinition {
    &HEADACHE_TRIAGE
}
