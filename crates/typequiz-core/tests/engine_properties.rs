//! Engine-wide properties checked against the built-in catalog.

use std::collections::HashSet;
use std::path::Path;

use proptest::prelude::*;

use typequiz_core::builtin;
use typequiz_core::model::{InteractionStyle, Question};
use typequiz_core::parser::{parse_catalog, validate_catalog};
use typequiz_core::{AnswerMachine, NavigationTarget, Sequencer, Transition};

fn questions_with(style: InteractionStyle) -> Vec<&'static Question> {
    builtin::catalog()
        .questions()
        .filter(|q| q.interaction() == style)
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Select(usize),
    Toggle(usize),
    Submit,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8).prop_map(Op::Select),
        (0usize..8).prop_map(Op::Toggle),
        Just(Op::Submit),
    ]
}

fn apply(machine: &mut AnswerMachine<'_>, op: &Op) -> Transition {
    let targets = machine.question().targets();
    match op {
        Op::Select(i) => machine.select(targets[i % targets.len()].id),
        Op::Toggle(i) => machine.toggle(targets[i % targets.len()].id),
        Op::Submit => machine.submit(),
    }
}

#[test]
fn single_select_verdict_matches_option_flag() {
    let mut checked = 0;
    for style in [InteractionStyle::SingleSelect, InteractionStyle::HitTest] {
        for question in questions_with(style) {
            for target in question.targets() {
                let mut machine = AnswerMachine::new(question);
                let transition = machine.select(target.id);
                assert_eq!(
                    transition,
                    Transition::Submitted {
                        correct: target.is_correct
                    },
                    "{} / {}",
                    question.id,
                    target.id
                );
                assert!(machine.state().submitted);
                assert_eq!(machine.state().correct, Some(target.is_correct));
                checked += 1;
            }
        }
    }
    assert!(checked > 0);
}

#[test]
fn lookup_round_trip_for_every_question() {
    let catalog = builtin::catalog();
    for question in catalog.questions() {
        let found = catalog.lookup(&question.id).unwrap();
        assert_eq!(found.question, question);
        let sequence = &found.category.questions;
        assert_eq!(sequence[found.index].id, question.id);
        assert_eq!(
            found.next_question_id,
            sequence.get(found.index + 1).map(|q| q.id.as_str())
        );
    }
}

#[test]
fn sequencer_visits_each_category_in_order() {
    let catalog = builtin::catalog();
    let sequencer = Sequencer::new(catalog);

    for category in catalog.categories() {
        let mut visited = Vec::new();
        let mut target = sequencer.start(&category.id).unwrap();
        while let NavigationTarget::Question(id) = target {
            let question = catalog.lookup(&id).unwrap().question;
            let mut machine = AnswerMachine::new(question);
            // Synthetic answer: the first target is always a legal input.
            let first = question.targets()[0].id;
            match question.interaction() {
                InteractionStyle::MultiSelect => {
                    machine.toggle(first);
                    machine.submit();
                }
                _ => {
                    machine.select(first);
                }
            }
            visited.push(id);
            target = sequencer.advance_from(&machine).unwrap();
        }
        let expected: Vec<_> = category.questions.iter().map(|q| q.id.clone()).collect();
        assert_eq!(visited, expected, "category {}", category.id);
    }
}

#[test]
fn bundled_catalog_file_matches_builtin() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../catalogs/typography.toml");
    let parsed = parse_catalog(&path).unwrap();
    assert!(validate_catalog(&parsed).is_empty());
    assert_eq!(&parsed, builtin::catalog());
}

proptest! {
    #[test]
    fn multi_select_verdict_is_set_equality(
        question_index in 0usize..8,
        toggles in prop::collection::vec(0usize..8, 0..24),
    ) {
        let multi = questions_with(InteractionStyle::MultiSelect);
        let question = multi[question_index % multi.len()];
        let targets = question.targets();
        let mut machine = AnswerMachine::new(question);
        for i in &toggles {
            prop_assert_eq!(machine.toggle(targets[i % targets.len()].id), Transition::Updated);
        }

        let picked: HashSet<&str> = machine.state().selected.iter().map(String::as_str).collect();
        let correct: HashSet<&str> = question.correct_ids().into_iter().collect();
        let expected = picked == correct;

        prop_assert_eq!(machine.submit(), Transition::Submitted { correct: expected });
        prop_assert_eq!(machine.state().correct, Some(expected));
    }

    #[test]
    fn toggling_twice_is_identity(
        question_index in 0usize..8,
        prefix in prop::collection::vec(0usize..8, 0..10),
        x in 0usize..8,
    ) {
        let multi = questions_with(InteractionStyle::MultiSelect);
        let question = multi[question_index % multi.len()];
        let mut machine = AnswerMachine::new(question);
        for i in &prefix {
            apply(&mut machine, &Op::Toggle(*i));
        }
        let before = machine.state().clone();
        apply(&mut machine, &Op::Toggle(x));
        apply(&mut machine, &Op::Toggle(x));
        prop_assert_eq!(machine.state(), &before);
    }

    #[test]
    fn inputs_after_submission_change_nothing(
        question_index in 0usize..16,
        before in prop::collection::vec(op(), 0..6),
        after in prop::collection::vec(op(), 1..12),
    ) {
        let all: Vec<_> = builtin::catalog().questions().collect();
        let question = all[question_index % all.len()];
        let mut machine = AnswerMachine::new(question);
        for op in &before {
            apply(&mut machine, op);
        }
        // Force the submission through whichever input the variant takes.
        if !machine.is_submitted() {
            match question.interaction() {
                InteractionStyle::MultiSelect => {
                    machine.submit();
                }
                _ => {
                    machine.select(question.targets()[0].id);
                }
            }
        }
        prop_assert!(!machine.is_interactive());

        let frozen = machine.state().clone();
        for op in &after {
            let transition = apply(&mut machine, op);
            prop_assert!(matches!(transition, Transition::Ignored(_)));
            prop_assert_eq!(machine.state(), &frozen);
        }
    }
}
