//! The `typequiz play` command: a line-based terminal front-end.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use typequiz_core::feedback::{Feedback, Mark};
use typequiz_core::model::{ClassificationKind, InteractionStyle, Question, QuestionKind};
use typequiz_core::{
    AnswerMachine, Catalog, NavigationTarget, QuestionLookup, Rejection, Sequencer, Transition,
};

use super::open_catalog;

pub struct PlayArgs {
    pub category: Option<String>,
    pub question: Option<String>,
    pub catalog: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub delay_ms: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let (config, catalog) = open_catalog(args.catalog.as_deref(), args.config.as_deref())?;
    let catalog: &Catalog = &catalog;
    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.advance_delay());
    tracing::debug!(
        show_assets = config.show_assets,
        "advance delay: {}ms",
        delay.as_millis()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut frontend = Frontend {
        catalog,
        sequencer: Sequencer::new(catalog),
        input: stdin.lock(),
        output: stdout.lock(),
        delay,
        show_assets: config.show_assets,
        rng: StdRng::from_entropy(),
    };

    let first = match (args.question, args.category) {
        (Some(id), _) => Screen::Question(id),
        (None, Some(category)) => frontend.enter_category(&category)?,
        (None, None) => Screen::CategorySelect,
    };
    frontend.run(first)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    CategorySelect,
    Question(String),
    Quit,
}

impl From<NavigationTarget> for Screen {
    fn from(target: NavigationTarget) -> Self {
        match target {
            NavigationTarget::Question(id) => Screen::Question(id),
            NavigationTarget::CategorySelect => Screen::CategorySelect,
        }
    }
}

struct Frontend<'c, R, W> {
    catalog: &'c Catalog,
    sequencer: Sequencer<'c>,
    input: R,
    output: W,
    delay: Duration,
    show_assets: bool,
    rng: StdRng,
}

impl<'c, R: BufRead, W: Write> Frontend<'c, R, W> {
    fn run(&mut self, first: Screen) -> Result<()> {
        let mut screen = first;
        loop {
            screen = match screen {
                Screen::CategorySelect => self.category_select()?,
                Screen::Question(id) => self.question(&id)?,
                Screen::Quit => break,
            };
        }
        writeln!(self.output, "Bye!")?;
        Ok(())
    }

    /// First screen of a category; an unknown id falls back to category select.
    fn enter_category(&mut self, category_id: &str) -> Result<Screen> {
        match self.sequencer.start(category_id) {
            Ok(target) => Ok(Screen::from(target)),
            Err(e) if e.is_not_found() => {
                tracing::warn!("{e}");
                writeln!(self.output, "Category not found: {category_id}")?;
                Ok(Screen::CategorySelect)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Next input line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn category_select(&mut self) -> Result<Screen> {
        writeln!(self.output, "\nCategories:")?;
        for (i, category) in self.catalog.categories().iter().enumerate() {
            writeln!(
                self.output,
                "  {}. {} ({} questions)",
                i + 1,
                category.title,
                category.questions.len()
            )?;
        }

        loop {
            write!(self.output, "Pick a category (number or id, q to quit): ")?;
            let Some(input) = self.read_line()? else {
                return Ok(Screen::Quit);
            };
            match input.as_str() {
                "" => continue,
                "q" | "quit" => return Ok(Screen::Quit),
                _ => {}
            }

            let categories = self.catalog.categories();
            let picked = input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| categories.get(i))
                .or_else(|| categories.iter().find(|c| c.id == input));
            let Some(category) = picked else {
                writeln!(self.output, "Unknown category: {input}")?;
                continue;
            };

            match self.sequencer.start(&category.id)? {
                NavigationTarget::Question(id) => return Ok(Screen::Question(id)),
                NavigationTarget::CategorySelect => {
                    writeln!(self.output, "{} has no questions yet.", category.title)?;
                }
            }
        }
    }

    fn question(&mut self, id: &str) -> Result<Screen> {
        let found = match self.catalog.lookup(id) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("{e}");
                writeln!(self.output, "Question not found: {id}")?;
                return Ok(Screen::CategorySelect);
            }
        };
        self.render_question(&found)?;

        let question = found.question;
        let mut machine = AnswerMachine::new(question);
        let instruction = match question.interaction() {
            InteractionStyle::SingleSelect => "Pick one (number or name, x to leave):",
            InteractionStyle::MultiSelect => {
                "Toggle options (numbers or names), s to submit, x to leave:"
            }
            InteractionStyle::HitTest => "Click a layer (number or name, x to leave):",
        };
        writeln!(self.output, "{instruction}")?;

        while machine.is_interactive() {
            write!(self.output, "> ")?;
            let Some(line) = self.read_line()? else {
                return Ok(Screen::Quit);
            };

            // A whole line naming one target wins over splitting it, so
            // multi-word labels like "ibm plex" can be typed.
            let tokens: Vec<&str> = if line.contains(' ')
                && resolve_target(question, &line).is_some()
            {
                vec![line.as_str()]
            } else {
                line.split_whitespace().collect()
            };

            for token in tokens {
                let transition = match token {
                    "x" | "exit" => return Ok(Screen::CategorySelect),
                    "s" | "submit" => machine.submit(),
                    _ => match resolve_target(question, token) {
                        Some(target) if question.interaction() == InteractionStyle::MultiSelect => {
                            machine.toggle(&target)
                        }
                        Some(target) => machine.select(&target),
                        None => {
                            writeln!(self.output, "Not an option: {token}")?;
                            continue;
                        }
                    },
                };
                match transition {
                    Transition::Ignored(Rejection::BaseLayer) => {
                        writeln!(self.output, "The base layer can't be picked.")?;
                    }
                    Transition::Ignored(Rejection::UnknownTarget(t)) => {
                        writeln!(self.output, "Not an option: {t}")?;
                    }
                    Transition::Ignored(Rejection::WrongInteraction(_)) => {
                        writeln!(self.output, "Nothing to submit; pick an option.")?;
                    }
                    Transition::Ignored(Rejection::AlreadySubmitted) => break,
                    Transition::Updated | Transition::Submitted { .. } => {}
                }
                if machine.is_submitted() {
                    break;
                }
            }

            if machine.is_interactive() && question.interaction() == InteractionStyle::MultiSelect
            {
                let selected = &machine.state().selected;
                let labels: Vec<&str> = question
                    .targets()
                    .into_iter()
                    .filter(|t| selected.contains(t.id))
                    .map(|t| t.label)
                    .collect();
                if labels.is_empty() {
                    writeln!(self.output, "Selected: (none)")?;
                } else {
                    writeln!(self.output, "Selected: {}", labels.join(", "))?;
                }
            }
        }

        self.render_result(&machine)?;
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let next = self.sequencer.advance_from(&machine)?;
        if next == NavigationTarget::CategorySelect {
            writeln!(self.output, "\nEnd of {}.", found.category.title)?;
        }
        Ok(Screen::from(next))
    }

    fn render_question(&mut self, found: &QuestionLookup<'_>) -> Result<()> {
        let question = found.question;
        writeln!(
            self.output,
            "\n[{}] {}/{}",
            found.category.title,
            found.index + 1,
            found.category.questions.len()
        )?;
        writeln!(self.output, "{}", question.title)?;

        match &question.kind {
            QuestionKind::MicroTypography(q) => {
                writeln!(self.output, "  before: {}", q.before_text)?;
                writeln!(self.output, "  after:  {}", q.after_text)?;
            }
            QuestionKind::Classification(q) => {
                if let Some(subject) = &q.main_subject {
                    writeln!(self.output, "  \"{}\"", subject.text)?;
                }
                if q.subtype == ClassificationKind::Grid {
                    writeln!(self.output, "  (pick every match)")?;
                }
            }
            QuestionKind::FontMatch(q) if self.show_assets => {
                writeln!(
                    self.output,
                    "  canvas: {} ({}x{})",
                    q.canvas.background_image, q.canvas.width, q.canvas.height
                )?;
            }
            _ => {}
        }

        let feedback = Feedback::for_machine(&AnswerMachine::new(question));
        for (i, target) in feedback.targets.iter().enumerate() {
            match target.font_family {
                Some(font) if self.show_assets => {
                    writeln!(self.output, "  {}. {} [{font}]", i + 1, target.text)?
                }
                _ => writeln!(self.output, "  {}. {}", i + 1, target.text)?,
            }
        }
        Ok(())
    }

    fn render_result(&mut self, machine: &AnswerMachine<'_>) -> Result<()> {
        let feedback = Feedback::for_machine(machine);
        if let Some(headline) = feedback.headline(&mut self.rng) {
            writeln!(self.output, "{headline}")?;
        }
        for target in &feedback.targets {
            writeln!(self.output, "  {} {}", marker(target.mark), target.text)?;
        }
        if let (true, Some(asset)) = (self.show_assets, feedback.result_asset) {
            writeln!(self.output, "  overlay: {asset}")?;
        }
        Ok(())
    }
}

fn marker(mark: Mark) -> &'static str {
    match mark {
        Mark::Correct => "[+]",
        Mark::WrongPick => "[x]",
        Mark::Selected => "[*]",
        Mark::Idle | Mark::Dimmed => "[ ]",
    }
}

/// Resolve a typed token to a target id: 1-based number, exact id, or a
/// case-insensitive label that names exactly one target.
///
/// Base-layer ids pass through so the answer machine can refuse them.
fn resolve_target(question: &Question, token: &str) -> Option<String> {
    let targets = question.targets();
    if let Some(t) = token
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| targets.get(i))
    {
        return Some(t.id.to_string());
    }
    if let Some(t) = targets.iter().find(|t| t.id == token) {
        return Some(t.id.to_string());
    }
    let mut by_label = targets.iter().filter(|t| t.label.eq_ignore_ascii_case(token));
    if let (Some(t), None) = (by_label.next(), by_label.next()) {
        return Some(t.id.to_string());
    }
    question.is_base_layer(token).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use typequiz_core::builtin;

    fn frontend(input: &str) -> Frontend<'static, Cursor<String>, Vec<u8>> {
        let catalog = builtin::catalog();
        Frontend {
            catalog,
            sequencer: Sequencer::new(catalog),
            input: Cursor::new(input.to_string()),
            output: Vec::new(),
            delay: Duration::ZERO,
            show_assets: false,
            rng: StdRng::seed_from_u64(7),
        }
    }

    fn play(first: Screen, input: &str) -> String {
        let mut frontend = frontend(input);
        frontend.run(first).unwrap();
        String::from_utf8(frontend.output).unwrap()
    }

    #[test]
    fn quit_from_category_select() {
        let out = play(Screen::CategorySelect, "q\n");
        assert!(out.contains("1. Fundamentals (2 questions)"));
        assert!(out.contains("4. Poster Logo (2 questions)"));
        assert!(out.trim_end().ends_with("Bye!"));
    }

    #[test]
    fn unknown_category_is_reported() {
        let out = play(Screen::CategorySelect, "9\nnope\n");
        assert!(out.contains("Unknown category: 9"));
        assert!(out.contains("Unknown category: nope"));
    }

    #[test]
    fn unknown_start_category_falls_back_to_category_select() {
        let mut frontend = frontend("q\n");
        let first = frontend.enter_category("nope").unwrap();
        assert_eq!(first, Screen::CategorySelect);
        frontend.run(first).unwrap();
        let out = String::from_utf8(frontend.output).unwrap();
        assert!(out.contains("Category not found: nope"));
        assert!(out.contains("Categories:"));
    }

    #[test]
    fn start_category_enters_its_first_question() {
        let mut frontend = frontend("");
        assert_eq!(
            frontend.enter_category("poster").unwrap(),
            Screen::Question("q_poster".into())
        );
    }

    #[test]
    fn missing_question_falls_back_to_category_select() {
        let out = play(Screen::Question("q_missing".into()), "");
        assert!(out.contains("Question not found: q_missing"));
        assert!(out.contains("Categories:"));
    }

    #[test]
    fn wrong_imposter_pick_reveals_names() {
        let out = play(Screen::Question("q_10".into()), "1\n");
        assert!(out.contains("Oh no! The correct answer is: Futura"));
        assert!(out.contains("[x] Avenir"));
        assert!(out.contains("[+] Futura"));
        assert!(out.contains("[ ] Carrois"));
        // q_10 is followed by q_12 in the same category
        assert!(out.contains("which of these are monospace fonts?"));
    }

    #[test]
    fn grid_submits_on_s_and_ends_category() {
        let out = play(Screen::Question("q_12".into()), "1 2 3\n6 s\n");
        assert!(out.contains("Selected: courier, monaco, space"));
        assert!(out.contains("+1"));
        assert!(out.contains("End of Classification."));
        assert!(out.contains("Categories:"));
    }

    #[test]
    fn multi_word_label_is_typed_as_one_target() {
        let out = play(Screen::Question("q_12".into()), "ibm plex\nmonaco courier\n");
        assert!(out.contains("Selected: ibm plex\n"));
        assert!(out.contains("Selected: courier, monaco, ibm plex"));
        assert!(!out.contains("Not an option"));
    }

    #[test]
    fn show_assets_prints_canvas_fonts_and_overlay() {
        let mut poster = frontend("3\n");
        poster.show_assets = true;
        poster.run(Screen::Question("q_poster".into())).unwrap();
        let out = String::from_utf8(poster.output).unwrap();
        assert!(out.contains("canvas: technology.png (1280x1554)"));
        assert!(out.contains("1. MONOTON [Monoton]"));
        assert!(out.contains("2. B621 Mono [B612 Mono]"));

        let mut hit = frontend("terminal\n");
        hit.show_assets = true;
        hit.run(Screen::Question("q_4".into())).unwrap();
        let out = String::from_utf8(hit.output).unwrap();
        assert!(out.contains("overlay: fundamentals/ans2.svg"));
    }

    #[test]
    fn hit_test_refuses_base_layer() {
        let out = play(Screen::Question("q_4".into()), "base\nterminal\n");
        assert!(out.contains("The base layer can't be picked."));
        assert!(out.contains("[+] terminal"));
    }

    #[test]
    fn exit_returns_to_category_select() {
        let out = play(Screen::Question("q_33".into()), "x\nq\n");
        assert!(out.contains("before: afsd"));
        assert!(out.contains("Categories:"));
        assert!(!out.contains("+1"));
    }

    #[test]
    fn resolve_by_number_id_and_label() {
        let q = builtin::catalog().lookup("q_12").unwrap().question;
        assert_eq!(resolve_target(q, "2").as_deref(), Some("opt2"));
        assert_eq!(resolve_target(q, "opt4").as_deref(), Some("opt4"));
        assert_eq!(resolve_target(q, "Kadwa").as_deref(), Some("opt5"));
        assert_eq!(resolve_target(q, "0"), None);
        assert_eq!(resolve_target(q, "helvetica"), None);
    }

    #[test]
    fn ambiguous_labels_need_a_number() {
        let q = builtin::catalog().lookup("q_10").unwrap().question;
        assert_eq!(resolve_target(q, "futura"), None);
        assert_eq!(resolve_target(q, "3").as_deref(), Some("opt3"));
    }
}
