//! Line-based interactive quiz loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;

use drivetheory_core::model::Question;
use drivetheory_core::session::QuizSession;

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptOptions {
    pub randomize: bool,
    pub show_correct_count: bool,
}

/// A parsed answer line.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    /// Display positions (zero-based) the user picked.
    Choices(Vec<usize>),
    Skip,
    Quit,
}

fn parse_reply(line: &str, answer_count: usize) -> Result<Reply, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Reply::Skip);
    }
    if line.eq_ignore_ascii_case("q") {
        return Ok(Reply::Quit);
    }

    let mut picked = Vec::new();
    for token in line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        match token.parse::<usize>() {
            Ok(n) if (1..=answer_count).contains(&n) => {
                if !picked.contains(&(n - 1)) {
                    picked.push(n - 1);
                }
            }
            _ => {
                return Err(format!(
                    "Enter answer numbers between 1 and {answer_count} separated by commas, \
                     an empty line to skip, or q to finish."
                ))
            }
        }
    }
    Ok(Reply::Choices(picked))
}

fn render_question(
    question: &Question,
    position: usize,
    total: usize,
    order: &[usize],
    options: &PromptOptions,
) -> String {
    let mut text = format!(
        "\nQuestion {}/{} (#{}, {} pts)",
        position + 1,
        total,
        question.index,
        question.point_value()
    );
    if options.show_correct_count {
        text.push_str(&format!(" | Correct: {}", question.correct_count()));
    }
    text.push('\n');
    text.push_str(&question.text);
    text.push('\n');
    if let Some(image) = &question.image {
        text.push_str(&format!("  [image] {image}\n"));
    }
    if let Some(video) = &question.video {
        text.push_str(&format!("  [video] {video}\n"));
    }
    for (shown, &canonical) in order.iter().enumerate() {
        let answer = &question.answers[canonical];
        let label = match (&answer.text, &answer.image) {
            (Some(t), Some(i)) => format!("{t} [image] {i}"),
            (Some(t), None) => t.clone(),
            (None, Some(i)) => format!("[image] {i}"),
            (None, None) => String::new(),
        };
        text.push_str(&format!("  {}) {label}\n", shown + 1));
    }
    text
}

/// Walk through every question of `session`, reading one answer line per
/// question. Stops early on `q` or end of input. The session is started
/// here but not finished.
pub fn run_session<R, W, G>(
    session: &mut QuizSession,
    options: &PromptOptions,
    rng: &mut G,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    session.start();
    let total = session.len();

    'questions: while let Some(question) = session.current_question() {
        let order = session.display_order(options.randomize, rng);
        let shown = render_question(question, session.position(), total, &order, options);
        write!(out, "{shown}")?;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break 'questions;
            }
            match parse_reply(&line, order.len()) {
                Ok(Reply::Quit) => break 'questions,
                Ok(Reply::Skip) => {
                    session.select(&[]);
                    break;
                }
                Ok(Reply::Choices(picked)) => {
                    let canonical: Vec<usize> = picked.iter().map(|&p| order[p]).collect();
                    session.select(&canonical);
                    break;
                }
                Err(hint) => writeln!(out, "{hint}")?,
            }
        }

        if !session.next() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivetheory_core::model::{Answer, QuizData};
    use drivetheory_core::scoring::Outcome;
    use drivetheory_core::session::SessionKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn quiz() -> QuizData {
        let question = |index: &str, key: &[bool]| Question {
            index: index.into(),
            text: format!("Question {index}"),
            points: "1".into(),
            page_num: None,
            image: None,
            video: None,
            answers: key
                .iter()
                .enumerate()
                .map(|(i, &checked)| Answer {
                    text: Some(format!("option {i}")),
                    image: None,
                    checked,
                })
                .collect(),
        };
        QuizData::new(vec![
            question("1", &[true, false, true]),
            question("2", &[false, true]),
            question("3", &[true, false]),
        ])
    }

    fn run(input: &str, options: PromptOptions) -> (QuizSession, String) {
        let mut session = QuizSession::new(SessionKind::Drill, quiz());
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = Vec::new();
        run_session(
            &mut session,
            &options,
            &mut rng,
            &mut Cursor::new(input.as_bytes()),
            &mut out,
        )
        .unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_replies() {
        assert_eq!(parse_reply("1,3\n", 3), Ok(Reply::Choices(vec![0, 2])));
        assert_eq!(parse_reply(" 2 1 2 ", 3), Ok(Reply::Choices(vec![1, 0])));
        assert_eq!(parse_reply("\n", 3), Ok(Reply::Skip));
        assert_eq!(parse_reply("Q", 3), Ok(Reply::Quit));
        assert!(parse_reply("4", 3).is_err());
        assert!(parse_reply("0", 3).is_err());
        assert!(parse_reply("a", 3).is_err());
    }

    #[test]
    fn answers_every_question() {
        let (mut session, out) = run("1,3\n\n2\n", PromptOptions::default());
        let graded = session.finish();
        let outcomes: Vec<Outcome> = graded.results.iter().map(|r| r.outcome()).collect();
        assert_eq!(
            outcomes,
            vec![Outcome::Correct, Outcome::Unanswered, Outcome::Incorrect]
        );
        assert!(out.contains("Question 3/3"));
    }

    #[test]
    fn reprompts_on_bad_input() {
        let (session, out) = run("9\n1,3\nq\n", PromptOptions::default());
        assert!(out.contains("Enter answer numbers between 1 and 3"));
        assert!(session.selections()[0].is_selected(2));
        assert!(session.selections()[1].is_blank());
    }

    #[test]
    fn end_of_input_stops_early() {
        let (mut session, _) = run("1,3\n", PromptOptions::default());
        let graded = session.finish();
        assert_eq!(graded.summary.correct_questions, 1);
        assert_eq!(graded.summary.unanswered_questions, 2);
    }

    #[test]
    fn shows_correct_count_hint() {
        let options = PromptOptions {
            show_correct_count: true,
            ..PromptOptions::default()
        };
        let (_, out) = run("q\n", options);
        assert!(out.contains("| Correct: 2"));
    }

    #[test]
    fn shuffled_choices_map_to_canonical_positions() {
        let options = PromptOptions {
            randomize: true,
            ..PromptOptions::default()
        };
        let mut session = QuizSession::new(SessionKind::Drill, quiz());
        let mut rng = StdRng::seed_from_u64(11);
        let order = session.display_order(true, &mut StdRng::seed_from_u64(11));
        // Pick whatever is displayed first.
        let mut out = Vec::new();
        run_session(
            &mut session,
            &options,
            &mut rng,
            &mut Cursor::new(&b"1\nq\n"[..]),
            &mut out,
        )
        .unwrap();
        assert!(session.selections()[0].is_selected(order[0]));
    }
}
