use anyhow::{bail, Context as _, Result};
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use chumsky::error::Simple;
use psiarray::{
    array_to_term, convert, parse_array_literal, parse_term, parser::strip_whitespace, render,
    term_to_array, DisplayConfig, DisplayOption, Error,
};
use util::repl;

/// The array-literal grammar has no delimiters, so the only failures are an
/// unexpected character and an out of range number.
fn build_array_report(e: Simple<char>) -> Report {
    use chumsky::error::SimpleReason;
    let report = Report::build(ReportKind::Error, (), e.span().start);
    let message = match e.reason() {
        SimpleReason::Custom(msg) => format!("Not a number: {msg}"),
        _ => {
            let found = e.found().map_or("end of the input".to_string(), char::to_string);
            let expected = if e.expected().any(|c| c == &Some(',')) {
                "a digit or ,"
            } else {
                "a number"
            };
            format!("Unexpected {found}, expected {expected}")
        }
    };
    report
        .with_message(&message)
        .with_label(
            Label::new(e.span())
                .with_message(message.fg(Color::Red))
                .with_color(Color::Red),
        )
        .finish()
}

fn build_term_report(e: &Error) -> Report {
    let span = e.span().unwrap_or(0..0);
    let report = Report::build(ReportKind::Error, (), span.start).with_message(e);
    let label = Label::new(span);
    match e {
        Error::UnexpectedCharacter {
            expected, found, ..
        } => report.with_label(
            label
                .with_message(format!(
                    "Unexpected {}, expected {expected}",
                    found.fg(Color::Red)
                ))
                .with_color(Color::Red),
        ),
        Error::UnexpectedEndOfInput { expected, .. } => report.with_label(
            label
                .with_message(format!("Expected {}", expected.fg(Color::Red)))
                .with_color(Color::Red),
        ),
        Error::InvalidZeroAddition { .. } => report.with_label(
            label
                .with_message(format!("{} must stand alone", "0".fg(Color::Yellow)))
                .with_color(Color::Yellow),
        ),
        Error::NumberTooLarge { limit, .. } => report.with_label(
            label
                .with_message(format!("Must not exceed {}", limit.fg(Color::Red)))
                .with_color(Color::Red),
        ),
        Error::NestingTooDeep { limit, .. } => report.with_label(
            label
                .with_message(format!("Nested more than {} levels", limit.fg(Color::Red)))
                .with_color(Color::Red),
        ),
        Error::EmptyInput
        | Error::NegativeArrayValue { .. }
        | Error::ArrayValueOverflow { .. } => report,
    }
    .finish()
}

enum Failure {
    Term(Error),
    Array(Vec<Simple<char>>),
    Usage(String),
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Failure::Term(e)
    }
}

type CommandResult = Result<(), Failure>;

fn split_command(input: &str) -> (&str, &str) {
    if let Some(stripped) = input.strip_prefix(':') {
        stripped
            .trim_start()
            .split_once(' ')
            .unwrap_or((stripped, ""))
    } else {
        ("", input)
    }
}

#[derive(Default)]
struct Repl {
    config: DisplayConfig,
}
impl Repl {
    fn convert(&self, input: &str) -> CommandResult {
        println!("{}", convert(input)?.output(&self.config));
        Ok(())
    }

    fn parse(input: &str) -> CommandResult {
        let term = parse_term(input)?;
        println!("{term:?}");
        Ok(())
    }

    fn array(input: &str) -> CommandResult {
        let array = term_to_array(&parse_term(input)?)?;
        println!("{array:?}");
        Ok(())
    }

    fn term(&self, input: &str) -> CommandResult {
        let array = parse_array_literal(input).map_err(Failure::Array)?;
        let term = array_to_term(&array)?;
        println!("{}", self.config.wrap(&render(&term, &self.config)));
        Ok(())
    }

    fn render(&self, input: &str) -> CommandResult {
        let term = parse_term(input)?;
        println!("{}", self.config.wrap(&render(&term, &self.config)));
        Ok(())
    }

    fn set(&mut self, input: &str) -> CommandResult {
        let usage = || Failure::Usage(format!("Usage: :set option on|off, got {input:?}"));
        let (name, value) = input.trim().split_once(' ').ok_or_else(usage)?;
        let option = DisplayOption::from_name(name.trim())
            .ok_or_else(|| Failure::Usage(format!("Unknown option {name}")))?;
        let on = match value.trim() {
            "on" | "true" | "1" => true,
            "off" | "false" | "0" => false,
            _ => return Err(usage()),
        };
        self.config = self.config.with(option, on);
        self.show_options();
        Ok(())
    }

    fn show_options(&self) {
        for option in DisplayOption::ALL {
            let state = if self.config.get(option) { "on" } else { "off" };
            println!("{:<8}{state:<5}-- {}", option.to_string(), option.description());
        }
    }

    fn show_help() {
        println!(
            "{}",
            r#"
text                -- same as :convert text
:convert    text    -- decode an array literal, or encode a term
:parse      term    -- show the parsed term
:array      term    -- show the array form of the term
:term       a,b,... -- show the term encoded by the array
:render     term    -- show the term with the current options
:set opt on|off     -- change a display option (omega, Omega, pair, nosub, tex)
:options            -- show the display options
:help               -- show this message
        "#
            .trim()
        );
    }

    fn handle_repl_input(&mut self, input: &str) -> CommandResult {
        let (cmd, input) = split_command(input);
        match cmd {
            "" | "c" | "convert" => self.convert(input)?,
            "p" | "parse" => Self::parse(input)?,
            "a" | "array" => Self::array(input)?,
            "t" | "term" => self.term(input)?,
            "r" | "render" => self.render(input)?,
            "s" | "set" => self.set(input)?,
            "o" | "options" => self.show_options(),
            "h" | "he" | "hel" | "help" => Self::show_help(),
            _ => {
                eprintln!("Unknown command {cmd}");
                Self::show_help();
            }
        }
        Ok(())
    }
}
impl repl::Repl for Repl {
    type Error = anyhow::Error;
    const HISTORY: Option<&'static str> = Some("/tmp/psiarray.history");
    fn evaluate(&mut self, input: String) -> Result<(), Self::Error> {
        // error positions count characters of the argument without whitespace
        let source = strip_whitespace(split_command(&input).1);
        match self.handle_repl_input(&input) {
            Ok(()) => {}
            Err(Failure::Term(e)) if e.span().is_some() => {
                build_term_report(&e).eprint(Source::from(&source))?
            }
            Err(Failure::Term(e)) => eprintln!("Error: {e}"),
            Err(Failure::Array(es)) => {
                for e in es {
                    build_array_report(e).eprint(Source::from(&source))?;
                }
            }
            Err(Failure::Usage(msg)) => eprintln!("{msg}"),
        }
        Ok(())
    }
}

/// `psiarray [--option]... input...` converts every input with the given
/// display options turned on.
fn run_args(args: Vec<String>) -> Result<()> {
    let mut config = DisplayConfig::default();
    for arg in args {
        if let Some(name) = arg.strip_prefix("--") {
            match DisplayOption::from_name(name) {
                Some(option) => config = config.with(option, true),
                None => bail!("Unknown option --{name}"),
            }
            continue;
        }
        let conversion = convert(&arg).with_context(|| format!("Failed to convert {arg:?}"))?;
        println!("{}", conversion.output(&config));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return run_args(args);
    }
    println!("Hi, this converts ψ terms and arrays. :h to show help");
    println!();
    repl::start_repl(Repl::default())?;
    Ok(())
}
