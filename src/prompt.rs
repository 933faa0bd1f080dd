use std::io::{self, BufRead, Write};

use crate::config::CityMap;
use crate::models::{CitySelection, DayFilter, FilterSelection, MonthFilter};

const MONTH_CHOICES: &str = "January, February, March, April, May, June or all";
const DAY_CHOICES: &str = "Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday or all";

/// Line-oriented question/answer over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `message` and read one answer, trimmed and lowercased.
    /// Closed input is reported as `UnexpectedEof`.
    pub fn ask(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_lowercase())
    }

    /// Ask until `parse` accepts the answer, using `retry` after a rejection
    pub fn ask_until<T, F>(&mut self, question: &str, retry: &str, parse: F) -> io::Result<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        let mut answer = self.ask(question)?;
        loop {
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            answer = self.ask(retry)?;
        }
    }

    /// Strict yes/no question
    pub fn ask_yes_no(&mut self, question: &str) -> io::Result<bool> {
        self.ask_until(question, "\nPlease enter yes or no.\n>> ", |answer| match answer {
            "yes" => Some(true),
            "no" => Some(false),
            _ => None,
        })
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn city_choices(cities: &CityMap) -> String {
    let names: Vec<String> = cities.cities().map(title_case).collect();
    format!("{} or all", names.join(", "))
}

/// Collect a validated city/month/day selection
pub fn get_filters<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    cities: &CityMap,
) -> io::Result<FilterSelection> {
    writeln!(prompter.output(), "Hey there! Time for digging some bikeshare data!")?;

    let choices = city_choices(cities);
    let city = prompter.ask_until(
        &format!("\nWould you like to filter the data by city?\n\nSelect from {}. >> ", choices),
        &format!("\nThat's not a valid city.\n\nPlease, enter {}. >> ", choices),
        |answer| CitySelection::parse(answer, cities).ok(),
    )?;

    let month = prompter.ask_until(
        &format!(
            "\nWould you like to filter the data by month?\n\nSelect from {}. >> ",
            MONTH_CHOICES
        ),
        &format!(
            "\nThat's not a valid month.\n\nPlease, select from {}. >> ",
            MONTH_CHOICES
        ),
        |answer| MonthFilter::parse(answer).ok(),
    )?;

    let day = prompter.ask_until(
        &format!(
            "\nWould you like to filter the data by day?\n\nSelect from {}. >> ",
            DAY_CHOICES
        ),
        &format!("\nThat's not a valid entry.\n\nSelect from {}. >> ", DAY_CHOICES),
        |answer| DayFilter::parse(answer).ok(),
    )?;

    let selection = FilterSelection { city, month, day };
    writeln!(prompter.output(), "\nLooking at {}", selection)?;
    writeln!(prompter.output(), "{}", "_".repeat(40))?;
    Ok(selection)
}
