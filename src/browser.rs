use std::io::{self, BufRead, Write};

use crate::models::{Trip, TripTable, weekday_name};
use crate::prompt::Prompter;

pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserState {
    Browsing,
    Done,
}

/// Pages through a trip table five rows at a time
#[derive(Debug)]
pub struct RawDataBrowser<'a> {
    table: &'a TripTable,
    offset: usize,
    state: BrowserState,
}

impl<'a> RawDataBrowser<'a> {
    pub fn new(table: &'a TripTable) -> Self {
        Self {
            table,
            offset: 0,
            state: BrowserState::Browsing,
        }
    }

    pub fn state(&self) -> BrowserState {
        self.state
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current page; empty once the offset passes the end
    pub fn page(&self) -> &'a [Trip] {
        self.table.rows(self.offset, PAGE_SIZE)
    }

    pub fn advance(&mut self) {
        self.offset = self.offset.saturating_add(PAGE_SIZE);
    }

    pub fn finish(&mut self) {
        self.state = BrowserState::Done;
    }

    pub fn write_page<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rows = self.page();
        if rows.is_empty() {
            return Ok(());
        }

        let mut header = vec![
            "", "Start Time", "End Time", "Start Station", "End Station", "User Type",
        ];
        if self.table.has_gender {
            header.push("Gender");
        }
        if self.table.has_birth_year {
            header.push("Birth Year");
        }
        header.extend(["month", "day", "hour"]);
        writeln!(out, "{}", header.join(" | "))?;

        for trip in rows {
            writeln!(out, "{}", self.format_row(trip))?;
        }
        Ok(())
    }

    fn format_row(&self, trip: &Trip) -> String {
        let mut cells = vec![
            trip.row_id.to_string(),
            trip.start_time.to_string(),
            trip.end_time.to_string(),
            trip.start_station.clone(),
            trip.end_station.clone(),
            trip.user_type.clone().unwrap_or_else(|| "NaN".to_string()),
        ];
        if self.table.has_gender {
            cells.push(trip.gender.clone().unwrap_or_else(|| "NaN".to_string()));
        }
        if self.table.has_birth_year {
            cells.push(
                trip.birth_year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "NaN".to_string()),
            );
        }
        cells.push(trip.month.to_string());
        cells.push(weekday_name(trip.weekday).to_string());
        cells.push(trip.hour.to_string());
        cells.join(" | ")
    }
}

/// Offer raw rows until the user declines
pub fn browse_raw_data<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    table: &TripTable,
) -> io::Result<()> {
    if !prompter.ask_yes_no("Would you like to see some raw data?\nEnter yes or no.\n>> ")? {
        writeln!(prompter.output(), "Done.")?;
        return Ok(());
    }

    let mut browser = RawDataBrowser::new(table);
    while browser.state() == BrowserState::Browsing {
        browser.write_page(prompter.output())?;
        if prompter.ask_yes_no(
            "Would you like to see 5 more lines of raw data?\nEnter yes or no.\n>> ",
        )? {
            browser.advance();
        } else {
            browser.finish();
        }
    }
    Ok(())
}
