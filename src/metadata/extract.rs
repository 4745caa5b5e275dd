use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::model::{EmbeddedTags, Info};
use super::normalize::{fix_whitespace, normalize};

/// Date layouts, most specific first.
static DATE_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // 2000-1-01, 2000/01/01, 2000.1.1, also 2000.01.01-03 and 2000.01.31,01
        r"(?P<year>\d{4})[/.-](?P<month>\d{1,2})[/.-](?P<day>\d{1,2}[-,]*\d*)",
        // show code glued to yymmdd: sci160318d1_01_Shine, ph990710d1_01_Wilson
        r"[a-z0-9]{2,10}(?P<year>\d{2})(?P<month>\d{2})(?P<day>\d{2})",
        // 01.01.2000, 1/1/2000, 1-01-2000
        r"(?P<month>\d{1,2})[/.-](?P<day>\d{1,2})[/.-](?P<year>\d{4})",
        // 03-30-69, 06.09.73
        r"(?P<month>\d{1,2})[/.-](?P<day>\d{1,2})[/.-](?P<year>\d{2})",
        // 98-08-23
        r"(?P<year>\d{2})[/.-](?P<month>\d{1,2})[/.-](?P<day>\d{1,2})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Disc and track layouts, most specific first.
static DISC_TRACK_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // 1-01 , 01-02 , 1-3 - , 03 - 02
        r"^(?P<disc>\d{1,2})\s*-\s*(?P<track>\d{1,2})\s-*\s*",
        // 01 - , 1 , 1- (track only)
        r"^(?P<track>\d{1,2})\s*-*\s*",
        // s01t01, d01t01, s1 01, d301, d1_01
        r"[sd](?P<disc>\d{2})[-. _t]*(?P<track>\d{2})",
        r"[sd](?P<disc>\d)[-. _t]*(?P<track>\d{2})",
        r"[sd](?P<disc>\d)[-. _t]*(?P<track>\d)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static YEAR_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<year>\d{4})(?:\s-*\s*|$)").unwrap());
static DISC_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:cd|disc|disk|set)\s*(?P<disc>\d{1,2})\b\s*").unwrap());
static FIRST_DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}").unwrap());

/// Try `rules` in order; the first whose match `accept` turns into a value
/// wins. Returns that value and the text following the match.
fn first_match<'s, T>(
    rules: &[Regex],
    s: &'s str,
    mut accept: impl FnMut(&Captures<'s>) -> Option<T>,
) -> Option<(T, &'s str)> {
    rules.iter().find_map(|rule| {
        let caps = rule.captures(s)?;
        let value = accept(&caps)?;
        let end = caps.get(0).map_or(0, |m| m.end());
        Some((value, &s[end..]))
    })
}

fn group<'s>(caps: &Captures<'s>, name: &str) -> &'s str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn pad2(s: &str) -> String {
    format!("{s:0>2}")
}

/// A validated calendar date with zero-padded parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Date {
    pub year: String,
    pub month: String,
    pub day: String,
}

/// Turns file and folder names into [`Info`] fields.
#[derive(Debug, Clone)]
pub struct InfoExtractor {
    current_year: i32,
}

impl Default for InfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl InfoExtractor {
    pub fn new() -> Self {
        Self::with_current_year(Local::now().year())
    }

    /// Expand two-digit years relative to `current_year` instead of the clock.
    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Expand a two-digit year to four digits. Years above the current
    /// year's last two digits belong to the previous century.
    pub fn ensure_century(&self, year: &str) -> Option<String> {
        match year.len() {
            4 if year.chars().all(|c| c.is_ascii_digit()) => Some(year.to_string()),
            2 => {
                let y: i32 = year.parse().ok()?;
                let century = self.current_year / 100;
                let century = if y > self.current_year % 100 {
                    century - 1
                } else {
                    century
                };
                Some(format!("{century}{year}"))
            }
            _ => None,
        }
    }

    fn date_from(&self, caps: &Captures<'_>) -> Option<Date> {
        let year = self.ensure_century(group(caps, "year"))?;
        let month = pad2(group(caps, "month"));
        // multi-day spans keep only their first day
        let day = pad2(FIRST_DAY.find(group(caps, "day"))?.as_str());

        NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
        Some(Date { year, month, day })
    }

    /// First valid date in `s` and the text after it.
    pub fn find_date<'s>(&self, s: &'s str) -> Option<(Date, &'s str)> {
        first_match(&DATE_RULES, s, |caps| self.date_from(caps))
    }

    /// Fill the date unless `info` already has a full one. Returns the text
    /// after the matched date, or `s` when none was found.
    pub fn match_date<'s>(&self, info: &mut Info, s: &'s str) -> &'s str {
        match self.find_date(s) {
            Some((date, rest)) => {
                if !info.has_full_date() {
                    info.year = date.year;
                    info.month = date.month;
                    info.day = date.day;
                }
                rest
            }
            None => s,
        }
    }

    /// Leading bare year, used when no full date was found.
    pub fn match_year_only<'s>(&self, info: &mut Info, s: &'s str) -> &'s str {
        let Some(caps) = YEAR_ONLY.captures(s) else {
            return s;
        };
        if info.year.is_empty() {
            info.year = group(&caps, "year").to_string();
        }
        let end = caps.get(0).map_or(0, |m| m.end());
        &s[end..]
    }

    /// Disc and track numbers at the start of a file name, or as a
    /// `s1t01`-style code anywhere in it.
    pub fn match_disc_track<'s>(&self, info: &mut Info, s: &'s str) -> &'s str {
        let found = first_match(&DISC_TRACK_RULES, s, |caps| {
            Some((group(caps, "disc").to_string(), group(caps, "track").to_string()))
        });
        match found {
            Some(((disc, track), rest)) => {
                info.disc = disc;
                info.track = track;
                rest
            }
            None => s,
        }
    }

    /// `cd 2`, `Disc2`, `set 1` anywhere in `s`. Sets the disc only when it is
    /// still empty and returns `s` with the marker removed.
    pub fn match_disc_only(&self, info: &mut Info, s: &str) -> String {
        let Some(caps) = DISC_ONLY.captures(s) else {
            return s.to_string();
        };
        if info.disc.is_empty() {
            info.disc = group(&caps, "disc").to_string();
        }
        DISC_ONLY.replace(s, " ").into_owned()
    }

    /// Date, disc/track and title from a file name without extension.
    pub fn from_filename(&self, name: &str) -> Info {
        let mut info = Info::default();
        let rest = self.match_date(&mut info, name);
        let rest = self.match_disc_track(&mut info, rest);
        info.title = normalize(rest);
        info
    }

    /// Apply one folder name. Only fields that are still empty are filled,
    /// so folders applied earlier win.
    pub fn apply_segment(&self, info: &mut Info, segment: &str) {
        if segment.is_empty() {
            return;
        }
        let s = self.match_disc_only(info, segment);
        let rest = self.match_date(info, &s);
        let rest = self.match_year_only(info, rest.trim_start());
        if info.album.is_empty() {
            info.album = normalize(rest);
        }
    }

    /// Apply folder names, innermost first. `segments` is outermost first.
    pub fn apply_path(&self, info: &mut Info, segments: &[String]) {
        for segment in segments.iter().rev() {
            self.apply_segment(info, segment);
        }
    }

    /// Info as described by a file's embedded tags. The album tag may carry
    /// a leading date, which is split off.
    pub fn from_tags(&self, tags: &EmbeddedTags) -> Info {
        let mut info = Info {
            artist: fix_whitespace(&tags.artist),
            title: normalize(&tags.title),
            disc: tags.disc.map(|d| d.to_string()).unwrap_or_default(),
            track: tags.track.map(|t| format!("{t:02}")).unwrap_or_default(),
            ..Info::default()
        };
        let rest = self.match_date(&mut info, &tags.album);
        let rest = self.match_year_only(&mut info, rest.trim_start());
        info.album = normalize(rest);
        info
    }
}
