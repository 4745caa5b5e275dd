use std::fmt;

/// Canonical metadata for one recording.
///
/// `year`, `month` and `day` are either empty or form a valid date; `month`
/// and `day` are only set together with `year`. `disc` and `track` keep the
/// digit width they were found with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    pub artist: String,
    pub album: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub disc: String,
    pub track: String,
    pub title: String,
}

impl Info {
    pub fn has_full_date(&self) -> bool {
        !self.year.is_empty() && !self.month.is_empty() && !self.day.is_empty()
    }

    /// Album string as written into tags and used as the folder name:
    /// `YYYY-MM-DD Album`, `YYYY Album`, or `Album`.
    pub fn to_album(&self) -> String {
        let date = if self.year.is_empty() {
            String::new()
        } else if self.month.is_empty() || self.day.is_empty() {
            self.year.clone()
        } else {
            format!("{}-{}-{}", self.year, self.month, self.day)
        };

        match (date.is_empty(), self.album.is_empty()) {
            (true, _) => self.album.clone(),
            (false, true) => date,
            (false, false) => format!("{} {}", date, self.album),
        }
    }

    /// File name (without extension): `D-TT Title`, `TT Title` or `Title`.
    pub fn to_file(&self) -> String {
        let title = if !self.title.is_empty() {
            self.title.as_str()
        } else if !self.track.is_empty() {
            ""
        } else {
            "Untitled"
        };

        let prefix = match (self.disc.is_empty(), self.track.is_empty()) {
            (_, true) => String::new(),
            (true, false) => self.track.clone(),
            (false, false) => format!("{}-{}", self.disc, self.track),
        };

        let name = match (prefix.is_empty(), title.is_empty()) {
            (true, _) => title.to_string(),
            (false, true) => prefix,
            (false, false) => format!("{prefix} {title}"),
        };
        safe_filename(&name)
    }

    /// Fill every empty field from `other`. The date is taken as a whole so
    /// the result never mixes parts of two dates; a bare year is only
    /// completed by a full date in that same year.
    pub fn fill_from(&mut self, other: &Info) {
        fn fill(dst: &mut String, src: &str) {
            if dst.is_empty() {
                *dst = src.to_string();
            }
        }

        let refines_year = !self.has_full_date() && self.year == other.year;
        if self.year.is_empty() || (refines_year && other.has_full_date()) {
            self.year = other.year.clone();
            self.month = other.month.clone();
            self.day = other.day.clone();
        }
        fill(&mut self.artist, &other.artist);
        fill(&mut self.album, &other.album);
        fill(&mut self.disc, &other.disc);
        fill(&mut self.track, &other.track);
        fill(&mut self.title, &other.title);
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "artist={:?} album={:?} disc={:?} track={:?} title={:?}",
            self.artist,
            self.to_album(),
            self.disc,
            self.track,
            self.title
        )
    }
}

/// Tag fields read from an audio file by a prober.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedTags {
    pub album: String,
    pub artist: String,
    pub title: String,
    pub disc: Option<u32>,
    pub track: Option<u32>,
}

/// Replace characters that cannot appear in a file name.
pub fn safe_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
