use super::*;
use crate::config::{InfoSource, OrganizeSettings};
use std::path::{Path, PathBuf};

fn extractor() -> InfoExtractor {
    InfoExtractor::with_current_year(2026)
}

fn date_of(info: &Info) -> (&str, &str, &str) {
    (info.year.as_str(), info.month.as_str(), info.day.as_str())
}

#[test]
fn filename_dates_in_every_supported_layout() {
    let ex = extractor();
    let cases = [
        ("2000-01-01 Show", ("2000", "01", "01"), "Show"),
        ("2000.1.5 Song", ("2000", "01", "05"), "Song"),
        ("2000/01/01-03 Tweezer", ("2000", "01", "01"), "Tweezer"),
        ("12.31.1999 Auld Lang Syne", ("1999", "12", "31"), "Auld Lang Syne"),
        ("03-30-69 Dark Star", ("1969", "03", "30"), "Dark Star"),
        ("98-08-23 Song", ("1998", "08", "23"), "Song"),
    ];
    for (name, date, title) in cases {
        let info = ex.from_filename(name);
        assert_eq!(date_of(&info), date, "date of {name:?}");
        assert_eq!(info.title, title, "title of {name:?}");
    }
}

#[test]
fn filename_show_code_date_with_disc_and_track() {
    let ex = extractor();

    let info = ex.from_filename("ph990710d1_01_Wilson");
    assert_eq!(date_of(&info), ("1999", "07", "10"));
    assert_eq!(info.disc, "1");
    assert_eq!(info.track, "01");
    assert_eq!(info.title, "Wilson");

    let info = ex.from_filename("sci160318d1_01_Shine");
    assert_eq!(date_of(&info), ("2016", "03", "18"));
    assert_eq!(info.title, "Shine");
}

#[test]
fn invalid_dates_are_rejected() {
    let ex = extractor();
    let info = ex.from_filename("2000-13-45 Song");
    assert_eq!(date_of(&info), ("", "", ""));

    let (leap, _) = ex.find_date("2000-02-29").unwrap();
    assert_eq!(leap.day, "29");
    assert!(ex.find_date("1999.02.30").is_none());
}

#[test]
fn invalid_candidate_falls_through_to_later_rule() {
    let ex = extractor();
    // The year-first rule sees 2000-13-45 first and rejects it; the
    // month-first rule then finds the real date.
    let (date, rest) = ex.find_date("2000-13-45 12.31.1999 Song").unwrap();
    assert_eq!(
        date,
        Date {
            year: "1999".into(),
            month: "12".into(),
            day: "31".into()
        }
    );
    assert_eq!(rest, " Song");

    let info = ex.from_filename("2000-13-45 12.31.1999 Song");
    assert_eq!(date_of(&info), ("1999", "12", "31"));
    assert_eq!(info.title, "Song");
}

#[test]
fn find_date_returns_text_after_match() {
    let ex = extractor();
    let (date, rest) = ex.find_date("gd1977-05-08 Barton Hall").unwrap();
    assert_eq!(
        date,
        Date {
            year: "1977".into(),
            month: "05".into(),
            day: "08".into()
        }
    );
    assert_eq!(rest, " Barton Hall");
}

#[test]
fn century_expansion_boundary() {
    let ex = extractor();
    assert_eq!(ex.ensure_century("26").as_deref(), Some("2026"));
    assert_eq!(ex.ensure_century("27").as_deref(), Some("1927"));
    assert_eq!(ex.ensure_century("00").as_deref(), Some("2000"));
    assert_eq!(ex.ensure_century("99").as_deref(), Some("1999"));
    assert_eq!(ex.ensure_century("1999").as_deref(), Some("1999"));
    assert_eq!(ex.ensure_century("123"), None);
    assert_eq!(ex.ensure_century("ab"), None);

    assert_eq!(date_of(&ex.from_filename("01-02-26 x")), ("2026", "01", "02"));
    assert_eq!(date_of(&ex.from_filename("01-02-27 x")), ("1927", "01", "02"));
}

#[test]
fn disc_and_track_rules() {
    let ex = extractor();
    let cases = [
        ("1-01 Song", "1", "01", "Song"),
        ("03 - 02 Song", "03", "02", "Song"),
        ("01 - Song", "", "01", "Song"),
        ("7 Song", "", "7", "Song"),
        ("s01t05 Song", "01", "05", "Song"),
        ("d301 Song", "3", "01", "Song"),
        ("d1t1 Song", "1", "1", "Song"),
        ("Song", "", "", "Song"),
    ];
    for (name, disc, track, title) in cases {
        let info = ex.from_filename(name);
        assert_eq!(info.disc, disc, "disc of {name:?}");
        assert_eq!(info.track, track, "track of {name:?}");
        assert_eq!(info.title, title, "title of {name:?}");
    }
}

#[test]
fn disc_only_marker_fills_disc_and_leaves_album_to_outer_folder() {
    let ex = extractor();
    let mut info = ex.from_filename("01 Song");
    ex.apply_path(&mut info, &["1999-12-31 Venue".to_string(), "CD2".to_string()]);

    assert_eq!(info.disc, "2");
    assert_eq!(info.track, "01");
    assert_eq!(date_of(&info), ("1999", "12", "31"));
    assert_eq!(info.album, "Venue");
    assert_eq!(info.title, "Song");
}

#[test]
fn disc_only_marker_does_not_replace_existing_disc() {
    let ex = extractor();
    let mut info = ex.from_filename("1-01 Song");
    ex.apply_segment(&mut info, "Venue Disc 3");
    assert_eq!(info.disc, "1");
    assert_eq!(info.album, "Venue");
}

#[test]
fn inner_folders_win_over_outer_ones() {
    let ex = extractor();
    let mut info = ex.from_filename("01 x");
    ex.apply_path(
        &mut info,
        &["2001 Outer".to_string(), "1999-07-10 Inner".to_string()],
    );
    assert_eq!(date_of(&info), ("1999", "07", "10"));
    assert_eq!(info.album, "Inner");
}

#[test]
fn bare_year_folder_sets_year_only() {
    let ex = extractor();
    let mut info = Info::default();
    ex.apply_path(&mut info, &["Phish".to_string(), "1999".to_string()]);
    assert_eq!(date_of(&info), ("1999", "", ""));
    assert_eq!(info.album, "Phish");
    assert_eq!(info.to_album(), "1999 Phish");

    let mut info = Info::default();
    ex.apply_segment(&mut info, "1995 - Summer Tour");
    assert_eq!(info.year, "1995");
    assert_eq!(info.album, "Summer Tour");
}

#[test]
fn tags_split_date_from_album() {
    let ex = extractor();
    let tags = EmbeddedTags {
        album: "1999-12-31 Madison Square Garden".into(),
        artist: " Phish ".into(),
        title: "Auld Lang Syne".into(),
        disc: Some(2),
        track: Some(3),
    };
    let info = ex.from_tags(&tags);
    assert_eq!(date_of(&info), ("1999", "12", "31"));
    assert_eq!(info.album, "Madison Square Garden");
    assert_eq!(info.artist, "Phish");
    assert_eq!(info.title, "Auld Lang Syne");
    assert_eq!(info.disc, "2");
    assert_eq!(info.track, "03");
}

#[test]
fn to_album_formats() {
    let mut info = Info {
        year: "2000".into(),
        month: "01".into(),
        day: "01".into(),
        album: "Show".into(),
        ..Info::default()
    };
    assert_eq!(info.to_album(), "2000-01-01 Show");

    info.album.clear();
    assert_eq!(info.to_album(), "2000-01-01");

    let info = Info {
        year: "2000".into(),
        album: "Show".into(),
        ..Info::default()
    };
    assert_eq!(info.to_album(), "2000 Show");

    let info = Info {
        album: "Show".into(),
        ..Info::default()
    };
    assert_eq!(info.to_album(), "Show");
}

#[test]
fn to_file_formats() {
    let mut info = Info {
        disc: "1".into(),
        track: "01".into(),
        title: "Song".into(),
        ..Info::default()
    };
    assert_eq!(info.to_file(), "1-01 Song");

    info.disc.clear();
    assert_eq!(info.to_file(), "01 Song");

    info.title.clear();
    assert_eq!(info.to_file(), "01");

    info.track.clear();
    assert_eq!(info.to_file(), "Untitled");

    info.title = "AC/DC: Live?".into();
    assert_eq!(info.to_file(), "AC-DC- Live-");
}

#[test]
fn safe_filename_keeps_empty_empty() {
    assert_eq!(safe_filename(""), "");
    assert_eq!(safe_filename(" a|b "), "a-b");
}

fn show_info() -> Info {
    Info {
        year: "2000".into(),
        month: "01".into(),
        day: "01".into(),
        album: "Show".into(),
        ..Info::default()
    }
}

#[test]
fn match_requires_literal_album_string() {
    let ex = extractor();
    let reconciler = TagReconciler::new(&OrganizeSettings::default());

    let tags = EmbeddedTags {
        album: "2000-01-01 Show".into(),
        ..EmbeddedTags::default()
    };
    let (_, matched) =
        reconciler.reconcile(&Info::default(), &show_info(), &ex.from_tags(&tags), &tags.album);
    assert!(matched);

    let tags = EmbeddedTags {
        album: "2000.01.01 Show".into(),
        ..EmbeddedTags::default()
    };
    let (merged, matched) =
        reconciler.reconcile(&Info::default(), &show_info(), &ex.from_tags(&tags), &tags.album);
    assert!(!matched);
    assert_eq!(merged.to_album(), "2000-01-01 Show");
}

#[test]
fn empty_album_never_matches() {
    let reconciler = TagReconciler::new(&OrganizeSettings::default());
    let from_path = Info {
        disc: "1".into(),
        track: "01".into(),
        title: "Song".into(),
        ..Info::default()
    };
    let (merged, matched) =
        reconciler.reconcile(&Info::default(), &from_path, &Info::default(), "");
    assert_eq!(merged.to_album(), "");
    assert!(!matched);
}

#[test]
fn force_disables_match() {
    let settings = OrganizeSettings {
        force: true,
        ..OrganizeSettings::default()
    };
    let reconciler = TagReconciler::new(&settings);
    let (_, matched) =
        reconciler.reconcile(&Info::default(), &show_info(), &show_info(), "2000-01-01 Show");
    assert!(!matched);
}

#[test]
fn overrides_beat_path_and_tags() {
    let reconciler = TagReconciler::new(&OrganizeSettings::default());
    let overrides = Info {
        artist: "Forced".into(),
        ..Info::default()
    };
    let from_tags = Info {
        artist: "Tagged".into(),
        ..Info::default()
    };
    let (merged, _) = reconciler.reconcile(&overrides, &show_info(), &from_tags, "");
    assert_eq!(merged.artist, "Forced");

    let (merged, _) = reconciler.reconcile(&Info::default(), &show_info(), &from_tags, "");
    assert_eq!(merged.artist, "Tagged");
}

#[test]
fn preferred_source_wins_and_other_fills_gaps() {
    let from_path = Info {
        year: "1999".into(),
        album: "Folder".into(),
        title: "Path Title".into(),
        track: "01".into(),
        ..Info::default()
    };
    let from_tags = Info {
        year: "2000".into(),
        month: "02".into(),
        day: "03".into(),
        album: "Tagged".into(),
        artist: "Band".into(),
        ..Info::default()
    };

    let by_path = TagReconciler::new(&OrganizeSettings::default());
    let (merged, _) = by_path.reconcile(&Info::default(), &from_path, &from_tags, "");
    assert_eq!(merged.album, "Folder");
    assert_eq!(date_of(&merged), ("1999", "", ""));
    assert_eq!(merged.artist, "Band");

    let by_tags = TagReconciler::new(&OrganizeSettings {
        prefer: InfoSource::Tags,
        ..OrganizeSettings::default()
    });
    let (merged, _) = by_tags.reconcile(&Info::default(), &from_path, &from_tags, "");
    assert_eq!(merged.album, "Tagged");
    assert_eq!(date_of(&merged), ("2000", "02", "03"));
    assert_eq!(merged.title, "Path Title");
    assert_eq!(merged.track, "01");
}

#[test]
fn date_is_filled_as_a_whole() {
    let mut info = Info {
        album: "Show".into(),
        ..Info::default()
    };
    info.fill_from(&show_info());
    assert_eq!(date_of(&info), ("2000", "01", "01"));
}

#[test]
fn bare_year_is_completed_by_same_year_tag_date() {
    let ex = extractor();
    let reconciler = TagReconciler::new(&OrganizeSettings::default());

    let mut from_path = ex.from_filename("01 Llama");
    ex.apply_path(&mut from_path, &["1999 Big Cypress".to_string()]);
    assert_eq!(date_of(&from_path), ("1999", "", ""));

    let tags = EmbeddedTags {
        album: "1999-12-31 Big Cypress".into(),
        ..EmbeddedTags::default()
    };
    let (merged, matched) =
        reconciler.reconcile(&Info::default(), &from_path, &ex.from_tags(&tags), &tags.album);
    assert_eq!(date_of(&merged), ("1999", "12", "31"));
    assert_eq!(merged.to_album(), "1999-12-31 Big Cypress");
    assert!(matched);

    // a full date from another year is not mixed in
    let mut info = Info {
        year: "1998".into(),
        ..Info::default()
    };
    info.fill_from(&show_info());
    assert_eq!(date_of(&info), ("1998", "", ""));
}

fn song_info() -> Info {
    Info {
        artist: "Phish".into(),
        year: "1999".into(),
        month: "12".into(),
        day: "31".into(),
        album: "Venue".into(),
        track: "01".into(),
        title: "Song".into(),
        ..Info::default()
    }
}

#[test]
fn destination_defaults_to_album_under_root() {
    let builder = PathBuilder::new(&OrganizeSettings::default());
    let dest = builder.destination(Path::new("old/01 x.flac"), &song_info(), ".mp3");
    assert_eq!(dest, PathBuf::from("1999-12-31 Venue/01 Song.mp3"));
}

#[test]
fn destination_in_collection_mode_adds_artist_and_year() {
    let builder = PathBuilder::new(&OrganizeSettings {
        collection: true,
        ..OrganizeSettings::default()
    });
    let dest = builder.destination(Path::new("Phish/misc/x.flac"), &song_info(), ".mp3");
    assert_eq!(dest, PathBuf::from("Phish/1999/1999-12-31 Venue/01 Song.mp3"));
}

#[test]
fn destination_keeps_existing_artist_year_layout() {
    let builder = PathBuilder::new(&OrganizeSettings::default());
    let dest = builder.destination(Path::new("Phish/1999/show/x.mp3"), &song_info(), ".mp3");
    assert_eq!(dest, PathBuf::from("Phish/1999/1999-12-31 Venue/01 Song.mp3"));
}

#[test]
fn destination_without_album_keeps_folder() {
    let builder = PathBuilder::new(&OrganizeSettings::default());
    let info = Info {
        title: "x".into(),
        ..Info::default()
    };
    let dest = builder.destination(Path::new("misc/x.mp3"), &info, ".mp3");
    assert_eq!(dest, PathBuf::from("misc/x.mp3"));
}
