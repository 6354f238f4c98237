mod common;
use common::*;
use gallery_query::*;

const JAN_1_2020_UTC: i64 = 1_577_836_800_000;
const MAY_3_2020_UTC: i64 = 1_588_464_000_000;

#[test]
fn explicit_connectors() {
    let query = parse_ok("cat and dog");
    let parts = as_and(&query);
    assert_eq!(parts.len(), 2);
    word_is(&parts[0], "cat");
    word_is(&parts[1], "dog");

    let query = parse_ok("cat or dog");
    let parts = as_or(&query);
    word_is(&parts[0], "cat");
    word_is(&parts[1], "dog");
}

#[test]
fn juxtaposition_follows_the_implicit_relation() {
    let query = parse_ok("cat dog");
    let parts = as_or(&query);
    word_is(&parts[0], "cat");
    word_is(&parts[1], "dog");

    let query = parser().with_implicit_or(false).parse("cat dog").unwrap();
    let parts = as_unknown(&query);
    word_is(&parts[0], "cat");
    word_is(&parts[1], "dog");
}

#[test]
fn bracketed_group_is_never_split() {
    let query = parse_ok("(cat or dog) and fish");
    let parts = as_and(&query);
    let inner = as_or(&parts[0]);
    word_is(&inner[0], "cat");
    word_is(&inner[1], "dog");
    word_is(&parts[1], "fish");
}

#[test]
fn quoted_spaces_do_not_split() {
    let query = parse_ok("caption:\"sunset beach\" dog");
    let parts = as_or(&query);
    text_is(&parts[0], TextField::Caption, "sunset beach", TextMatchType::ExactMatch);
    word_is(&parts[1], "dog");
}

#[test]
fn whitespace_is_normalized() {
    let query = parse_ok("  cat \t and\n\n   caption:   sunset  ");
    let parts = as_and(&query);
    word_is(&parts[0], "cat");
    text_is(&parts[1], TextField::Caption, "sunset", TextMatchType::Like);
}

#[test]
fn text_field_keywords() {
    let cases = [
        ("caption:sunset", TextField::Caption, "sunset", TextMatchType::Like),
        ("caption:\"sunset beach\"", TextField::Caption, "sunset beach", TextMatchType::ExactMatch),
        ("keyword:tree", TextField::Keyword, "tree", TextMatchType::Like),
        ("person:(Ann Lee)", TextField::Person, "Ann Lee", TextMatchType::Like),
        ("position:Budapest", TextField::Position, "Budapest", TextMatchType::Like),
        ("file-name:\"a.jpg\"", TextField::FileName, "a.jpg", TextMatchType::ExactMatch),
        ("directory:2020", TextField::Directory, "2020", TextMatchType::Like),
    ];
    for (input, field, text, match_type) in cases {
        text_is(&parse_ok(input), field, text, match_type);
    }
}

#[test]
fn unknown_prefix_is_free_text() {
    word_is(&parse_ok("camera:nikon"), "camera:nikon");
    word_is(&parse_ok("\"cat\""), "\"cat\"");
}

#[test]
fn some_of_unfolds_juxtaposed_members() {
    let query = parse_ok("someOf:(a b)");
    let some_of = as_some_of(&query);
    assert_eq!(some_of.min, None);
    assert_eq!(some_of.list.len(), 2);
    word_is(&some_of.list[0], "a");
    word_is(&some_of.list[1], "b");
}

#[test]
fn some_of_with_many_members_is_flat() {
    let query = parse_ok("someOf:(a b c d)");
    let some_of = as_some_of(&query);
    assert_eq!(some_of.list.len(), 4);
    for (member, word) in some_of.list.iter().zip(["a", "b", "c", "d"]) {
        word_is(member, word);
    }
}

#[test]
fn n_of_m_minimum() {
    let query = parse_ok("2-someOf:(a b c)");
    let some_of = as_some_of(&query);
    assert_eq!(some_of.min, Some(2));
    assert_eq!(some_of.list.len(), 3);
}

#[test]
fn some_of_keeps_boolean_groups_whole() {
    let query = parse_ok("someOf:((a or b) c)");
    let some_of = as_some_of(&query);
    assert_eq!(some_of.list.len(), 2);
    let inner = as_or(&some_of.list[0]);
    word_is(&inner[0], "a");
    word_is(&inner[1], "b");
    word_is(&some_of.list[1], "c");
}

#[test]
fn some_of_members_can_be_keyword_terms() {
    let query = parse_ok("someOf:(person:Ann keyword:(red car) minRating:3)");
    let some_of = as_some_of(&query);
    assert_eq!(some_of.list.len(), 3);
    text_is(&some_of.list[0], TextField::Person, "Ann", TextMatchType::Like);
    text_is(&some_of.list[1], TextField::Keyword, "red car", TextMatchType::Like);
    assert_eq!(some_of.list[2], SearchQuery::MinRating(RangeSearch { value: Some(3) }));
}

#[test]
fn some_of_inside_a_boolean_group() {
    let query = parse_ok("cat and someOf:(a b)");
    let parts = as_and(&query);
    word_is(&parts[0], "cat");
    assert_eq!(as_some_of(&parts[1]).list.len(), 2);
}

#[test]
fn dates() {
    assert_eq!(
        parse_ok("from:2020"),
        SearchQuery::FromDate(DateSearch {
            value: Some(JAN_1_2020_UTC)
        })
    );
    assert_eq!(
        parse_ok("to:2020-05-03"),
        SearchQuery::ToDate(DateSearch {
            value: Some(MAY_3_2020_UTC)
        })
    );
    assert_eq!(
        parse_ok("to:(2020-05-03)"),
        SearchQuery::ToDate(DateSearch {
            value: Some(MAY_3_2020_UTC)
        })
    );
    assert_eq!(
        parse_ok("from:banana"),
        SearchQuery::FromDate(DateSearch { value: None })
    );
}

#[test]
fn dates_follow_the_configured_order() {
    let parser = parser().with_date_order(DateOrder::DayMonthYear);
    assert_eq!(
        parser.parse("from:03.05.2020").unwrap(),
        SearchQuery::FromDate(DateSearch {
            value: Some(MAY_3_2020_UTC)
        })
    );
    let parser = parser.with_date_order(DateOrder::MonthDayYear);
    assert_eq!(
        parser.parse("from:05/03/2020").unwrap(),
        SearchQuery::FromDate(DateSearch {
            value: Some(MAY_3_2020_UTC)
        })
    );
}

#[test]
fn numeric_bounds() {
    assert_eq!(
        parse_ok("minRating:3"),
        SearchQuery::MinRating(RangeSearch { value: Some(3) })
    );
    assert_eq!(
        parse_ok("maxRating:abc"),
        SearchQuery::MaxRating(RangeSearch { value: None })
    );
    assert_eq!(
        parse_ok("minResolution:12"),
        SearchQuery::MinResolution(RangeSearch { value: Some(12) })
    );
    assert_eq!(
        parse_ok("maxResolution:8mp"),
        SearchQuery::MaxResolution(RangeSearch { value: Some(8) })
    );
}

#[test]
fn distance() {
    let near = |distance, text: &str| {
        SearchQuery::Distance(DistanceSearch {
            distance,
            from: Place { text: text.into() },
        })
    };
    assert_eq!(parse_ok("10-kmFrom:Paris"), near(Some(10), "Paris"));
    assert_eq!(parse_ok("5-kmFrom:(New York)"), near(Some(5), "New York"));
    assert_eq!(parse_ok("5-kmFrom:\"New York\""), near(Some(5), "New York"));
    assert_eq!(parse_ok("-kmFrom:Rome"), near(None, "Rome"));
}

#[test]
fn orientation() {
    assert_eq!(
        parse_ok("orientation:landscape"),
        SearchQuery::Orientation(OrientationSearch { landscape: true })
    );
    assert_eq!(
        parse_ok("orientation:portrait"),
        SearchQuery::Orientation(OrientationSearch { landscape: false })
    );
    assert_eq!(
        parse_ok("orientation:square"),
        SearchQuery::Orientation(OrientationSearch { landscape: false })
    );
}

#[test]
fn unbalanced_input_degrades_to_text() {
    word_is(&parse_ok("\"open quote and more"), "\"open quote and more");
    word_is(&parse_ok("(open bracket"), "(open bracket");
}

#[test]
fn localized_vocabulary() {
    let keywords = QueryKeywords {
        and: "és".into(),
        or: "vagy".into(),
        caption: "felirat".into(),
        some_of: "néhány".into(),
        n_some_of: "néhány".into(),
        ..QueryKeywords::default()
    };
    let parser = SearchQueryParser::new(keywords)
        .unwrap()
        .with_time_zone(jiff::tz::TimeZone::UTC);

    let query = parser.parse("felirat:naplemente és kutya").unwrap();
    let parts = as_and(&query);
    text_is(&parts[0], TextField::Caption, "naplemente", TextMatchType::Like);
    word_is(&parts[1], "kutya");

    // the English tokens are plain words now
    let query = parser.parse("cat and dog").unwrap();
    assert_eq!(as_or(&query).len(), 2);

    let query = parser.parse("2-néhány:(a b c)").unwrap();
    assert_eq!(as_some_of(&query).min, Some(2));
    assert_eq!(parser.stringify(&query), "2-néhány:(a b c)");
}

#[test]
fn invalid_vocabulary_is_rejected() {
    let keywords = QueryKeywords {
        or: "and".into(),
        ..QueryKeywords::default()
    };
    assert!(matches!(
        SearchQueryParser::new(keywords),
        Err(KeywordError::Duplicate { .. })
    ));
}

#[test]
fn limits() {
    let long = "a ".repeat(DEFAULT_MAX_INPUT_LEN);
    let err = parser().parse(&long).unwrap_err();
    assert_eq!(err.position, DEFAULT_MAX_INPUT_LEN);

    let deep = format!("{}a{}", "(".repeat(300), ")".repeat(300));
    assert!(parser().parse(&deep).is_err());

    let nested = format!("{}a{}", "(".repeat(20), ")".repeat(20));
    word_is(&parse_ok(&nested), "a");
}

#[test]
fn long_flat_queries_are_not_too_deep() {
    let words = vec!["w"; DEFAULT_MAX_DEPTH * 2];
    let query = parse_ok(&words.join(" "));
    let mut terms = 1;
    let mut node = &query;
    while let SearchQuery::Or(group) = node {
        word_is(&group.list[0], "w");
        node = &group.list[1];
        terms += 1;
    }
    word_is(node, "w");
    assert_eq!(terms, DEFAULT_MAX_DEPTH * 2);
}
