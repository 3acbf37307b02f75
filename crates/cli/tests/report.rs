use naf_cli::report;
use naf_core::query::{LongSentence, RankedItem};
use std::path::PathBuf;

#[test]
fn numbers_keep_a_fractional_part() {
    assert_eq!(report::number(6.0), "6.0\n");
    assert_eq!(report::number(0.25), "0.25\n");
}

#[test]
fn entity_table_has_header_and_tab_separated_rows() {
    let rows = vec![
        RankedItem {
            rank: 1,
            item: "john smith".into(),
            frequency: 4,
        },
        RankedItem {
            rank: 2,
            item: "amsterdam".into(),
            frequency: 2,
        },
    ];
    assert_eq!(
        report::ranked_table("Entity", &rows),
        "Rank\tEntity\tFrequency\n1\tjohn smith\t4\n2\tamsterdam\t2\n"
    );
    assert_eq!(
        report::ranked_table("Token", &[]),
        "Rank\tToken\tFrequency\n"
    );
}

#[test]
fn longest_sentence_blocks() {
    let sentences = vec![LongSentence {
        rank: 2,
        length: 3,
        source: PathBuf::from("arch/en/a.nohyphen"),
        sentence_id: "7".into(),
        text: "a b c .".into(),
    }];
    assert_eq!(
        report::longest_sentences(&sentences),
        "Rank 2, 3 words, from arch/en/a.nohyphen:\na b c .\n\n"
    );
}

#[test]
fn json_rendering_uses_field_names() {
    let rows = vec![RankedItem {
        rank: 1,
        item: "paris".into(),
        frequency: 3,
    }];
    let rendered = report::json(&rows).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value[0]["item"], "paris");
    assert_eq!(value[0]["frequency"], 3);
}
