use rand::rngs::StdRng;
use rand::SeedableRng;

use sort_race::input::{format_values, parse_values, random_values};
use sort_race::EngineError;

#[test]
fn parses_comma_separated_values() {
    assert_eq!(
        parse_values("64,34,25,12,22,11,90,88,45,50,23,67").unwrap(),
        [64, 34, 25, 12, 22, 11, 90, 88, 45, 50, 23, 67]
    );
    assert_eq!(parse_values(" 3 , -1,0 ").unwrap(), [3, -1, 0]);
    assert_eq!(parse_values("5").unwrap(), [5]);
    assert_eq!(
        parse_values("2147483647,-2147483648").unwrap(),
        [i32::MAX, i32::MIN]
    );
}

#[test]
fn rejects_invalid_text() {
    for text in ["", "   ", "1,,2", "1,2,", "1;2", "one", "1.5", "2147483648"] {
        assert!(
            matches!(parse_values(text), Err(EngineError::InvalidInput(_))),
            "{text:?}"
        );
    }
}

#[test]
fn error_names_the_offending_item() {
    let err = parse_values("1, 2, x").unwrap_err();
    let msg = err.to_string();

    assert!(msg.contains("item 3"), "{msg}");
    assert!(msg.contains("\"x\""), "{msg}");
}

#[test]
fn random_values_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let values = random_values(12, 100, &mut rng);

    assert_eq!(values.len(), 12);
    assert!(values.iter().all(|v| (1..=100).contains(v)));

    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(random_values(12, 100, &mut rng), values);

    // A non-positive bound still yields valid values.
    assert!(random_values(5, 0, &mut rng).iter().all(|&v| v == 1));
}

#[test]
fn format_round_trips() {
    let values = vec![5, -2, 40];
    assert_eq!(format_values(&values), "5,-2,40");
    assert_eq!(parse_values(&format_values(&values)).unwrap(), values);
}
