use super::*;

fn planner() -> LogoLayoutPlanner {
    LogoLayoutPlanner::default()
}

#[test]
fn delimiter_breaks_into_long_variant() {
    let plan = planner().plan("BEZIRK % LIEZEN");
    assert_eq!(plan.display_text, "BEZIRK\nLIEZEN");
    assert_eq!(plan.asset_variant, AssetVariant::Long);
    assert_eq!(plan.break_source, Some(BreakSource::Delimiter));
    assert_eq!(plan.text_width_scale, 1.0);
}

#[test]
fn short_label_stays_on_one_line() {
    let plan = planner().plan("Eisenstadt");
    assert_eq!(plan.display_text, "EISENSTADT");
    assert_eq!(plan.asset_variant, AssetVariant::Short);
    assert_eq!(plan.line_count(), 1);
    assert_eq!(plan.break_source, None);
}

#[test]
fn long_label_breaks_at_last_space() {
    let plan = planner().plan("bruck an der grossglocknerstrasse");
    assert_eq!(plan.display_text, "BRUCK AN DER\nGROSSGLOCKNERSTRASSE");
    assert_eq!(plan.asset_variant, AssetVariant::Long);
    assert_eq!(plan.break_source, Some(BreakSource::Length));
}

#[test]
fn lopsided_break_squeezes_text_box() {
    // 12 / 20 characters around a 16.5 midpoint: outside the 4 character window.
    let plan = planner().plan("BRUCK AN DER GROSSGLOCKNERSTRASSE");
    assert!((plan.text_width_scale - 0.8).abs() < 1e-12);
}

#[test]
fn delimiter_wins_over_length() {
    let label = "SANKT JOHANN IM % PONGAU UND UMGEBUNG";
    assert!(label.chars().count() > 16);
    let plan = planner().plan(label);
    assert_eq!(plan.display_text, "SANKT JOHANN IM\nPONGAU UND UMGEBUNG");
    assert_eq!(plan.break_source, Some(BreakSource::Delimiter));
}

#[test]
fn only_first_delimiter_breaks() {
    let plan = planner().plan("A % B % C");
    assert_eq!(plan.display_text, "A\nB C");
    assert_eq!(plan.line_count(), 2);
}

#[test]
fn empty_side_of_delimiter_is_dropped() {
    let plan = planner().plan("  % graz ");
    assert_eq!(plan.display_text, "GRAZ");
    assert_eq!(plan.asset_variant, AssetVariant::Short);

    let plan = planner().plan("LEOBEN %");
    assert_eq!(plan.display_text, "LEOBEN");
    assert_eq!(plan.break_source, None);
}

#[test]
fn threshold_is_exclusive() {
    let sixteen = "ABCDEFGH IJKLMNO";
    assert_eq!(sixteen.chars().count(), 16);
    assert_eq!(planner().plan(sixteen).asset_variant, AssetVariant::Short);
}

#[test]
fn long_label_without_space_is_squeezed_not_broken() {
    let plan = planner().plan("DONAUDAMPFSCHIFFFAHRT");
    assert_eq!(plan.asset_variant, AssetVariant::Short);
    assert_eq!(plan.line_count(), 1);
    assert!((plan.text_width_scale - 16.0 / 21.0).abs() < 1e-12);
}

#[test]
fn squeeze_never_drops_below_minimum() {
    let plan = planner().plan(&"X".repeat(80));
    assert_eq!(plan.text_width_scale, 0.6);
}

#[test]
fn uppercasing_counts_characters_not_bytes() {
    // 15 characters after uppercasing, even though the UTF-8 form is longer.
    let plan = planner().plan("völkermarkt süd");
    assert_eq!(plan.display_text, "VÖLKERMARKT SÜD");
    assert_eq!(plan.asset_variant, AssetVariant::Short);
}

#[test]
fn text_top_is_anchored_to_width() {
    let one = planner().plan("WIEN");
    let two = planner().plan("WIEN % MITTE");
    assert_eq!(one.vertical_offset_ratio, two.vertical_offset_ratio);
    assert!((one.text_top(100.0, 200.0) - (100.0 + 0.56 * 200.0)).abs() < 1e-12);
    assert_eq!(one.text_top(100.0, 200.0), two.text_top(100.0, 200.0));
}

#[test]
fn custom_delimiter_and_threshold() {
    let cfg = LogoConfig {
        length_threshold: 8,
        delimiter: '|',
        ..LogoConfig::default()
    };
    let plan = plan_logo_layout("north|south", &cfg);
    assert_eq!(plan.display_text, "NORTH\nSOUTH");
    let plan = plan_logo_layout("north by west", &cfg);
    assert_eq!(plan.display_text, "NORTH BY\nWEST");
}

#[test]
fn empty_label_is_single_empty_line() {
    let plan = planner().plan("   ");
    assert_eq!(plan.display_text, "");
    assert_eq!(plan.asset_variant, AssetVariant::Short);
    assert_eq!(plan.text_width_scale, 1.0);
}

#[test]
fn plan_serializes_with_lowercase_variant() {
    let v = serde_json::to_value(planner().plan("A % B")).unwrap();
    assert_eq!(v["asset_variant"], "long");
    assert_eq!(v["break_source"], "delimiter");
}

#[test]
fn typed_line_breaks_are_folded_into_spaces() {
    let plan = planner().plan("Graz\nNord\nOst");
    assert_eq!(plan.display_text, "GRAZ NORD OST");
    assert_eq!(plan.asset_variant, AssetVariant::Short);
    assert_eq!(plan.line_count(), 1);
    assert_eq!(plan.break_source, None);

    let plan = planner().plan("Bezirk\t%\r\nLiezen");
    assert_eq!(plan.display_text, "BEZIRK\nLIEZEN");
    assert_eq!(plan.break_source, Some(BreakSource::Delimiter));

    let plan = planner().plan("Sankt Johann\nim   Pongau");
    assert_eq!(plan.display_text, "SANKT JOHANN IM\nPONGAU");
    assert_eq!(plan.asset_variant, AssetVariant::Long);
    assert_eq!(plan.break_source, Some(BreakSource::Length));
}

#[test]
fn variant_always_matches_line_count() {
    for label in ["a\nb\nc\nd", "x % y % z", "\n\n", "LONG LABEL\nWITH\tBREAKS EVERYWHERE"] {
        let plan = planner().plan(label);
        let expected = match plan.line_count() {
            1 => AssetVariant::Short,
            2 => AssetVariant::Long,
            n => panic!("{label:?} produced {n} lines"),
        };
        assert_eq!(plan.asset_variant, expected, "{label:?}");
    }
}
