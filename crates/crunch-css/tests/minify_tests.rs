//! Integration tests for the minifier.

use crunch_css::{Level, minify};

const TWO_RULESETS: &str = ".a { color: red; }\n.b { color: blue; }";

const NESTED: &str = "@media (min-width: 600px) { .a { color: red; } }";

const STYLESHEET: &str = "@import url(a.css);
/* layout */
h1, h2 { margin: 0 auto; color: red }
@media (max-width: 40em) {
  .nav { display: none; }
}
";

#[test]
fn test_empty_input() {
    for level in [Level::None, Level::Low, Level::Medium, Level::High] {
        assert_eq!(minify("", level), "");
        assert_eq!(minify("   ", level), "");
        assert_eq!(minify("\n\t \r\n", level), "");
    }
}

#[test]
fn test_none_only_trims() {
    let css = format!("\n\n{TWO_RULESETS}\n\n");
    assert_eq!(
        minify(&css, Level::None),
        format!("{TWO_RULESETS}\n/*lmdcrunchcss=0*/")
    );
}

#[test]
fn test_none_keeps_comments() {
    assert_eq!(
        minify("/* keep */ a{b:c}", Level::None),
        "/* keep */ a{b:c}\n/*lmdcrunchcss=0*/"
    );
}

#[test]
fn test_two_rulesets_high() {
    assert_eq!(
        minify(TWO_RULESETS, Level::High),
        ".a{color:red}.b{color:blue}/*lmdcrunchcss=3*/"
    );
}

#[test]
fn test_two_rulesets_medium() {
    assert_eq!(
        minify(TWO_RULESETS, Level::Medium),
        ".a{color:red}\n.b{color:blue}\n/*lmdcrunchcss=2*/"
    );
}

#[test]
fn test_two_rulesets_low() {
    assert_eq!(
        minify(TWO_RULESETS, Level::Low),
        ".a {\n\tcolor: red;\n}\n.b {\n\tcolor: blue;\n}\n/*lmdcrunchcss=1*/"
    );
}

#[test]
fn test_nested_medium() {
    assert_eq!(
        minify(NESTED, Level::Medium),
        "@media (min-width:600px){\n\t.a{color:red}\n}\n/*lmdcrunchcss=2*/"
    );
}

#[test]
fn test_nested_low() {
    assert_eq!(
        minify(NESTED, Level::Low),
        "@media (min-width: 600px) {\n\t.a {\n\t\tcolor: red;\n\t}\n}\n/*lmdcrunchcss=1*/"
    );
}

#[test]
fn test_nested_high() {
    assert_eq!(
        minify(NESTED, Level::High),
        "@media (min-width:600px){.a{color:red}}/*lmdcrunchcss=3*/"
    );
}

#[test]
fn test_media_without_space_before_condition() {
    assert_eq!(
        minify("@media screen and(max-width : 30em){a{b:c}}", Level::High),
        "@media screen and (max-width:30em){a{b:c}}/*lmdcrunchcss=3*/"
    );
}

#[test]
fn test_keyframes_medium() {
    let css = "@keyframes spin { from { transform: rotate(0deg); } to { transform: rotate(360deg); } }";
    assert_eq!(
        minify(css, Level::Medium),
        "@keyframes spin{\n\tfrom{transform:rotate(0deg)}\n\tto{transform:rotate(360deg)}\n}\n/*lmdcrunchcss=2*/"
    );
}

#[test]
fn test_stylesheet_low() {
    assert_eq!(
        minify(STYLESHEET, Level::Low),
        "@import url(a.css);
h1, h2 {
\tmargin: 0 auto;
\tcolor: red;
}
@media (max-width: 40em) {
\t.nav {
\t\tdisplay: none;
\t}
}
/*lmdcrunchcss=1*/"
    );
}

#[test]
fn test_stylesheet_high() {
    assert_eq!(
        minify(STYLESHEET, Level::High),
        "@import url(a.css);h1,h2{margin:0 auto;color:red}@media (max-width:40em){.nav{display:none}}/*lmdcrunchcss=3*/"
    );
}

#[test]
fn test_statement_at_rules_get_own_line() {
    let css = "@charset \"UTF-8\";@import url(base.css);.a{color:red}";
    assert_eq!(
        minify(css, Level::Medium),
        "@charset \"UTF-8\";\n@import url(base.css);\n.a{color:red}\n/*lmdcrunchcss=2*/"
    );
}

#[test]
fn test_comments_stripped() {
    let output = minify("a{color:red}/* comment */", Level::Low);
    assert_eq!(output, "a {\n\tcolor: red;\n}\n/*lmdcrunchcss=1*/");
    assert_eq!(output.matches("/*").count(), 1);
}

#[test]
fn test_multiline_comment_stripped() {
    let css = "/*\n * Header\n */\na { color: red }\n/* trailing\n comment */";
    assert_eq!(minify(css, Level::High), "a{color:red}/*lmdcrunchcss=3*/");
}

#[test]
fn test_empty_rulesets_removed() {
    let css = ".a{}\n.b { }\n.c{color:red}\n.d {\n}";
    assert_eq!(minify(css, Level::Low), ".c {\n\tcolor: red;\n}\n/*lmdcrunchcss=1*/");
    assert_eq!(minify(css, Level::High), ".c{color:red}/*lmdcrunchcss=3*/");
}

#[test]
fn test_empty_ruleset_after_import_keeps_import() {
    let css = "@import url(a.css);\n.unused { }\nb { c: d; }";
    assert_eq!(minify(css, Level::High), "@import url(a.css);b{c:d}/*lmdcrunchcss=3*/");
    assert_eq!(
        minify("@import url(a.css);a{}b{c:d}", Level::Low),
        "@import url(a.css);\nb {\n\tc: d;\n}\n/*lmdcrunchcss=1*/"
    );
}

#[test]
fn test_missing_semicolons_inserted_at_low() {
    assert_eq!(
        minify("a{color:red;margin:0}", Level::Low),
        "a {\n\tcolor: red;\n\tmargin: 0;\n}\n/*lmdcrunchcss=1*/"
    );
}

#[test]
fn test_last_semicolon_dropped_above_low() {
    assert_eq!(
        minify("a { color: red; margin: 0; }", Level::Medium),
        "a{color:red;margin:0}\n/*lmdcrunchcss=2*/"
    );
}

#[test]
fn test_selector_commas() {
    let css = "h1,h2 , h3{margin:0}";
    assert_eq!(
        minify(css, Level::Low),
        "h1, h2, h3 {\n\tmargin: 0;\n}\n/*lmdcrunchcss=1*/"
    );
    assert_eq!(minify(css, Level::High), "h1,h2,h3{margin:0}/*lmdcrunchcss=3*/");
}

#[test]
fn test_value_commas() {
    let css = "a { font-family: Arial ,sans-serif }";
    assert_eq!(
        minify(css, Level::Low),
        "a {\n\tfont-family: Arial, sans-serif;\n}\n/*lmdcrunchcss=1*/"
    );
    assert_eq!(
        minify(css, Level::Medium),
        "a{font-family:Arial,sans-serif}\n/*lmdcrunchcss=2*/"
    );
}

#[test]
fn test_colon_inside_value_untouched() {
    let css = "a { background: url(http://a.test/x.png) }";
    assert_eq!(
        minify(css, Level::Low),
        "a {\n\tbackground: url(http://a.test/x.png);\n}\n/*lmdcrunchcss=1*/"
    );
}

#[test]
fn test_pseudo_class_selector_untouched() {
    assert_eq!(
        minify("a:hover , a:focus { color: red }", Level::Low),
        "a:hover, a:focus {\n\tcolor: red;\n}\n/*lmdcrunchcss=1*/"
    );
}

#[test]
fn test_unrecognised_line_skipped() {
    assert_eq!(minify("stray text", Level::Medium), "/*lmdcrunchcss=2*/");
    assert_eq!(
        minify(".a{color:red}oops", Level::Medium),
        ".a{color:red}\n/*lmdcrunchcss=2*/"
    );
}

#[test]
fn test_unbalanced_closing_brace_does_not_panic() {
    assert_eq!(minify("}}", Level::Medium), "}\n}\n/*lmdcrunchcss=2*/");
    // The synthesized `;}` line has no recognisable shape
    assert_eq!(minify("}}", Level::Low), "}\n/*lmdcrunchcss=1*/");
}

#[test]
fn test_double_minify_is_stable() {
    for level in [Level::Low, Level::Medium, Level::High] {
        let once = minify(STYLESHEET, level);
        let twice = minify(&once, level);
        assert_eq!(once, twice, "level {level}");
    }
}

#[test]
fn test_double_minify_none_keeps_single_token() {
    let once = minify(TWO_RULESETS, Level::None);
    let twice = minify(&once, Level::None);
    assert_eq!(once, twice);
    assert_eq!(twice.matches("lmdcrunchcss").count(), 1);
}

#[test]
fn test_none_replaces_token_of_other_level() {
    let high = minify(TWO_RULESETS, Level::High);
    assert_eq!(
        minify(&high, Level::None),
        ".a{color:red}.b{color:blue}\n/*lmdcrunchcss=0*/"
    );
}

#[test]
fn test_minify_changes_token_level() {
    let low = minify(TWO_RULESETS, Level::Low);
    assert_eq!(
        minify(&low, Level::High),
        minify(TWO_RULESETS, Level::High)
    );
}
